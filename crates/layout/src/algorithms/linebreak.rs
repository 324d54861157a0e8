//! Greedy best-fit line breaking.
//!
//! A single left-to-right scan keeps the line being built and the best breakpoint seen for it.
//! Candidate breakpoints are glue following a box and penalties below [`INFINITE_PENALTY`]. As
//! long as the badness of breaking keeps decreasing the candidate becomes the new best; once it
//! increases the line is ejected at the best breakpoint and the next line is re-seeded with the
//! items after it.

use super::adjustment::{INFINITE_BADNESS, badness, badness_for_penalty};
use galley_types::item::{INFINITE_PENALTY, Item};
use std::ops::Range;

struct LineState {
    /// Indices of the boxes and glue of the line being built.
    line: Vec<usize>,
    badness: f32,
    best: Option<usize>,
}

impl LineState {
    fn new() -> Self {
        Self {
            line: Vec::new(),
            badness: INFINITE_BADNESS,
            best: None,
        }
    }

    fn reset(&mut self) {
        self.line.clear();
        self.badness = INFINITE_BADNESS;
        self.best = None;
    }

    fn badness(&self, items: &[Item], line_width: f32) -> f32 {
        badness(self.line.iter().map(|&j| &items[j]), line_width)
    }

    /// Starts a new line with the boxes and glue in `from..=to`, skipping leading non-boxes.
    fn reseed(&mut self, items: &[Item], from: usize, to: usize) {
        self.reset();
        let start = (from..=to).find(|&j| items[j].is_box());
        if let Some(start) = start {
            self.line.extend(
                (start..=to).filter(|&j| !matches!(items[j], Item::Penalty(_))),
            );
        }
    }
}

/// Finds the indices at which `items` is broken into lines.
///
/// Every line ends just before its breakpoint. The returned list always closes the paragraph:
/// unless the last break already sits on the final item, `items.len()` is appended.
pub fn find_breakpoints(items: &[Item], line_width: f32) -> Vec<usize> {
    let mut breaks = Vec::new();
    let mut state = LineState::new();

    for (i, item) in items.iter().enumerate() {
        match item {
            Item::Box(_) | Item::TextBox(_) => state.line.push(i),
            Item::Penalty(p) if p.is_forced_break() => {
                log::debug!("Forced break at {}", i);
                breaks.push(i);
                state.reset();
            }
            Item::Penalty(p) => {
                if state.line.is_empty() || p.penalty() >= INFINITE_PENALTY {
                    continue;
                }
                let line = state.line.iter().map(|&j| &items[j]);
                let tentative = badness_for_penalty(line, line_width, p.penalty());
                match state.best {
                    Some(best) if tentative > state.badness => {
                        log::debug!(
                            "Breaking at {} (penalty at {} scores {} > {})",
                            best,
                            i,
                            tentative,
                            state.badness
                        );
                        breaks.push(best);
                        state.reseed(items, best, i);
                    }
                    _ => {
                        state.badness = tentative;
                        state.best = Some(i);
                    }
                }
            }
            Item::Glue(_) => {
                let after_box = i > 0 && items[i - 1].is_box();
                if !after_box {
                    if !state.line.is_empty() {
                        state.line.push(i);
                    }
                    continue;
                }
                let candidate = state.badness(items, line_width);
                match state.best {
                    Some(best) if candidate > state.badness => {
                        log::debug!(
                            "Breaking at {} (glue at {} scores {} > {})",
                            best,
                            i,
                            candidate,
                            state.badness
                        );
                        breaks.push(best);
                        state.reseed(items, best, i);
                    }
                    _ => {
                        state.badness = candidate;
                        state.best = Some(i);
                        state.line.push(i);
                    }
                }
            }
            // Nested lists are rejected before breaking; treat one like a box if it slips through.
            Item::List(_) => state.line.push(i),
        }
    }

    if !items.is_empty() && breaks.last() != Some(&(items.len() - 1)) {
        breaks.push(items.len());
    }
    breaks
}

/// Item ranges of the lines delimited by `breakpoints`.
///
/// Each line runs from the previous breakpoint to the current one (exclusive), with leading
/// non-box items skipped. Ranges that end up empty are left out.
pub fn line_ranges(items: &[Item], breakpoints: &[usize]) -> Vec<Range<usize>> {
    let mut ranges = Vec::with_capacity(breakpoints.len());
    let mut start = 0;
    for &end in breakpoints {
        let end = end.min(items.len());
        while start < end && !items[start].is_box() {
            start += 1;
        }
        if start < end {
            ranges.push(start..end);
        }
        start = end;
    }
    ranges
}

/// Splits `items` into the lines given by `breakpoints`, consuming them.
pub fn split_lines(items: Vec<Item>, breakpoints: &[usize]) -> Vec<Vec<Item>> {
    let ranges = line_ranges(&items, breakpoints);
    let mut lines: Vec<Vec<Item>> = ranges.iter().map(|r| Vec::with_capacity(r.len())).collect();
    let mut current = 0;
    for (index, item) in items.into_iter().enumerate() {
        while current < ranges.len() && index >= ranges[current].end {
            current += 1;
        }
        if current == ranges.len() {
            break;
        }
        if ranges[current].contains(&index) {
            lines[current].push(item);
        }
    }
    lines
}
