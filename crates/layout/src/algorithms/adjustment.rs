//! Adjustment ratio and badness of a candidate line.

use galley_types::item::Item;

/// Badness of a line that cannot be justified.
pub const INFINITE_BADNESS: f32 = 100_000_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineMetrics {
    pub natural_width: f32,
    pub stretch: f32,
    pub shrink: f32,
}

impl LineMetrics {
    pub fn of<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        items.into_iter().fold(Self::default(), |mut m, item| {
            m.natural_width += item.width();
            if let Item::Glue(glue) = item {
                m.stretch += glue.stretch();
                m.shrink += glue.shrink();
            }
            m
        })
    }

    /// How much of the available stretch (positive) or shrink (negative) is needed to reach
    /// `desired_width`. `None` when the glue cannot absorb the difference at all.
    pub fn adjustment_ratio(&self, desired_width: f32) -> Option<f32> {
        let diff = desired_width - self.natural_width;
        if diff == 0.0 {
            return Some(0.0);
        }
        let available = if diff > 0.0 { self.stretch } else { self.shrink };
        if available <= 0.0 {
            return None;
        }
        Some(diff / available)
    }
}

pub fn adjustment_ratio<'a>(
    items: impl IntoIterator<Item = &'a Item>,
    desired_width: f32,
) -> Option<f32> {
    LineMetrics::of(items).adjustment_ratio(desired_width)
}

/// Badness of an adjustment ratio: `100·|r|³`, capped at [`INFINITE_BADNESS`]. Lines that
/// cannot be justified or would shrink beyond their glue's shrink are infinitely bad.
pub fn badness_of_ratio(ratio: Option<f32>) -> f32 {
    match ratio {
        Some(r) if r >= -1.0 => (100.0 * r.abs().powi(3)).min(INFINITE_BADNESS),
        _ => INFINITE_BADNESS,
    }
}

pub fn badness<'a>(items: impl IntoIterator<Item = &'a Item>, desired_width: f32) -> f32 {
    badness_of_ratio(adjustment_ratio(items, desired_width))
}

/// Badness of breaking at a penalty: the line's badness plus the penalty value.
pub fn badness_for_penalty<'a>(
    items: impl IntoIterator<Item = &'a Item>,
    desired_width: f32,
    penalty: i32,
) -> f32 {
    badness(items, desired_width) + penalty as f32
}
