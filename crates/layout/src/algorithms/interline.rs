//! Inter-line glue and the deferred fix-up of paragraph-final glue.
//!
//! The glue between two lines depends on the height of the line after it. Inside a paragraph
//! that line is known, but the glue after a paragraph's last line has to wait for the first line
//! of the next paragraph. The horizontal pass emits that glue as pending; [`resolve_pending_glue`]
//! folds over the vertical stream and fills it in once the next line arrives.

use galley_types::geometry::Direction;
use galley_types::item::{Glue, Item};
use galley_types::list::ItemList;
use galley_types::metadata::{Annotation, GlueType, ListType};

/// Spacing parameters for glue between lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterLineSpacing {
    pub line_skip: f32,
    pub min_line_skip: f32,
    pub line_width: f32,
}

impl InterLineSpacing {
    /// Height of the glue placed above a line of height `next_line_height`.
    pub fn glue_height(&self, next_line_height: f32) -> f32 {
        (self.line_skip - next_line_height).max(self.min_line_skip)
    }

    fn base_glue(&self) -> Glue {
        let mut glue = Glue::new(Direction::Vertical);
        glue.set_width(self.line_width);
        glue.metadata.insert(Annotation::GlueType(GlueType::InterLine));
        glue
    }

    /// Glue whose height already accounts for the line after it.
    pub fn glue_before(&self, next_line_height: f32) -> Glue {
        let mut glue = self.base_glue();
        self.settle(&mut glue, next_line_height);
        glue
    }

    /// Zero-height glue waiting for the line after it.
    pub fn pending_glue(&self) -> Glue {
        let mut glue = self.base_glue();
        glue.set_height(0.0);
        glue.metadata.insert(Annotation::InterLineGlueSet(false));
        glue
    }

    fn settle(&self, glue: &mut Glue, next_line_height: f32) {
        glue.set_height(self.glue_height(next_line_height));
        glue.metadata.insert(Annotation::InterLineGlueSet(true));
    }
}

pub fn is_line(list: &ItemList) -> bool {
    list.direction() == Direction::Horizontal
}

/// An item of the vertical stream, typed by the role it plays in the fix-up.
#[derive(Debug, Clone, PartialEq)]
pub enum VerticalEntry {
    Line(ItemList),
    Glue(Glue),
    /// Inter-line glue whose height still depends on the next line.
    PendingGlue(Glue),
    Other(Item),
}

impl VerticalEntry {
    pub fn classify(item: Item) -> Self {
        match item {
            Item::List(list) if is_line(&list) => VerticalEntry::Line(list),
            Item::Glue(glue) if glue.metadata.inter_line_glue_set() == Some(false) => {
                VerticalEntry::PendingGlue(glue)
            }
            Item::Glue(glue) => VerticalEntry::Glue(glue),
            other => VerticalEntry::Other(other),
        }
    }

    pub fn into_item(self) -> Item {
        match self {
            VerticalEntry::Line(list) => Item::List(list),
            VerticalEntry::Glue(glue) | VerticalEntry::PendingGlue(glue) => Item::Glue(glue),
            VerticalEntry::Other(item) => item,
        }
    }
}

enum FixupState {
    Normal,
    Pending { glue: Glue, buffer: Vec<Item> },
}

/// Settles every pending glue against the next line in the stream.
///
/// Items between a pending glue and the next line (vertical glue between paragraphs, for
/// instance) keep their place after the settled glue. A pending glue with no line after it is
/// dropped; a second pending glue before any line replaces the first.
pub fn resolve_pending_glue(
    entries: impl IntoIterator<Item = VerticalEntry>,
    spacing: &InterLineSpacing,
) -> Vec<Item> {
    let mut out = Vec::new();
    let mut state = FixupState::Normal;

    for entry in entries {
        state = match (state, entry) {
            (FixupState::Normal, VerticalEntry::PendingGlue(glue)) => FixupState::Pending {
                glue,
                buffer: Vec::new(),
            },
            (FixupState::Normal, entry) => {
                out.push(entry.into_item());
                FixupState::Normal
            }
            (FixupState::Pending { mut glue, buffer }, VerticalEntry::Line(line)) => {
                spacing.settle(&mut glue, line.height());
                log::debug!(
                    "Settled pending inter-line glue at {:.2} after {} buffered items",
                    glue.height(),
                    buffer.len()
                );
                out.push(Item::Glue(glue));
                out.extend(buffer);
                out.push(Item::List(line));
                FixupState::Normal
            }
            (FixupState::Pending { buffer, .. }, VerticalEntry::PendingGlue(next)) => {
                log::debug!("Pending inter-line glue superseded before any line");
                FixupState::Pending { glue: next, buffer }
            }
            (FixupState::Pending { glue, mut buffer }, entry) => {
                buffer.push(entry.into_item());
                FixupState::Pending { glue, buffer }
            }
        };
    }

    if let FixupState::Pending { buffer, .. } = state {
        log::debug!("Dropping trailing inter-line glue");
        out.extend(buffer);
    }
    out
}

/// Assigns consecutive absolute line numbers, starting at `first`, to every line list in
/// `items` (including lines nested in vertical lists). Returns the next unused number.
pub fn number_lines(items: &mut [Item], first: u32) -> u32 {
    let mut next = first;
    for item in items.iter_mut() {
        if let Item::List(list) = item {
            if list.metadata.list_type() == Some(ListType::Line) {
                list.metadata.insert(Annotation::LineNumber(next));
                next += 1;
            } else if list.direction() == Direction::Vertical {
                next = number_lines(list.items_mut(), next);
            }
        }
    }
    next
}

/// Whether an item is glue inserted between lines.
pub fn is_inter_line_glue(item: &Item) -> bool {
    item.as_glue()
        .is_some_and(|g| g.metadata.glue_type() == Some(GlueType::InterLine))
}

#[cfg(test)]
mod tests {
    use super::*;
    use galley_types::item::BoxItem;

    fn spacing() -> InterLineSpacing {
        InterLineSpacing {
            line_skip: 24.0,
            min_line_skip: 2.0,
            line_width: 100.0,
        }
    }

    fn line(height: f32) -> ItemList {
        let mut list = ItemList::horizontal();
        list.push(BoxItem::new(10.0, height));
        list.metadata.insert(Annotation::ListType(ListType::Line));
        list
    }

    #[test]
    fn glue_height_respects_minimum() {
        let s = spacing();
        assert_eq!(s.glue_height(20.0), 4.0);
        assert_eq!(s.glue_height(23.0), 2.0);
        assert_eq!(s.glue_height(40.0), 2.0);
    }

    #[test]
    fn pending_glue_is_settled_by_next_line_after_buffered_items() {
        let s = spacing();
        let entries = vec![
            VerticalEntry::Line(line(20.0)),
            VerticalEntry::PendingGlue(s.pending_glue()),
            VerticalEntry::Glue(Glue::vertical(10.0)),
            VerticalEntry::Line(line(12.0)),
        ];
        let out = resolve_pending_glue(entries, &s);

        assert_eq!(out.len(), 4);
        let settled = out[1].as_glue().unwrap();
        assert_eq!(settled.height(), 12.0);
        assert_eq!(settled.metadata.inter_line_glue_set(), Some(true));
        assert_eq!(out[2].as_glue().unwrap().height(), 10.0);
        assert!(out[3].as_list().is_some());
    }

    #[test]
    fn trailing_pending_glue_is_dropped_but_buffer_kept() {
        let s = spacing();
        let entries = vec![
            VerticalEntry::Line(line(20.0)),
            VerticalEntry::PendingGlue(s.pending_glue()),
            VerticalEntry::Glue(Glue::vertical(10.0)),
        ];
        let out = resolve_pending_glue(entries, &s);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].as_glue().unwrap().height(), 10.0);
        assert!(out.iter().all(|i| !is_inter_line_glue(i)));
    }

    #[test]
    fn classify_recognizes_pending_glue() {
        let s = spacing();
        assert!(matches!(
            VerticalEntry::classify(s.pending_glue().into()),
            VerticalEntry::PendingGlue(_)
        ));
        assert!(matches!(
            VerticalEntry::classify(s.glue_before(20.0).into()),
            VerticalEntry::Glue(_)
        ));
        assert!(matches!(
            VerticalEntry::classify(ItemList::vertical().into()),
            VerticalEntry::Other(_)
        ));
    }

    #[test]
    fn lines_are_numbered_in_document_order() {
        let mut nested = ItemList::vertical();
        nested.push(line(10.0));
        let mut items: Vec<Item> = vec![
            line(10.0).into(),
            Glue::vertical(4.0).into(),
            nested.into(),
            line(10.0).into(),
        ];
        assert_eq!(number_lines(&mut items, 1), 4);

        let numbers: Vec<u32> = vec![
            items[0].metadata().line_number().unwrap(),
            items[2].as_list().unwrap().items()[0].metadata().line_number().unwrap(),
            items[3].metadata().line_number().unwrap(),
        ];
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
