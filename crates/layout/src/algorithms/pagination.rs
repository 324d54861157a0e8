use galley_types::geometry::Direction;
use galley_types::item::Item;
use galley_types::list::ItemList;

#[derive(Default)]
struct PageBuffer {
    items: Vec<Item>,
    has_line: bool,
    used: f32,
}

impl PageBuffer {
    fn finish(self) -> Option<ItemList> {
        if !self.has_line {
            return None;
        }
        let mut list = ItemList::with_items(Direction::Vertical, self.items);
        list.trim_end_glue();
        Some(list)
    }
}

/// Splits a resolved vertical stream of lines and glue into page-sized vertical lists.
///
/// A line that would take the running height past `area_height` starts a new page, so a page
/// only exceeds `area_height` when a single line is taller than the whole area. Trailing glue is trimmed from every page and
/// pages without any line are not produced. Items other than glue and horizontal lists are
/// skipped with a warning.
pub fn paginate(items: Vec<Item>, area_height: f32) -> Vec<ItemList> {
    let mut pages = Vec::new();
    let mut buffer = PageBuffer::default();

    for (index, item) in items.into_iter().enumerate() {
        match item {
            Item::Glue(glue) => {
                buffer.used += glue.height();
                buffer.items.push(Item::Glue(glue));
            }
            Item::List(line) if line.direction() == Direction::Horizontal => {
                let height = line.height();
                let overflows = buffer.used + height > area_height;
                if overflows && buffer.has_line {
                    log::debug!(
                        "Page {} full ({:.2} used, line needs {:.2})",
                        pages.len() + 1,
                        buffer.used,
                        height
                    );
                    if let Some(page) = std::mem::take(&mut buffer).finish() {
                        pages.push(page);
                    }
                    buffer.used = height;
                } else {
                    if overflows {
                        log::warn!(
                            "Line {} of height {:.2} does not fit in a text area of {:.2}",
                            index,
                            height,
                            area_height
                        );
                    }
                    buffer.used += height;
                }
                buffer.items.push(Item::List(line));
                buffer.has_line = true;
            }
            other => {
                log::warn!(
                    "Ignoring {} ({}) at index {} while paginating",
                    other.kind(),
                    other.direction(),
                    index
                );
            }
        }
    }

    if let Some(page) = buffer.finish() {
        pages.push(page);
    }
    pages
}
