//! The production typesetter: greedy best-fit line breaking, justification and pagination.

use crate::LayoutError;
use crate::algorithms::adjustment::LineMetrics;
use crate::algorithms::interline::{
    InterLineSpacing, VerticalEntry, number_lines, resolve_pending_glue,
};
use crate::algorithms::linebreak::{find_breakpoints, split_lines};
use crate::algorithms::pagination::paginate;
use crate::config::TypesetterConfig;
use crate::typesetter::Typesetter;
use galley_traits::measure::TextBoxMeasurer;
use galley_types::document::{Document, Page};
use galley_types::geometry::{Direction, to_fixed_precision};
use galley_types::item::Item;
use galley_types::list::ItemList;
use galley_types::metadata::{Annotation, ListType};
use std::sync::Arc;

pub const SIGNATURE: &str = "BasicTypesetter 0.1";

/// Greedy best-fit typesetter.
///
/// Text boxes are measured with the injected measurer before each paragraph is broken, one at a
/// time and in item order.
#[derive(Debug, Clone)]
pub struct BasicTypesetter {
    config: TypesetterConfig,
    measurer: Arc<dyn TextBoxMeasurer>,
}

impl BasicTypesetter {
    pub fn new(
        config: TypesetterConfig,
        measurer: Arc<dyn TextBoxMeasurer>,
    ) -> Result<Self, LayoutError> {
        config.validate()?;
        log::debug!(
            "BasicTypesetter: line width {:.2}, text area height {:.2}, measurer {}",
            config.line_width(),
            config.text_area_height(),
            measurer.name()
        );
        Ok(Self { config, measurer })
    }

    pub fn config(&self) -> &TypesetterConfig {
        &self.config
    }

    pub fn line_width(&self) -> f32 {
        self.config.line_width()
    }

    fn spacing(&self) -> InterLineSpacing {
        InterLineSpacing {
            line_skip: self.config.line_skip,
            min_line_skip: self.config.min_line_skip,
            line_width: self.config.line_width(),
        }
    }

    /// Measures every unmeasured text box of a paragraph.
    fn measure(&self, items: &mut [Item]) -> Result<(), LayoutError> {
        for (index, item) in items.iter_mut().enumerate() {
            match item {
                Item::TextBox(text_box) => {
                    if text_box.width().is_none() {
                        let width = self.measurer.measure_width(text_box)?;
                        text_box.set_width(width);
                    }
                    if text_box.height().is_none() {
                        let height = self.measurer.measure_height(text_box)?;
                        text_box.set_height(height);
                    }
                }
                Item::List(_) => {
                    return Err(LayoutError::UnsupportedItem {
                        kind: "ItemList",
                        index,
                        context: "paragraph",
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Stretches or shrinks the glue of a line to fill the line width and records the line's
    /// metrics.
    fn justify(&self, line: &mut ItemList, number_in_paragraph: u32) {
        let line_width = self.config.line_width();
        let metrics = LineMetrics::of(line.items());
        let ratio = metrics.adjustment_ratio(line_width);

        if self.config.justify {
            match ratio {
                Some(r) if r >= -1.0 => {
                    for item in line.items_mut() {
                        if let Item::Glue(glue) = item {
                            let delta = if r >= 0.0 {
                                r * glue.stretch()
                            } else {
                                r * glue.shrink()
                            };
                            let width = glue.width() + delta;
                            glue.set_width(width);
                        }
                    }
                }
                Some(r) => log::warn!(
                    "Line {} overflows: needs ratio {:.3}, glue can only shrink to -1",
                    number_in_paragraph,
                    r
                ),
                None => log::warn!(
                    "Line {} cannot be justified: natural width {:.2}, line width {:.2}",
                    number_in_paragraph,
                    metrics.natural_width,
                    line_width
                ),
            }
        }

        let unadjusted = metrics.natural_width;
        let line_ratio = if unadjusted > 0.0 {
            line.width() / unadjusted
        } else {
            1.0
        };
        line.metadata.insert(Annotation::ListType(ListType::Line));
        line.metadata
            .insert(Annotation::LineNumberInParagraph(number_in_paragraph));
        line.metadata.insert(Annotation::AdjustmentRatio(ratio));
        line.metadata.insert(Annotation::UnadjustedLineWidth(to_fixed_precision(
            unadjusted, 3,
        )));
        line.metadata
            .insert(Annotation::LineRatio(to_fixed_precision(line_ratio, 3)));
    }

    /// Freezes the line height and moves shorter text boxes down onto the common baseline.
    fn align_baselines(line: &mut ItemList) {
        let line_height = line.height();
        line.set_height(line_height);
        for item in line.items_mut() {
            if let Item::TextBox(text_box) = item {
                let h = text_box.height().unwrap_or(0.0);
                if h < line_height {
                    text_box.shift_y += line_height - h;
                }
            }
        }
    }

    /// Settles pending inter-line glue and assigns absolute line numbers.
    fn resolve_stream(&self, entries: Vec<VerticalEntry>) -> Vec<Item> {
        let mut items = resolve_pending_glue(entries, &self.spacing());
        let next = number_lines(&mut items, 1);
        log::debug!("Vertical stream resolved: {} items, {} lines", items.len(), next - 1);
        items
    }

    fn page_from(&self, mut main_text: ItemList) -> Page {
        main_text.metadata.insert(Annotation::ListType(ListType::MainText));
        main_text.shift_x = self.config.margin_left;
        main_text.shift_y = self.config.margin_top;
        let mut page = Page::new(self.config.page_width, self.config.page_height);
        page.push(main_text);
        page
    }
}

impl Typesetter for BasicTypesetter {
    fn typeset_horizontal_list(&self, list: ItemList) -> Result<ItemList, LayoutError> {
        if list.direction() != Direction::Horizontal {
            return Err(LayoutError::InvalidDirection {
                expected: Direction::Horizontal,
                found: list.direction(),
            });
        }
        let mut items = list.into_items();
        self.measure(&mut items)?;

        let breakpoints = find_breakpoints(&items, self.config.line_width());
        log::debug!("Break points: {:?}", breakpoints);

        let lines: Vec<ItemList> = split_lines(items, &breakpoints)
            .into_iter()
            .enumerate()
            .map(|(i, line_items)| {
                let mut line = ItemList::with_items(Direction::Horizontal, line_items);
                self.justify(&mut line, i as u32 + 1);
                Self::align_baselines(&mut line);
                line
            })
            .collect();

        let spacing = self.spacing();
        let mut output = ItemList::vertical();
        let mut lines = lines.into_iter().peekable();
        while let Some(line) = lines.next() {
            let glue = match lines.peek() {
                Some(next) => spacing.glue_before(next.height()),
                None => spacing.pending_glue(),
            };
            output.push(line);
            output.push(glue);
        }
        Ok(output)
    }

    fn typeset_vertical_list(&self, list: ItemList) -> Result<Vec<ItemList>, LayoutError> {
        if list.direction() != Direction::Vertical {
            return Err(LayoutError::InvalidDirection {
                expected: Direction::Vertical,
                found: list.direction(),
            });
        }
        let entries: Vec<VerticalEntry> =
            list.into_items().into_iter().map(VerticalEntry::classify).collect();
        let items = resolve_pending_glue(entries, &self.spacing());
        Ok(paginate(items, self.config.text_area_height()))
    }

    fn typeset(&self, main_text: ItemList) -> Result<Document, LayoutError> {
        if main_text.direction() != Direction::Vertical {
            return Err(LayoutError::InvalidDirection {
                expected: Direction::Vertical,
                found: main_text.direction(),
            });
        }

        let mut entries = Vec::new();
        let mut paragraph_number = 0;
        for (index, item) in main_text.into_items().into_iter().enumerate() {
            match item {
                Item::Glue(glue) if glue.direction() == Direction::Vertical => {
                    entries.push(VerticalEntry::Glue(glue));
                }
                Item::List(paragraph) if paragraph.direction() == Direction::Horizontal => {
                    paragraph_number += 1;
                    let lines = self.typeset_horizontal_list(paragraph)?;
                    for mut entry in lines.into_items().into_iter().map(VerticalEntry::classify) {
                        if let VerticalEntry::Line(line) = &mut entry {
                            line.metadata
                                .insert(Annotation::ParagraphNumber(paragraph_number));
                        }
                        entries.push(entry);
                    }
                }
                other => log::warn!(
                    "Ignoring {} ({}) at index {} of the main text",
                    other.kind(),
                    other.direction(),
                    index
                ),
            }
        }
        log::debug!("Typeset {} paragraphs", paragraph_number);

        let items = self.resolve_stream(entries);
        let pages: Vec<Page> = paginate(items, self.config.text_area_height())
            .into_iter()
            .map(|main| self.page_from(main))
            .collect();
        log::debug!("Paginated into {} pages", pages.len());

        let mut document = Document::from_pages(pages);
        document.annotate(Annotation::Typesetter(self.signature().to_string()));
        Ok(document)
    }

    fn signature(&self) -> &str {
        SIGNATURE
    }
}
