//! Post-processing of typeset pages.

use crate::LayoutError;
use galley_traits::measure::TextBoxMeasurer;
use galley_types::document::{Document, Page};
use galley_types::item::{DEFAULT_FONT_FAMILY, Glue, Item, TextBox};
use galley_types::list::ItemList;
use galley_types::font::TextDirection;
use galley_types::metadata::{Annotation, ListType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Transforms a finished page, e.g. to add material outside the main text.
pub trait PageProcessor {
    fn process(&self, page: Page) -> Result<Page, LayoutError>;

    fn name(&self) -> &'static str;
}

/// Runs every page of a document through the processors, in order.
pub fn process_document(
    mut document: Document,
    processors: &[&dyn PageProcessor],
) -> Result<Document, LayoutError> {
    for processor in processors {
        log::debug!("Applying page processor {}", processor.name());
        document.pages = document
            .pages
            .into_iter()
            .map(|page| processor.process(page))
            .collect::<Result<_, _>>()?;
    }
    Ok(document)
}

/// Which edge of marginal material sits at its configured x position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarginAlign {
    Left,
    #[default]
    Right,
}

/// Digits used to print line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberStyle {
    #[default]
    Western,
    /// Arabic-Indic digits (U+0660 to U+0669).
    Arabic,
}

impl NumberStyle {
    pub fn format(&self, number: i64) -> String {
        let western = number.to_string();
        match self {
            NumberStyle::Western => western,
            NumberStyle::Arabic => western
                .chars()
                .map(|c| match c.to_digit(10) {
                    Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
                    None => c,
                })
                .collect(),
        }
    }
}

fn default_frequency() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_x_position() -> f32 {
    20.0
}

fn default_glue_width() -> f32 {
    5.0
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

/// 10pt expressed in pixels.
fn default_font_size() -> f32 {
    10.0 * 96.0 / 72.0
}

/// Options of the [`LineNumbers`] processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineNumberConfig {
    /// Show every `frequency`-th line number.
    #[serde(default = "default_frequency")]
    pub frequency: u32,
    /// Always show line 1, whatever the frequency.
    #[serde(default = "default_true")]
    pub show_line_one: bool,
    /// Restart numbering at 1 on every page.
    #[serde(default = "default_true")]
    pub reset_each_page: bool,
    /// Added to every line number before it is shown.
    #[serde(default)]
    pub line_number_shift: i64,
    /// Horizontal position of the numbers, relative to the page.
    #[serde(default = "default_x_position")]
    pub x_position: f32,
    /// With right alignment numbers end at `x_position`; with left alignment they start there.
    #[serde(default)]
    pub align: MarginAlign,
    #[serde(default)]
    pub number_style: NumberStyle,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

impl Default for LineNumberConfig {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            show_line_one: true,
            reset_each_page: true,
            line_number_shift: 0,
            x_position: default_x_position(),
            align: MarginAlign::Right,
            number_style: NumberStyle::Western,
            font_family: default_font_family(),
            font_size: default_font_size(),
        }
    }
}

impl LineNumberConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.frequency == 0 {
            return Err(LayoutError::InvalidConfig(
                "line number frequency must be at least 1".to_string(),
            ));
        }
        if !(self.font_size > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "line number font size must be positive, got {}",
                self.font_size
            )));
        }
        Ok(())
    }

    fn is_shown(&self, number: i64) -> bool {
        (self.show_line_one && number == 1) || number % self.frequency as i64 == 0
    }
}

/// A line of the main text with its vertical offset inside the main text list.
struct LineData {
    number: u32,
    y: f32,
    height: f32,
}

fn collect_line_data(main_text: &ItemList) -> Vec<LineData> {
    let mut y = 0.0;
    let mut lines = Vec::new();
    for item in main_text.items() {
        if let Item::List(list) = item
            && list.metadata.list_type() == Some(ListType::Line)
            && let Some(number) = list.metadata.line_number()
        {
            lines.push(LineData {
                number,
                y,
                height: list.height(),
            });
        }
        y += item.height();
    }
    lines
}

/// Adds line numbers beside the main text of each page.
///
/// Numbers form a vertical list placed at `x_position`, annotated as [`ListType::LineNumbers`].
/// Each number is aligned with the bottom of its line.
#[derive(Debug, Clone)]
pub struct LineNumbers {
    config: LineNumberConfig,
    measurer: Arc<dyn TextBoxMeasurer>,
}

impl LineNumbers {
    pub fn new(
        config: LineNumberConfig,
        measurer: Arc<dyn TextBoxMeasurer>,
    ) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config, measurer })
    }

    fn number_box(&self, number: i64) -> Result<TextBox, LayoutError> {
        let mut text_box = TextBox::new(self.config.number_style.format(number))
            .with_font(self.config.font_family.clone(), self.config.font_size)
            .with_text_direction(TextDirection::Ltr);
        let size = self.measurer.measure(&text_box)?;
        text_box.set_width(size.width);
        text_box.set_height(size.height);
        if self.config.align == MarginAlign::Right {
            text_box.shift_x = -size.width;
        }
        Ok(text_box)
    }
}

impl PageProcessor for LineNumbers {
    fn process(&self, mut page: Page) -> Result<Page, LayoutError> {
        let Some(main_text) = page.main_text() else {
            log::debug!("Page has no main text, line numbers not added");
            return Ok(page);
        };
        let lines = collect_line_data(main_text);
        let Some(first) = lines.first() else {
            return Ok(page);
        };

        let mut shift = self.config.line_number_shift;
        if self.config.reset_each_page {
            shift -= first.number as i64 - 1;
        }

        let mut numbers = ItemList::vertical();
        numbers.shift_x = self.config.x_position;
        numbers.shift_y = main_text.shift_y;
        numbers
            .metadata
            .insert(Annotation::ListType(ListType::LineNumbers));

        let mut cursor = 0.0;
        for line in &lines {
            let shown = line.number as i64 + shift;
            if !self.config.is_shown(shown) {
                continue;
            }
            let gap = line.y - cursor;
            if gap != 0.0 {
                numbers.push(Glue::vertical(gap));
            }
            let mut number_box = self.number_box(shown)?;
            let box_height = number_box.height().unwrap_or(0.0);
            if box_height != line.height {
                number_box.shift_y = line.height - box_height;
            }
            numbers.push(number_box);
            cursor = line.y + box_height;
        }

        if numbers.is_empty() {
            return Ok(page);
        }
        page.push(numbers);
        Ok(page)
    }

    fn name(&self) -> &'static str {
        "LineNumbers"
    }
}

/// Options of the [`Marginalia`] processor.
///
/// ```json
/// { "xPosition": 540, "align": "left", "entries": { "3": ["fol. 2r"], "17": ["a", "b"] } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginaliaConfig {
    /// Horizontal position of the notes, relative to the page.
    #[serde(default = "default_x_position")]
    pub x_position: f32,
    /// With right alignment notes end at `x_position`; with left alignment they start there.
    #[serde(default)]
    pub align: MarginAlign,
    /// Direction given to every text box of a note.
    #[serde(default)]
    pub text_direction: TextDirection,
    /// Space between the sub-entries of one note.
    #[serde(default = "default_glue_width")]
    pub glue_width: f32,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Notes by absolute line number. Each string is one sub-entry.
    #[serde(default)]
    pub entries: BTreeMap<u32, Vec<String>>,
}

impl Default for MarginaliaConfig {
    fn default() -> Self {
        Self {
            x_position: default_x_position(),
            align: MarginAlign::Right,
            text_direction: TextDirection::Ltr,
            glue_width: default_glue_width(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            entries: BTreeMap::new(),
        }
    }
}

impl MarginaliaConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.glue_width >= 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "marginalia glue width must not be negative, got {}",
                self.glue_width
            )));
        }
        if !(self.font_size > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "marginalia font size must be positive, got {}",
                self.font_size
            )));
        }
        Ok(())
    }
}

/// Adds marginal notes beside the lines they belong to.
///
/// Notes are keyed by absolute line number. The notes of a page form a vertical list placed at
/// `x_position`, annotated as [`ListType::Marginalia`]. Each note is a horizontal list of its
/// sub-entries, aligned with the bottom of its line.
#[derive(Debug, Clone)]
pub struct Marginalia {
    config: MarginaliaConfig,
    entries: BTreeMap<u32, Vec<Vec<Item>>>,
    measurer: Arc<dyn TextBoxMeasurer>,
}

impl Marginalia {
    pub fn new(
        config: MarginaliaConfig,
        measurer: Arc<dyn TextBoxMeasurer>,
    ) -> Result<Self, LayoutError> {
        config.validate()?;
        let entries = config
            .entries
            .iter()
            .map(|(&line, texts)| {
                let sub_entries = texts
                    .iter()
                    .map(|text| {
                        let text_box = TextBox::new(text.as_str())
                            .with_font(config.font_family.clone(), config.font_size);
                        vec![Item::TextBox(text_box)]
                    })
                    .collect();
                (line, sub_entries)
            })
            .collect();
        Ok(Self {
            config,
            entries,
            measurer,
        })
    }

    /// Adds sub-entries to the note of a line. Each sub-entry is a run of items.
    pub fn add_entry(&mut self, line_number: u32, sub_entries: Vec<Vec<Item>>) {
        self.entries
            .entry(line_number)
            .or_default()
            .extend(sub_entries);
    }

    pub fn with_entry(mut self, line_number: u32, sub_entries: Vec<Vec<Item>>) -> Self {
        self.add_entry(line_number, sub_entries);
        self
    }

    fn note(&self, sub_entries: &[Vec<Item>]) -> Result<ItemList, LayoutError> {
        let mut note = ItemList::horizontal();
        for (i, sub_entry) in sub_entries.iter().enumerate() {
            if i > 0 {
                note.push(Glue::horizontal(self.config.glue_width, 0.0, 0.0));
            }
            for item in sub_entry {
                let mut item = item.clone();
                if let Item::TextBox(text_box) = &mut item {
                    text_box.set_text_direction(self.config.text_direction);
                    if text_box.width().is_none() || text_box.height().is_none() {
                        let size = self.measurer.measure(text_box)?;
                        text_box.set_width(size.width);
                        text_box.set_height(size.height);
                    }
                }
                note.push(item);
            }
        }
        let height = note.height();
        note.set_height(height);
        if self.config.align == MarginAlign::Right {
            note.shift_x = -note.width();
        }
        Ok(note)
    }
}

impl PageProcessor for Marginalia {
    fn process(&self, mut page: Page) -> Result<Page, LayoutError> {
        if self.entries.is_empty() {
            return Ok(page);
        }
        let Some(main_text) = page.main_text() else {
            log::debug!("Page has no main text, marginalia not added");
            return Ok(page);
        };
        let lines = collect_line_data(main_text);

        let mut notes = ItemList::vertical();
        notes.shift_x = self.config.x_position;
        notes.shift_y = main_text.shift_y;
        notes
            .metadata
            .insert(Annotation::ListType(ListType::Marginalia));

        let mut cursor = 0.0;
        for line in &lines {
            let Some(sub_entries) = self.entries.get(&line.number) else {
                continue;
            };
            if sub_entries.is_empty() {
                continue;
            }
            let gap = line.y - cursor;
            if gap != 0.0 {
                notes.push(Glue::vertical(gap));
            }
            let mut note = self.note(sub_entries)?;
            let note_height = note.height();
            if note_height != line.height {
                note.shift_y = line.height - note_height;
            }
            notes.push(note);
            cursor = line.y + note_height;
        }

        if notes.is_empty() {
            return Ok(page);
        }
        log::debug!("Adding {} marginal notes", notes.lists().count());
        page.push(notes);
        Ok(page)
    }

    fn name(&self) -> &'static str {
        "Marginalia"
    }
}
