//! Builds paragraphs of text boxes and glue from plain text.

use galley_types::font::{FontStyle, FontWeight};
use galley_types::item::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, Glue, Penalty, TextBox};
use galley_types::list::ItemList;
use galley_types::metadata::{Annotation, GlueType};

/// Stretch of the glue that fills the last line of a paragraph.
pub const PARAGRAPH_FILL_STRETCH: f32 = 100_000.0;

/// Turns words into a horizontal list ready for line breaking.
///
/// Words become text boxes in a single font, separated by inter-word glue. The paragraph ends
/// with a fill glue, so the last line is set at its natural width, and a forced break.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphBuilder {
    pub font_family: String,
    pub font_size: f32,
    pub font_style: FontStyle,
    pub font_weight: FontWeight,
    /// Inter-word space as a fraction of the font size.
    pub word_space: f32,
    /// Stretch of the inter-word space as a fraction of its width.
    pub word_stretch: f32,
    /// Shrink of the inter-word space as a fraction of its width.
    pub word_shrink: f32,
}

impl Default for ParagraphBuilder {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_style: FontStyle::Normal,
            font_weight: FontWeight::Regular,
            word_space: 0.25,
            word_stretch: 0.5,
            word_shrink: 1.0 / 3.0,
        }
    }
}

impl ParagraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    pub fn with_word_space(mut self, space: f32, stretch: f32, shrink: f32) -> Self {
        self.word_space = space;
        self.word_stretch = stretch;
        self.word_shrink = shrink;
        self
    }

    pub fn word(&self, text: &str) -> TextBox {
        TextBox::new(text)
            .with_font(self.font_family.clone(), self.font_size)
            .with_style(self.font_style)
            .with_weight(self.font_weight)
    }

    pub fn space(&self) -> Glue {
        let width = self.font_size * self.word_space;
        Glue::horizontal(width, width * self.word_stretch, width * self.word_shrink)
    }

    /// Builds a paragraph from whitespace-separated words. Empty text gives an empty list.
    pub fn build(&self, text: &str) -> ItemList {
        let mut paragraph = ItemList::horizontal();
        for (i, word) in text.split_whitespace().enumerate() {
            if i > 0 {
                paragraph.push(self.space());
            }
            paragraph.push(self.word(word));
        }
        if !paragraph.is_empty() {
            paragraph.push(Glue::horizontal(0.0, PARAGRAPH_FILL_STRETCH, 0.0));
            paragraph.push(Penalty::forced_break());
        }
        paragraph
    }
}

/// Builds a main-text vertical list from text with paragraphs separated by blank lines.
///
/// When `paragraph_skip` is positive, a vertical glue of that height goes between paragraphs.
pub fn main_text_from_str(text: &str, builder: &ParagraphBuilder, paragraph_skip: f32) -> ItemList {
    let mut main_text = ItemList::vertical();
    let paragraphs = split_paragraphs(text);
    for (i, paragraph) in paragraphs.iter().enumerate() {
        if i > 0 && paragraph_skip > 0.0 {
            let mut skip = Glue::vertical(paragraph_skip);
            skip.metadata
                .insert(Annotation::GlueType(GlueType::InterParagraph));
            main_text.push(skip);
        }
        main_text.push(builder.build(paragraph));
    }
    main_text
}

fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }
    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;
    use galley_types::item::Item;

    #[test]
    fn paragraph_alternates_words_and_glue_and_ends_with_forced_break() {
        let paragraph = ParagraphBuilder::new().with_font("Serif", 12.0).build("one  two\tthree");
        let kinds: Vec<&str> = paragraph.items().iter().map(Item::kind).collect();
        assert_eq!(
            kinds,
            vec!["TextBox", "Glue", "TextBox", "Glue", "TextBox", "Glue", "Penalty"]
        );
        assert_eq!(paragraph.text(), "one two three");

        let space = paragraph.items()[1].as_glue().unwrap();
        assert_eq!(space.width(), 3.0);
        assert_eq!(space.stretch(), 1.5);
        assert!((space.shrink() - 1.0).abs() < 1e-5);
        assert!(matches!(paragraph.items().last(), Some(Item::Penalty(p)) if p.is_forced_break()));
    }

    #[test]
    fn empty_text_builds_empty_paragraph() {
        assert!(ParagraphBuilder::new().build("  \n ").is_empty());
    }

    #[test]
    fn blank_lines_separate_paragraphs() {
        let text = "First line\ncontinues here.\n\n\nSecond paragraph.\n";
        let main = main_text_from_str(text, &ParagraphBuilder::new(), 6.0);

        assert_eq!(main.len(), 3);
        assert_eq!(main.items()[0].as_list().unwrap().text(), "First line continues here.");
        let skip = main.items()[1].as_glue().unwrap();
        assert_eq!(skip.height(), 6.0);
        assert_eq!(skip.metadata.glue_type(), Some(GlueType::InterParagraph));
        assert_eq!(main.items()[2].as_list().unwrap().text(), "Second paragraph.");
    }
}
