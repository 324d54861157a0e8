// src/render/outline.rs
//! A plain text renderer for inspecting layouts without a graphics backend.
//!
//! Each page is written as rows of text. Items whose bottom edges coincide share a row, which
//! puts every word of a line on one row together with its line number, if any.

use galley_traits::render::{DocumentRenderer, RenderError, positioned_items};
use galley_types::document::{Document, Page};
use galley_types::item::Item;
use std::collections::BTreeMap;
use std::io::Write;

/// Row keys are bottom edges in hundredths of a unit.
fn row_key(bottom: f32) -> i64 {
    (bottom * 100.0).round() as i64
}

/// Writes the text of every page as positioned rows.
///
/// ```text
/// Document 200x220, 2 pages, BasicTypesetter 0.1
/// Page 1 (200x220)
///    70.00    30.00 | 1 The quick brown
/// ```
///
/// The first column is the bottom edge of the row, the second the left edge of its first item.
pub struct OutlineRenderer<W: Write> {
    writer: Option<W>,
}

impl<W: Write> Default for OutlineRenderer<W> {
    fn default() -> Self {
        Self { writer: None }
    }
}

impl<W: Write> OutlineRenderer<W> {
    pub fn new() -> Self {
        Self::default()
    }

    fn writer(&mut self) -> Result<&mut W, RenderError> {
        self.writer.as_mut().ok_or(RenderError::NotStarted)
    }
}

impl<W: Write> DocumentRenderer<W> for OutlineRenderer<W> {
    fn begin_document(&mut self, mut writer: W, document: &Document) -> Result<(), RenderError> {
        write!(
            writer,
            "Document {}x{}, {} pages",
            document.width,
            document.height,
            document.page_count()
        )?;
        if let Some(name) = document.metadata.typesetter() {
            write!(writer, ", {}", name)?;
        }
        writeln!(writer)?;
        self.writer = Some(writer);
        Ok(())
    }

    fn render_page(&mut self, page: &Page, page_index: usize) -> Result<(), RenderError> {
        let mut rows: BTreeMap<i64, Vec<(f32, &str)>> = BTreeMap::new();
        for placed in positioned_items(page) {
            if let Item::TextBox(text_box) = placed.item {
                rows.entry(row_key(placed.y + placed.item.height()))
                    .or_default()
                    .push((placed.x, text_box.text()));
            }
        }

        let writer = self.writer()?;
        writeln!(
            writer,
            "Page {} ({}x{})",
            page_index + 1,
            page.width,
            page.height
        )?;
        for (key, mut words) in rows {
            words.sort_by(|a, b| a.0.total_cmp(&b.0));
            let text: Vec<&str> = words.iter().map(|(_, t)| *t).collect();
            writeln!(
                writer,
                "{:>9.2}{:>9.2} | {}",
                key as f32 / 100.0,
                words[0].0,
                text.join(" ")
            )?;
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<W, RenderError> {
        let mut writer = self.writer.ok_or(RenderError::NotStarted)?;
        writer.flush()?;
        Ok(writer)
    }
}
