//! Rendering abstractions for typeset documents.
//!
//! A renderer walks a [`Document`] page by page. Positions are resolved with [`positioned_items`]:
//! lists advance their cursor by each child's width (horizontal) or height (vertical), and
//! `shift_x`/`shift_y` offset an item without moving the cursor.

use galley_types::document::{Document, Page};
use galley_types::geometry::Direction;
use galley_types::item::Item;
use galley_types::list::ItemList;
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Renderer used before begin_document")]
    NotStarted,
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}

/// A leaf item with its absolute position on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedItem<'a> {
    pub x: f32,
    pub y: f32,
    pub item: &'a Item,
    /// Nesting depth below the page (0 for children of a page-level list).
    pub depth: usize,
}

/// Resolves the absolute position of every non-list item on a page, in document order.
pub fn positioned_items(page: &Page) -> Vec<PositionedItem<'_>> {
    let mut out = Vec::new();
    for list in &page.items {
        collect_list(list, 0.0, 0.0, 0, &mut out);
    }
    out
}

fn collect_list<'a>(
    list: &'a ItemList,
    x: f32,
    y: f32,
    depth: usize,
    out: &mut Vec<PositionedItem<'a>>,
) {
    let origin_x = x + list.shift_x;
    let origin_y = y + list.shift_y;
    let (mut cursor_x, mut cursor_y) = (origin_x, origin_y);

    for item in list.items() {
        match item {
            Item::List(child) => collect_list(child, cursor_x, cursor_y, depth + 1, out),
            other => out.push(PositionedItem {
                x: cursor_x + other.shift_x(),
                y: cursor_y + other.shift_y(),
                item: other,
                depth,
            }),
        }
        match list.direction() {
            Direction::Vertical => cursor_y += item.height(),
            _ => cursor_x += item.width(),
        }
    }
}

/// A trait for document renderers writing to a byte sink.
pub trait DocumentRenderer<W: Write> {
    fn begin_document(&mut self, writer: W, document: &Document) -> Result<(), RenderError>;

    fn render_page(&mut self, page: &Page, page_index: usize) -> Result<(), RenderError>;

    fn finish(self: Box<Self>) -> Result<W, RenderError>;

    /// Renders every page of `document` in order and returns the writer.
    fn render(mut self: Box<Self>, writer: W, document: &Document) -> Result<W, RenderError> {
        self.begin_document(writer, document)?;
        for (index, page) in document.pages.iter().enumerate() {
            log::debug!("Rendering page {} of {}", index + 1, document.pages.len());
            self.render_page(page, index)?;
        }
        self.finish()
    }
}
