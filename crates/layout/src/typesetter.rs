use crate::LayoutError;
use galley_types::document::Document;
use galley_types::list::ItemList;

/// Turns item lists into typeset output.
///
/// The three stages can be driven separately: a paragraph (horizontal list) becomes a vertical
/// list of lines, a vertical list becomes a sequence of pages, and `typeset` runs the whole
/// pipeline from main text to [`Document`].
pub trait Typesetter {
    /// Breaks a horizontal list into lines, returning a vertical list of lines and inter-line glue.
    fn typeset_horizontal_list(&self, list: ItemList) -> Result<ItemList, LayoutError>;

    /// Splits a vertical list of lines and glue into page-sized vertical lists.
    fn typeset_vertical_list(&self, list: ItemList) -> Result<Vec<ItemList>, LayoutError>;

    /// Typesets a vertical list of paragraphs and vertical glue into a document.
    fn typeset(&self, main_text: ItemList) -> Result<Document, LayoutError>;

    /// Signature recorded in the metadata of produced documents.
    fn signature(&self) -> &str;
}
