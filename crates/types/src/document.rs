use crate::list::ItemList;
use crate::metadata::{Annotation, ListType, Metadata};
use serde::{Deserialize, Serialize};

/// A finished page: positioned item lists on a sheet of fixed size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub width: f32,
    pub height: f32,
    #[serde(default, with = "crate::export::tagged_lists")]
    pub items: Vec<ItemList>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            items: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    pub fn push(&mut self, list: ItemList) {
        self.items.push(list);
    }

    /// The list annotated as the main text of the page, if any.
    pub fn main_text(&self) -> Option<&ItemList> {
        self.items
            .iter()
            .find(|l| l.metadata.list_type() == Some(ListType::MainText))
    }

    /// The lines of the main text, in order.
    pub fn lines(&self) -> impl Iterator<Item = &ItemList> {
        self.main_text()
            .into_iter()
            .flat_map(|main| main.lists())
            .filter(|l| l.metadata.list_type() == Some(ListType::Line))
    }
}

/// A typeset document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub width: f32,
    pub height: f32,
    #[serde(default, with = "crate::export::tagged_pages")]
    pub pages: Vec<Page>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl Document {
    /// Builds a document whose size is taken from the first page.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        let mut document = Self {
            pages,
            ..Self::default()
        };
        document.set_dimensions_from_pages();
        document
    }

    /// Copies the size of the first page, or 0x0 when there are no pages.
    pub fn set_dimensions_from_pages(&mut self) {
        let (width, height) = self
            .pages
            .first()
            .map(|p| (p.width, p.height))
            .unwrap_or((0.0, 0.0));
        self.width = width;
        self.height = height;
    }

    pub fn annotate(&mut self, annotation: Annotation) {
        self.metadata.insert(annotation);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines().count()).sum()
    }
}
