pub mod document;
pub mod export;
pub mod font;
pub mod geometry;
pub mod item;
pub mod list;
pub mod metadata;

pub use document::{Document, Page};
pub use export::{ExportError, ExportObject};
pub use font::{FontStyle, FontWeight, TextDirection};
pub use geometry::{Direction, Size};
pub use item::{BoxItem, Glue, INFINITE_PENALTY, Item, MINUS_INFINITE_PENALTY, Penalty, TextBox};
pub use list::ItemList;
pub use metadata::{Annotation, AnnotationKey, GlueType, ListType, Metadata};
