//! galley: a greedy box/glue/penalty typesetter.
//!
//! Paragraphs are horizontal lists of boxes, glue and penalties. The [`BasicTypesetter`] breaks
//! them into justified lines, joins the lines with inter-line glue and fills pages of fixed
//! height. [`PipelineBuilder`] wires a typesetter, a text measurer and page processors together:
//!
//! ```no_run
//! use galley::{PipelineBuilder, TypesetterConfig};
//!
//! let pipeline = PipelineBuilder::new()
//!     .with_typesetter_config(TypesetterConfig::new(595.0, 842.0))
//!     .build()?;
//! let document = pipeline.typeset_text("Hello world.\n\nA second paragraph.")?;
//! println!("{}", document.to_json()?);
//! # Ok::<(), galley::PipelineError>(())
//! ```

pub mod error;
pub mod pipeline;
pub mod render;

pub use error::PipelineError;
pub use pipeline::{DocumentPipeline, PipelineBuilder, PipelineConfig, TextConfig};
pub use render::OutlineRenderer;

pub use galley_layout::{
    BasicTypesetter, LayoutError, LineNumberConfig, LineNumbers, MarginAlign, Marginalia,
    MarginaliaConfig, PageProcessor, ParagraphBuilder, Typesetter, TypesetterConfig,
};
pub use galley_traits::{
    CachingMeasurer, DocumentRenderer, FixedAdvanceMeasurer, MeasureError, RenderError,
    TextBoxMeasurer,
};
pub use galley_types::{
    BoxItem, Direction, Document, ExportError, ExportObject, Glue, Item, ItemList, Page, Penalty,
    TextBox,
};
