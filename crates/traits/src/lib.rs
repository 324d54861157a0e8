pub mod measure;
pub mod render;

pub use measure::{CachingMeasurer, FixedAdvanceMeasurer, MeasureError, TextBoxMeasurer};
pub use render::{DocumentRenderer, RenderError};
