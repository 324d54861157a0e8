// src/error.rs
use galley_layout::LayoutError;
use galley_traits::measure::MeasureError;
use galley_traits::render::RenderError;
use galley_types::export::ExportError;
use thiserror::Error;

/// Errors raised anywhere between reading input and writing the typeset document.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Import or export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Measurement failed: {0}")]
    Measure(#[from] MeasureError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pipeline configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::Export(ExportError::Json(e))
    }
}
