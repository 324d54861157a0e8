pub mod fixtures;

use galley::{DocumentPipeline, PipelineBuilder, PipelineError, TypesetterConfig};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A pipeline with default margins, the fixed-advance measurer and no line numbers.
pub fn pipeline(page_width: f32, page_height: f32) -> Result<DocumentPipeline, PipelineError> {
    PipelineBuilder::new()
        .with_typesetter_config(TypesetterConfig::new(page_width, page_height))
        .build()
}

/// Renders a document as outline text.
pub fn outline(
    pipeline: &DocumentPipeline,
    document: &galley::Document,
) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = pipeline.render_outline(document, Vec::new())?;
    Ok(String::from_utf8(bytes)?)
}
