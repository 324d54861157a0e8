// src/pipeline/config.rs
use crate::error::PipelineError;
use galley_layout::{LineNumberConfig, MarginaliaConfig, ParagraphBuilder, TypesetterConfig};
use galley_types::item::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

/// How plain text is turned into paragraphs before typesetting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextConfig {
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Vertical glue inserted between paragraphs. Zero inserts nothing.
    #[serde(default)]
    pub paragraph_skip: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            paragraph_skip: 0.0,
        }
    }
}

impl TextConfig {
    pub fn paragraph_builder(&self) -> ParagraphBuilder {
        ParagraphBuilder::new().with_font(self.font_family.clone(), self.font_size)
    }
}

/// Everything a pipeline needs, as loaded from a JSON configuration file.
///
/// ```json
/// {
///   "typesetter": { "pageWidth": 595, "pageHeight": 842, "lineSkip": 20 },
///   "text": { "fontSize": 12, "paragraphSkip": 12 },
///   "lineNumbers": { "frequency": 5 },
///   "marginalia": { "xPosition": 560, "align": "left", "entries": { "4": ["note"] } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    pub typesetter: TypesetterConfig,
    #[serde(default)]
    pub text: TextConfig,
    /// Line numbering is off unless this section is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_numbers: Option<LineNumberConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marginalia: Option<MarginaliaConfig>,
}

impl PipelineConfig {
    pub fn new(typesetter: TypesetterConfig) -> Self {
        Self {
            typesetter,
            text: TextConfig::default(),
            line_numbers: None,
            marginalia: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read configuration from '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&source)
    }
}
