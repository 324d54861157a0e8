// src/pipeline/builder.rs
use super::DocumentPipeline;
use super::config::{PipelineConfig, TextConfig};
use crate::error::PipelineError;
use galley_layout::{
    BasicTypesetter, LineNumberConfig, LineNumbers, Marginalia, MarginaliaConfig, TypesetterConfig,
};
use galley_traits::measure::{CachingMeasurer, FixedAdvanceMeasurer, TextBoxMeasurer};
use std::path::Path;
use std::sync::Arc;

/// A builder for creating a [`DocumentPipeline`].
pub struct PipelineBuilder {
    typesetter_config: Option<TypesetterConfig>,
    text: TextConfig,
    line_numbers: Option<LineNumberConfig>,
    marginalia: Option<MarginaliaConfig>,
    measurer: Arc<dyn TextBoxMeasurer>,
    cache_measurements: bool,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            typesetter_config: None,
            text: TextConfig::default(),
            line_numbers: None,
            marginalia: None,
            measurer: Arc::new(FixedAdvanceMeasurer::default()),
            cache_measurements: true,
        }
    }
}

impl PipelineBuilder {
    /// Creates a builder measuring text with a [`FixedAdvanceMeasurer`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Takes page geometry, text settings and page processors from a loaded configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.typesetter_config = Some(config.typesetter);
        self.text = config.text;
        self.line_numbers = config.line_numbers;
        self.marginalia = config.marginalia;
        self
    }

    /// Loads the configuration from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(self, path: P) -> Result<Self, PipelineError> {
        Ok(self.with_config(PipelineConfig::from_file(path)?))
    }

    pub fn with_typesetter_config(mut self, config: TypesetterConfig) -> Self {
        self.typesetter_config = Some(config);
        self
    }

    pub fn with_text_config(mut self, text: TextConfig) -> Self {
        self.text = text;
        self
    }

    /// Enables line numbers beside the main text.
    pub fn with_line_numbers(mut self, config: LineNumberConfig) -> Self {
        self.line_numbers = Some(config);
        self
    }

    /// Adds marginal notes beside their lines.
    pub fn with_marginalia(mut self, config: MarginaliaConfig) -> Self {
        self.marginalia = Some(config);
        self
    }

    /// Replaces the text measurement backend.
    pub fn with_measurer(mut self, measurer: Arc<dyn TextBoxMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    /// Memoizes measurements per word and font. Enabled by default.
    pub fn with_measurement_cache(mut self, enabled: bool) -> Self {
        self.cache_measurements = enabled;
        self
    }

    /// Consumes the builder and creates the [`DocumentPipeline`].
    ///
    /// Fails if no page geometry was configured or if any configuration is invalid.
    pub fn build(self) -> Result<DocumentPipeline, PipelineError> {
        let config = self.typesetter_config.ok_or_else(|| {
            PipelineError::Config(
                "No page geometry has been configured. Use `with_config` or `with_typesetter_config`."
                    .to_string(),
            )
        })?;
        if !(self.text.paragraph_skip >= 0.0) {
            return Err(PipelineError::Config(format!(
                "paragraph skip must not be negative, got {}",
                self.text.paragraph_skip
            )));
        }

        let measurer: Arc<dyn TextBoxMeasurer> = if self.cache_measurements {
            Arc::new(CachingMeasurer::new(self.measurer))
        } else {
            self.measurer
        };
        log::debug!(
            "Building pipeline with measurer {} (cached: {})",
            measurer.name(),
            self.cache_measurements
        );

        let typesetter = BasicTypesetter::new(config, measurer.clone())?;
        let line_numbers = self
            .line_numbers
            .map(|config| LineNumbers::new(config, measurer.clone()))
            .transpose()?;
        let marginalia = self
            .marginalia
            .map(|config| Marginalia::new(config, measurer))
            .transpose()?;

        Ok(DocumentPipeline::new(
            typesetter,
            self.text.paragraph_builder(),
            self.text.paragraph_skip,
            line_numbers,
            marginalia,
        ))
    }
}
