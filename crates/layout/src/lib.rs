use galley_traits::measure::MeasureError;
use galley_types::geometry::Direction;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid list direction: expected {expected}, got {found}.")]
    InvalidDirection {
        expected: Direction,
        found: Direction,
    },
    #[error("Unsupported item {kind} at index {index} of a {context}.")]
    UnsupportedItem {
        kind: &'static str,
        index: usize,
        context: &'static str,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Measurement failed: {0}")]
    Measure(#[from] MeasureError),
}

pub mod algorithms;
pub mod basic;
pub mod config;
pub mod paragraph;
pub mod processors;
pub mod typesetter;

pub use self::basic::BasicTypesetter;
pub use self::config::TypesetterConfig;
pub use self::paragraph::{ParagraphBuilder, main_text_from_str};
pub use self::processors::{
    LineNumberConfig, LineNumbers, MarginAlign, Marginalia, MarginaliaConfig, PageProcessor,
    process_document,
};
pub use self::typesetter::Typesetter;

#[cfg(test)]
mod processors_test;
#[cfg(test)]
mod test_utils;
