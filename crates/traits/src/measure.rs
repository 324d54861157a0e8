//! TextBoxMeasurer trait for abstracting text measurement.
//!
//! The typesetter never shapes text itself. It asks a measurer for the width and height of each
//! text box before breaking a paragraph, so any font backend can be plugged in.

use galley_types::font::{FontStyle, FontWeight};
use galley_types::geometry::Size;
use galley_types::item::TextBox;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for measurement operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    #[error("Font not available: {family} ({weight:?}, {style:?})")]
    FontUnavailable {
        family: String,
        weight: FontWeight,
        style: FontStyle,
    },

    #[error("Invalid font size {0} for measurement")]
    InvalidFontSize(f32),

    #[error("Failed to measure '{text}': {message}")]
    Failed { text: String, message: String },
}

/// A synchronous text measurement backend.
///
/// Results must be deterministic for a given text, font family, size, style and weight: the
/// typesetter relies on this to make repeated runs produce identical output.
///
/// # Example
///
/// ```ignore
/// let measurer = FixedAdvanceMeasurer::default();
/// let size = measurer.measure(&TextBox::new("galley"))?;
/// ```
pub trait TextBoxMeasurer: Send + Sync + Debug {
    /// Advance width of the text box content.
    fn measure_width(&self, text_box: &TextBox) -> Result<f32, MeasureError>;

    /// Height of the text box content.
    fn measure_height(&self, text_box: &TextBox) -> Result<f32, MeasureError>;

    fn measure(&self, text_box: &TextBox) -> Result<Size, MeasureError> {
        Ok(Size::new(
            self.measure_width(text_box)?,
            self.measure_height(text_box)?,
        ))
    }

    /// Returns a human-readable name for this measurer (for logging/debugging).
    fn name(&self) -> &'static str;
}

impl<T: TextBoxMeasurer + ?Sized> TextBoxMeasurer for Arc<T> {
    fn measure_width(&self, text_box: &TextBox) -> Result<f32, MeasureError> {
        (**self).measure_width(text_box)
    }

    fn measure_height(&self, text_box: &TextBox) -> Result<f32, MeasureError> {
        (**self).measure_height(text_box)
    }

    fn measure(&self, text_box: &TextBox) -> Result<Size, MeasureError> {
        (**self).measure(text_box)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// A deterministic measurer that gives every character the same advance.
///
/// Width is `chars × font_size × advance`, height is `font_size × line_height`. Useful for tests
/// and for inspecting layouts without font files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Advance of one character as a fraction of the font size.
    pub advance: f32,
    /// Box height as a fraction of the font size.
    pub line_height: f32,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self {
            advance: 0.5,
            line_height: 1.0,
        }
    }
}

impl FixedAdvanceMeasurer {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }

    fn checked_size(text_box: &TextBox) -> Result<f32, MeasureError> {
        let size = text_box.font_size();
        if size.is_finite() && size > 0.0 {
            Ok(size)
        } else {
            Err(MeasureError::InvalidFontSize(size))
        }
    }
}

impl TextBoxMeasurer for FixedAdvanceMeasurer {
    fn measure_width(&self, text_box: &TextBox) -> Result<f32, MeasureError> {
        let size = Self::checked_size(text_box)?;
        Ok(text_box.text().chars().count() as f32 * size * self.advance)
    }

    fn measure_height(&self, text_box: &TextBox) -> Result<f32, MeasureError> {
        Ok(Self::checked_size(text_box)? * self.line_height)
    }

    fn name(&self) -> &'static str {
        "FixedAdvanceMeasurer"
    }
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
struct MeasureCacheKey {
    text: String,
    family: String,
    size_bits: u32,
    style: FontStyle,
    weight: FontWeight,
}

impl MeasureCacheKey {
    fn of(text_box: &TextBox) -> Self {
        Self {
            text: text_box.text().to_string(),
            family: text_box.font_family().to_string(),
            size_bits: text_box.font_size().to_bits(),
            style: text_box.font_style(),
            weight: text_box.font_weight(),
        }
    }
}

/// Memoizes the measurements of an inner measurer.
///
/// Paragraphs repeat the same words often, and real measurers shape text, so results are cached
/// per (text, family, size, style, weight).
#[derive(Debug)]
pub struct CachingMeasurer<M> {
    inner: M,
    sizes: RwLock<HashMap<MeasureCacheKey, Size>>,
}

impl<M: TextBoxMeasurer> CachingMeasurer<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            sizes: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Number of cached entries. Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.sizes.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Does nothing if the lock is poisoned.
    pub fn clear(&self) {
        if let Ok(mut c) = self.sizes.write() {
            c.clear();
        }
    }

    fn cached(&self, text_box: &TextBox) -> Result<Size, MeasureError> {
        let key = MeasureCacheKey::of(text_box);
        if let Ok(cache) = self.sizes.read()
            && let Some(size) = cache.get(&key)
        {
            return Ok(*size);
        }

        let size = self.inner.measure(text_box)?;
        match self.sizes.write() {
            Ok(mut cache) => {
                cache.insert(key, size);
            }
            Err(_) => log::warn!("Measurement cache lock poisoned; result not cached"),
        }
        Ok(size)
    }
}

impl<M: TextBoxMeasurer> TextBoxMeasurer for CachingMeasurer<M> {
    fn measure_width(&self, text_box: &TextBox) -> Result<f32, MeasureError> {
        Ok(self.cached(text_box)?.width)
    }

    fn measure_height(&self, text_box: &TextBox) -> Result<f32, MeasureError> {
        Ok(self.cached(text_box)?.height)
    }

    fn measure(&self, text_box: &TextBox) -> Result<Size, MeasureError> {
        self.cached(text_box)
    }

    fn name(&self) -> &'static str {
        "CachingMeasurer"
    }
}
