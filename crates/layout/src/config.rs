use crate::LayoutError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MARGIN: f32 = 50.0;
pub const DEFAULT_LINE_SKIP: f32 = 24.0;

fn default_margin() -> f32 {
    DEFAULT_MARGIN
}

fn default_line_skip() -> f32 {
    DEFAULT_LINE_SKIP
}

fn default_justify() -> bool {
    true
}

/// Page geometry and spacing used by the [`BasicTypesetter`](crate::BasicTypesetter).
///
/// Only the page size is required when loading from JSON; every other key falls back to its
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypesetterConfig {
    pub page_width: f32,
    pub page_height: f32,

    #[serde(default = "default_margin")]
    pub margin_top: f32,
    #[serde(default = "default_margin")]
    pub margin_bottom: f32,
    #[serde(default = "default_margin")]
    pub margin_left: f32,
    #[serde(default = "default_margin")]
    pub margin_right: f32,

    /// Distance between the tops of consecutive lines of a paragraph.
    ///
    /// The glue between two lines is `line_skip - next_line_height`, so lines of uniform height
    /// advance by exactly `line_skip`.
    ///
    /// Defaults to `24.0`.
    #[serde(default = "default_line_skip")]
    pub line_skip: f32,

    /// Lower bound for the glue between lines, applied when a line is taller than `line_skip`.
    ///
    /// Defaults to `0.0`.
    #[serde(default)]
    pub min_line_skip: f32,

    /// Stretch or shrink inter-word glue so every line fills the line width.
    ///
    /// Defaults to `true`.
    #[serde(default = "default_justify")]
    pub justify: bool,
}

impl TypesetterConfig {
    /// A configuration with the given page size and default margins and spacing.
    pub fn new(page_width: f32, page_height: f32) -> Self {
        Self {
            page_width,
            page_height,
            margin_top: DEFAULT_MARGIN,
            margin_bottom: DEFAULT_MARGIN,
            margin_left: DEFAULT_MARGIN,
            margin_right: DEFAULT_MARGIN,
            line_skip: DEFAULT_LINE_SKIP,
            min_line_skip: 0.0,
            justify: true,
        }
    }

    pub fn with_margins(mut self, top: f32, right: f32, bottom: f32, left: f32) -> Self {
        self.margin_top = top;
        self.margin_right = right;
        self.margin_bottom = bottom;
        self.margin_left = left;
        self
    }

    pub fn with_line_skip(mut self, line_skip: f32, min_line_skip: f32) -> Self {
        self.line_skip = line_skip;
        self.min_line_skip = min_line_skip;
        self
    }

    pub fn with_justify(mut self, justify: bool) -> Self {
        self.justify = justify;
        self
    }

    pub fn line_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    pub fn text_area_height(&self) -> f32 {
        self.page_height - self.margin_top - self.margin_bottom
    }

    /// Rejects geometry the typesetter cannot work with.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let invalid = |msg: String| Err(LayoutError::InvalidConfig(msg));

        if !(self.page_width > 0.0 && self.page_height > 0.0) {
            return invalid(format!(
                "page size must be positive, got {}x{}",
                self.page_width, self.page_height
            ));
        }
        let margins = [
            ("marginTop", self.margin_top),
            ("marginBottom", self.margin_bottom),
            ("marginLeft", self.margin_left),
            ("marginRight", self.margin_right),
        ];
        if let Some((name, value)) = margins.iter().find(|(_, v)| !(*v >= 0.0)) {
            return invalid(format!("{} must not be negative, got {}", name, value));
        }
        if !(self.line_width() > 0.0) {
            return invalid(format!(
                "margins leave no room for text: line width is {}",
                self.line_width()
            ));
        }
        if !(self.text_area_height() > 0.0) {
            return invalid(format!(
                "margins leave no room for text: text area height is {}",
                self.text_area_height()
            ));
        }
        if !self.line_skip.is_finite() || !(self.min_line_skip >= 0.0) {
            return invalid(format!(
                "invalid line skip {} / min line skip {}",
                self.line_skip, self.min_line_skip
            ));
        }
        Ok(())
    }
}
