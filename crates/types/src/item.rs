//! The box/glue/penalty item model.
//!
//! Every piece of content the typesetter handles is an [`Item`]. Boxes carry fixed content,
//! text boxes carry text whose size comes from an external measurer, glue is flexible space and
//! penalties mark places where a line may (or must not) be broken.

use crate::font::{FontStyle, FontWeight, TextDirection};
use crate::geometry::Direction;
use crate::list::ItemList;
use crate::metadata::Metadata;
use serde::{Deserialize, Deserializer, Serialize};

/// Penalty value that forbids a break.
pub const INFINITE_PENALTY: i32 = 1000;
/// Penalty value that forces a break.
pub const MINUS_INFINITE_PENALTY: i32 = -1000;

pub const DEFAULT_FONT_FAMILY: &str = "FreeSerif";
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

fn is_zero(value: &f32) -> bool {
    *value == 0.0
}

/// A box with fixed dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxItem {
    direction: Direction,
    width: f32,
    height: f32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub shift_x: f32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub shift_y: f32,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl BoxItem {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_direction(Direction::Horizontal, width, height)
    }

    pub fn with_direction(direction: Direction, width: f32, height: f32) -> Self {
        Self {
            direction,
            width: width.max(0.0),
            height: height.max(0.0),
            shift_x: 0.0,
            shift_y: 0.0,
            metadata: Metadata::new(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

/// A box holding a run of text in a single font.
///
/// Width and height are `None` until a measurer fills them in. Changing the text or any font
/// property resets them, so the box has to be measured again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBox {
    text: String,
    font_family: String,
    font_size: f32,
    #[serde(default)]
    font_style: FontStyle,
    #[serde(default)]
    font_weight: FontWeight,
    #[serde(default)]
    text_direction: TextDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<f32>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub shift_x: f32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub shift_y: f32,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl TextBox {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_style: FontStyle::default(),
            font_weight: FontWeight::default(),
            text_direction: TextDirection::default(),
            width: None,
            height: None,
            shift_x: 0.0,
            shift_y: 0.0,
            metadata: Metadata::new(),
        }
    }

    pub fn with_font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.set_font_family(family);
        self.set_font_size(size);
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.set_font_style(style);
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.set_font_weight(weight);
        self
    }

    pub fn with_text_direction(mut self, direction: TextDirection) -> Self {
        self.text_direction = direction;
        self
    }

    /// Sets known dimensions up front, e.g. for text measured elsewhere.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.set_width(width);
        self.set_height(height);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_style(&self) -> FontStyle {
        self.font_style
    }

    pub fn font_weight(&self) -> FontWeight {
        self.font_weight
    }

    pub fn text_direction(&self) -> TextDirection {
        self.text_direction
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.reset_measurements();
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.font_family = family.into();
        self.reset_measurements();
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
        self.reset_measurements();
    }

    pub fn set_font_style(&mut self, style: FontStyle) {
        self.font_style = style;
        self.reset_measurements();
    }

    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.font_weight = weight;
        self.reset_measurements();
    }

    pub fn set_text_direction(&mut self, direction: TextDirection) {
        self.text_direction = direction;
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn height(&self) -> Option<f32> {
        self.height
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = Some(width.max(0.0));
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = Some(height.max(0.0));
    }

    pub fn is_measured(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    pub fn reset_measurements(&mut self) {
        self.width = None;
        self.height = None;
    }
}

/// Flexible space with a natural size that may stretch or shrink.
///
/// For horizontal glue the natural size is `width`; for vertical glue it is `height`.
/// `stretch` and `shrink` always apply to the width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Glue {
    direction: Direction,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    stretch: f32,
    #[serde(default)]
    shrink: f32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub shift_x: f32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub shift_y: f32,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl Glue {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            width: 0.0,
            height: 0.0,
            stretch: 0.0,
            shrink: 0.0,
            shift_x: 0.0,
            shift_y: 0.0,
            metadata: Metadata::new(),
        }
    }

    /// Inter-word space.
    pub fn horizontal(width: f32, stretch: f32, shrink: f32) -> Self {
        let mut glue = Self::new(Direction::Horizontal);
        glue.width = width;
        glue.stretch = stretch.max(0.0);
        glue.shrink = shrink.max(0.0);
        glue
    }

    /// Vertical space of a fixed height.
    pub fn vertical(height: f32) -> Self {
        let mut glue = Self::new(Direction::Vertical);
        glue.height = height;
        glue
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn stretch(&self) -> f32 {
        self.stretch
    }

    pub fn shrink(&self) -> f32 {
        self.shrink
    }

    pub fn set_width(&mut self, width: f32) -> &mut Self {
        self.width = width;
        self
    }

    pub fn set_height(&mut self, height: f32) -> &mut Self {
        self.height = height;
        self
    }

    pub fn set_stretch(&mut self, stretch: f32) -> &mut Self {
        self.stretch = stretch.max(0.0);
        self
    }

    pub fn set_shrink(&mut self, shrink: f32) -> &mut Self {
        self.shrink = shrink.max(0.0);
        self
    }
}

fn deserialize_penalty_value<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    Ok(value.clamp(MINUS_INFINITE_PENALTY as i64, INFINITE_PENALTY as i64) as i32)
}

/// A possible breakpoint and the cost of breaking there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Penalty {
    #[serde(default = "Penalty::default_direction")]
    direction: Direction,
    #[serde(deserialize_with = "deserialize_penalty_value")]
    penalty: i32,
    /// Reserved for a policy against consecutive flagged breaks.
    #[serde(default)]
    flagged: bool,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl Penalty {
    /// Creates a penalty, clamping the value to the infinite bounds.
    pub fn new(penalty: i32, flagged: bool) -> Self {
        Self {
            direction: Self::default_direction(),
            penalty: penalty.clamp(MINUS_INFINITE_PENALTY, INFINITE_PENALTY),
            flagged,
            metadata: Metadata::new(),
        }
    }

    /// A mandatory break.
    pub fn forced_break() -> Self {
        Self::new(MINUS_INFINITE_PENALTY, false)
    }

    /// A position where no break may happen.
    pub fn no_break() -> Self {
        Self::new(INFINITE_PENALTY, false)
    }

    fn default_direction() -> Direction {
        Direction::Horizontal
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn penalty(&self) -> i32 {
        self.penalty
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub fn is_forced_break(&self) -> bool {
        self.penalty == MINUS_INFINITE_PENALTY
    }

    pub fn is_forbidden_break(&self) -> bool {
        self.penalty >= INFINITE_PENALTY
    }
}

/// Any unit of content the typesetter handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum Item {
    Box(BoxItem),
    TextBox(TextBox),
    Glue(Glue),
    Penalty(Penalty),
    #[serde(rename = "ItemList")]
    List(ItemList),
}

impl Item {
    /// The name used as the export discriminator.
    pub fn kind(&self) -> &'static str {
        match self {
            Item::Box(_) => "Box",
            Item::TextBox(_) => "TextBox",
            Item::Glue(_) => "Glue",
            Item::Penalty(_) => "Penalty",
            Item::List(_) => "ItemList",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Item::Box(b) => b.direction(),
            Item::TextBox(_) => Direction::Horizontal,
            Item::Glue(g) => g.direction(),
            Item::Penalty(p) => p.direction(),
            Item::List(l) => l.direction(),
        }
    }

    /// Width of the item. Unmeasured text boxes report zero; the typesetter measures every
    /// text box before it aggregates widths.
    pub fn width(&self) -> f32 {
        match self {
            Item::Box(b) => b.width(),
            Item::TextBox(t) => t.width().unwrap_or(0.0),
            Item::Glue(g) => g.width(),
            Item::Penalty(_) => 0.0,
            Item::List(l) => l.width(),
        }
    }

    pub fn height(&self) -> f32 {
        match self {
            Item::Box(b) => b.height(),
            Item::TextBox(t) => t.height().unwrap_or(0.0),
            Item::Glue(g) => g.height(),
            Item::Penalty(_) => 0.0,
            Item::List(l) => l.height(),
        }
    }

    pub fn shift_x(&self) -> f32 {
        match self {
            Item::Box(b) => b.shift_x,
            Item::TextBox(t) => t.shift_x,
            Item::Glue(g) => g.shift_x,
            Item::Penalty(_) => 0.0,
            Item::List(l) => l.shift_x,
        }
    }

    pub fn shift_y(&self) -> f32 {
        match self {
            Item::Box(b) => b.shift_y,
            Item::TextBox(t) => t.shift_y,
            Item::Glue(g) => g.shift_y,
            Item::Penalty(_) => 0.0,
            Item::List(l) => l.shift_y,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            Item::Box(b) => &b.metadata,
            Item::TextBox(t) => &t.metadata,
            Item::Glue(g) => &g.metadata,
            Item::Penalty(p) => &p.metadata,
            Item::List(l) => &l.metadata,
        }
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        match self {
            Item::Box(b) => &mut b.metadata,
            Item::TextBox(t) => &mut t.metadata,
            Item::Glue(g) => &mut g.metadata,
            Item::Penalty(p) => &mut p.metadata,
            Item::List(l) => &mut l.metadata,
        }
    }

    /// Boxes and text boxes: the content a line is made of.
    pub fn is_box(&self) -> bool {
        matches!(self, Item::Box(_) | Item::TextBox(_))
    }

    pub fn is_glue(&self) -> bool {
        matches!(self, Item::Glue(_))
    }

    pub fn is_measured(&self) -> bool {
        match self {
            Item::TextBox(t) => t.is_measured(),
            _ => true,
        }
    }

    pub fn as_glue(&self) -> Option<&Glue> {
        match self {
            Item::Glue(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ItemList> {
        match self {
            Item::List(l) => Some(l),
            _ => None,
        }
    }
}

impl From<BoxItem> for Item {
    fn from(b: BoxItem) -> Self {
        Item::Box(b)
    }
}

impl From<TextBox> for Item {
    fn from(t: TextBox) -> Self {
        Item::TextBox(t)
    }
}

impl From<Glue> for Item {
    fn from(g: Glue) -> Self {
        Item::Glue(g)
    }
}

impl From<Penalty> for Item {
    fn from(p: Penalty) -> Self {
        Item::Penalty(p)
    }
}

impl From<ItemList> for Item {
    fn from(l: ItemList) -> Self {
        Item::List(l)
    }
}
