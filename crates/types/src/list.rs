use crate::geometry::Direction;
use crate::item::Item;
use crate::metadata::Metadata;
use serde::{Deserialize, Serialize};

/// An ordered list of items laid out along one direction.
///
/// A horizontal list is a paragraph or a line; a vertical list stacks lines and glue. Width and
/// height are derived from the items unless set explicitly:
///
/// | direction  | width          | height         |
/// |------------|----------------|----------------|
/// | horizontal | sum of widths  | max of heights |
/// | vertical   | max of widths  | sum of heights |
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemList {
    direction: Direction,
    #[serde(default)]
    items: Vec<Item>,
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

fn is_zero(value: &f32) -> bool {
    *value == 0.0
}

impl ItemList {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    pub fn horizontal() -> Self {
        Self::new(Direction::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Direction::Vertical)
    }

    pub fn with_items(direction: Direction, items: Vec<Item>) -> Self {
        Self {
            direction,
            items,
            ..Self::default()
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }

    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn push(&mut self, item: impl Into<Item>) {
        self.items.push(item.into());
    }

    pub fn extend<I: IntoIterator<Item = Item>>(&mut self, items: I) {
        self.items.extend(items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width.unwrap_or_else(|| self.derived_width())
    }

    pub fn height(&self) -> f32 {
        self.height.unwrap_or_else(|| self.derived_height())
    }

    /// Freezes the width; later item changes no longer affect it.
    pub fn set_width(&mut self, width: f32) {
        self.width = Some(width);
    }

    /// Freezes the height; later item changes no longer affect it.
    pub fn set_height(&mut self, height: f32) {
        self.height = Some(height);
    }

    pub fn clear_explicit_size(&mut self) {
        self.width = None;
        self.height = None;
    }

    fn derived_width(&self) -> f32 {
        match self.direction {
            Direction::Horizontal => self.items.iter().map(Item::width).sum(),
            _ => self.items.iter().map(Item::width).fold(0.0, f32::max),
        }
    }

    fn derived_height(&self) -> f32 {
        match self.direction {
            Direction::Vertical => self.items.iter().map(Item::height).sum(),
            _ => self.items.iter().map(Item::height).fold(0.0, f32::max),
        }
    }

    /// Removes glue at the end of the list, returning how many items were dropped.
    pub fn trim_end_glue(&mut self) -> usize {
        let mut removed = 0;
        while self.items.last().is_some_and(Item::is_glue) {
            self.items.pop();
            removed += 1;
        }
        removed
    }

    /// The text of the list, with horizontal glue rendered as a single space and nested lists
    /// rendered as separate lines.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            match item {
                Item::TextBox(t) => out.push_str(t.text()),
                Item::Glue(g) if g.direction() == Direction::Horizontal => {
                    if !out.is_empty() && !out.ends_with(' ') {
                        out.push(' ');
                    }
                }
                Item::List(list) => {
                    let inner = list.text();
                    if inner.is_empty() {
                        continue;
                    }
                    if !out.is_empty() {
                        out.push('\n');
                    }
                    out.push_str(&inner);
                }
                _ => {}
            }
        }
        out.trim_end().to_string()
    }

    /// Nested lists in order.
    pub fn lists(&self) -> impl Iterator<Item = &ItemList> {
        self.items.iter().filter_map(Item::as_list)
    }
}
