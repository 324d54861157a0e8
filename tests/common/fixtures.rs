use serde_json::{Value, json};

pub const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in \
reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur.";

/// Several paragraphs of running text separated by blank lines.
pub fn long_text(paragraphs: usize) -> String {
    vec![LOREM; paragraphs].join("\n\n")
}

/// Paragraphs of a single word each, `p1` to `p{count}`.
pub fn one_word_paragraphs(count: usize) -> String {
    (1..=count)
        .map(|i| format!("p{}", i))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// A text box with a fixed size, so it is not measured.
pub fn sized_word(text: &str, width: f32, height: f32) -> Value {
    json!({
        "class": "TextBox",
        "text": text,
        "fontFamily": "FreeSerif",
        "fontSize": 16.0,
        "width": width,
        "height": height
    })
}

pub fn glue(width: f32, stretch: f32, shrink: f32) -> Value {
    json!({
        "class": "Glue",
        "direction": "horizontal",
        "width": width,
        "stretch": stretch,
        "shrink": shrink
    })
}

pub fn penalty(value: i64) -> Value {
    json!({ "class": "Penalty", "penalty": value })
}

pub fn horizontal_list(items: Vec<Value>) -> Value {
    json!({ "class": "ItemList", "direction": "horizontal", "items": items })
}

pub fn vertical_list(items: Vec<Value>) -> Value {
    json!({ "class": "ItemList", "direction": "vertical", "items": items })
}
