use crate::BasicTypesetter;
use crate::config::TypesetterConfig;
use galley_traits::measure::{FixedAdvanceMeasurer, MeasureError, TextBoxMeasurer};
use galley_types::geometry::Direction;
use galley_types::item::{BoxItem, Glue, Item, Penalty, TextBox};
use galley_types::list::ItemList;
use galley_types::metadata::{Annotation, ListType};
use std::sync::Arc;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A 100-wide text area: page 200 wide with default 50 margins.
pub fn narrow_config() -> TypesetterConfig {
    TypesetterConfig::new(200.0, 800.0)
}

/// Creates a typesetter with a deterministic measurer for testing purposes.
pub fn create_test_typesetter(config: TypesetterConfig) -> BasicTypesetter {
    BasicTypesetter::new(config, Arc::new(FixedAdvanceMeasurer::default()))
        .expect("valid test config")
}

pub fn boxed(width: f32) -> Item {
    BoxItem::new(width, 10.0).into()
}

pub fn glue(width: f32, stretch: f32, shrink: f32) -> Item {
    Glue::horizontal(width, stretch, shrink).into()
}

pub fn penalty(value: i32) -> Item {
    Penalty::new(value, false).into()
}

pub fn word(text: &str, width: f32, height: f32) -> Item {
    TextBox::new(text).with_size(width, height).into()
}

pub fn paragraph(items: Vec<Item>) -> ItemList {
    ItemList::with_items(Direction::Horizontal, items)
}

/// A line list of the given height, as produced by the horizontal pass.
pub fn line_of_height(height: f32) -> ItemList {
    let mut line = ItemList::horizontal();
    line.push(BoxItem::new(50.0, height));
    line.metadata.insert(Annotation::ListType(ListType::Line));
    line
}

/// Line lists of a typeset vertical list, in order.
pub fn lines_of(list: &ItemList) -> Vec<&ItemList> {
    list.lists()
        .filter(|l| l.metadata.list_type() == Some(ListType::Line))
        .collect()
}

/// Words in a line, by text box text.
pub fn words_of(line: &ItemList) -> Vec<&str> {
    line.items()
        .iter()
        .filter_map(|item| match item {
            Item::TextBox(t) => Some(t.text()),
            _ => None,
        })
        .collect()
}

/// A measurer that always fails, to check error propagation.
#[derive(Debug)]
pub struct FailingMeasurer;

impl TextBoxMeasurer for FailingMeasurer {
    fn measure_width(&self, text_box: &TextBox) -> Result<f32, MeasureError> {
        Err(MeasureError::Failed {
            text: text_box.text().to_string(),
            message: "no font".to_string(),
        })
    }

    fn measure_height(&self, text_box: &TextBox) -> Result<f32, MeasureError> {
        self.measure_width(text_box)
    }

    fn name(&self) -> &'static str {
        "FailingMeasurer"
    }
}

/// A main text of `count` paragraphs that each fit on a single line of the given height.
pub fn single_line_paragraphs(count: usize, height: f32) -> ItemList {
    let mut main_text = ItemList::vertical();
    for i in 0..count {
        main_text.push(paragraph(vec![
            word(&format!("p{}", i + 1), 20.0, height),
            glue(0.0, 1000.0, 0.0),
            penalty(galley_types::item::MINUS_INFINITE_PENALTY),
        ]));
    }
    main_text
}
