use crate::LayoutError;
use crate::config::TypesetterConfig;
use crate::processors::{
    LineNumberConfig, LineNumbers, MarginAlign, Marginalia, MarginaliaConfig, NumberStyle,
    PageProcessor, process_document,
};
use crate::test_utils::{create_test_typesetter, init_logger, single_line_paragraphs};
use crate::typesetter::Typesetter;
use galley_traits::measure::FixedAdvanceMeasurer;
use galley_traits::render::positioned_items;
use galley_types::document::{Document, Page};
use galley_types::font::TextDirection;
use galley_types::item::{Item, TextBox};
use galley_types::list::ItemList;
use galley_types::metadata::ListType;
use std::collections::BTreeMap;
use std::sync::Arc;

fn document(page_height: f32, lines: usize) -> Document {
    let typesetter = create_test_typesetter(TypesetterConfig::new(200.0, page_height));
    typesetter.typeset(single_line_paragraphs(lines, 20.0)).unwrap()
}

fn line_numbers(config: LineNumberConfig) -> LineNumbers {
    LineNumbers::new(config, Arc::new(FixedAdvanceMeasurer::default())).unwrap()
}

fn number_list(page: &Page) -> Option<&ItemList> {
    page.items
        .iter()
        .find(|l| l.metadata.list_type() == Some(ListType::LineNumbers))
}

fn shown_numbers(page: &Page) -> Vec<String> {
    number_list(page)
        .map(|list| {
            list.items()
                .iter()
                .filter_map(|item| match item {
                    Item::TextBox(t) => Some(t.text().to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_every_fifth_line_and_line_one_are_numbered() {
    init_logger();
    let doc = document(800.0, 12);
    let processor = line_numbers(LineNumberConfig::default());
    let page = processor.process(doc.pages[0].clone()).unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(shown_numbers(&page), vec!["1", "5", "10"]);

    let list = number_list(&page).unwrap();
    assert_eq!(list.shift_x, 20.0);
    assert_eq!(list.shift_y, 50.0);
    let kinds: Vec<&str> = list.items().iter().map(Item::kind).collect();
    assert_eq!(kinds, vec!["TextBox", "Glue", "TextBox", "Glue", "TextBox"]);
}

#[test]
fn test_numbers_sit_on_the_bottom_of_their_lines() {
    let doc = document(800.0, 12);
    let processor = line_numbers(LineNumberConfig::default());
    let page = processor.process(doc.pages[0].clone()).unwrap();

    // lines advance by the 24 line skip from the 50 top margin, and are 20 high
    let placed = positioned_items(&page);
    let mut checked = 0;
    for p in placed {
        if let Item::TextBox(t) = p.item
            && p.depth == 0
        {
            let number: f32 = t.text().parse().unwrap();
            let line_bottom = 50.0 + (number - 1.0) * 24.0 + 20.0;
            assert!((p.y + p.item.height() - line_bottom).abs() < 1e-3);
            assert!((p.x + p.item.width() - 20.0).abs() < 1e-3, "right aligned at 20");
            checked += 1;
        }
    }
    assert_eq!(checked, 3);
}

#[test]
fn test_numbering_restarts_on_each_page() {
    // 120 text area: five lines per page
    let doc = document(220.0, 12);
    assert_eq!(doc.page_count(), 3);
    let processor = line_numbers(LineNumberConfig::default());
    let doc = process_document(doc, &[&processor]).unwrap();

    assert_eq!(shown_numbers(&doc.pages[0]), vec!["1", "5"]);
    assert_eq!(shown_numbers(&doc.pages[1]), vec!["1", "5"]);
    assert_eq!(shown_numbers(&doc.pages[2]), vec!["1"]);
}

#[test]
fn test_absolute_numbering_without_reset() {
    let doc = document(220.0, 12);
    let processor = line_numbers(LineNumberConfig {
        reset_each_page: false,
        ..LineNumberConfig::default()
    });
    let doc = process_document(doc, &[&processor]).unwrap();

    assert_eq!(shown_numbers(&doc.pages[0]), vec!["1", "5"]);
    assert_eq!(shown_numbers(&doc.pages[1]), vec!["10"]);
    // lines 11 and 12: nothing to show, no list added
    assert!(number_list(&doc.pages[2]).is_none());
    assert_eq!(doc.pages[2].items.len(), 1);
}

#[test]
fn test_line_number_shift_is_added() {
    let doc = document(800.0, 12);
    let processor = line_numbers(LineNumberConfig {
        line_number_shift: 4,
        reset_each_page: false,
        ..LineNumberConfig::default()
    });
    let page = processor.process(doc.pages[0].clone()).unwrap();
    assert_eq!(shown_numbers(&page), vec!["5", "10", "15"]);
}

#[test]
fn test_left_aligned_numbers_are_not_shifted() {
    let doc = document(800.0, 3);
    let processor = line_numbers(LineNumberConfig {
        align: MarginAlign::Left,
        ..LineNumberConfig::default()
    });
    let page = processor.process(doc.pages[0].clone()).unwrap();
    let list = number_list(&page).unwrap();
    assert_eq!(list.items()[0].shift_x(), 0.0);
}

#[test]
fn test_page_without_main_text_is_untouched() {
    let processor = line_numbers(LineNumberConfig::default());
    let page = Page::new(100.0, 100.0);
    assert_eq!(processor.process(page.clone()).unwrap(), page);
}

#[test]
fn test_zero_frequency_is_rejected() {
    let result = LineNumbers::new(
        LineNumberConfig {
            frequency: 0,
            ..LineNumberConfig::default()
        },
        Arc::new(FixedAdvanceMeasurer::default()),
    );
    assert!(matches!(result, Err(LayoutError::InvalidConfig(_))));
}

#[test]
fn test_arabic_digits() {
    assert_eq!(NumberStyle::Arabic.format(105), "\u{661}\u{660}\u{665}");
    assert_eq!(NumberStyle::Western.format(105), "105");
}

#[test]
fn test_config_loads_from_json() {
    let config: LineNumberConfig =
        serde_json::from_str(r#"{"frequency": 10, "align": "left", "numberStyle": "arabic"}"#)
            .unwrap();
    assert_eq!(config.frequency, 10);
    assert_eq!(config.align, MarginAlign::Left);
    assert_eq!(config.number_style, NumberStyle::Arabic);
    assert!(config.show_line_one);
    assert_eq!(config.x_position, 20.0);
}

fn marginalia(config: MarginaliaConfig) -> Marginalia {
    Marginalia::new(config, Arc::new(FixedAdvanceMeasurer::default())).unwrap()
}

fn notes_config(entries: Vec<(u32, Vec<&str>)>) -> MarginaliaConfig {
    MarginaliaConfig {
        x_position: 180.0,
        align: MarginAlign::Left,
        entries: entries
            .into_iter()
            .map(|(line, texts)| (line, texts.into_iter().map(String::from).collect()))
            .collect::<BTreeMap<_, _>>(),
        ..MarginaliaConfig::default()
    }
}

fn notes_list(page: &Page) -> Option<&ItemList> {
    page.items
        .iter()
        .find(|l| l.metadata.list_type() == Some(ListType::Marginalia))
}

fn note_texts(page: &Page) -> Vec<Vec<String>> {
    notes_list(page)
        .map(|list| {
            list.lists()
                .map(|note| {
                    note.items()
                        .iter()
                        .filter_map(|item| match item {
                            Item::TextBox(t) => Some(t.text().to_string()),
                            _ => None,
                        })
                        .collect()
                })
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_marginal_notes_sit_on_the_bottom_of_their_lines() {
    init_logger();
    let doc = document(800.0, 12);
    let processor = marginalia(notes_config(vec![(3, vec!["a", "b"]), (10, vec!["c"])]));
    let page = processor.process(doc.pages[0].clone()).unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(note_texts(&page), vec![vec!["a", "b"], vec!["c"]]);
    let list = notes_list(&page).unwrap();
    assert_eq!(list.shift_x, 180.0);
    assert_eq!(list.shift_y, 50.0);
    let kinds: Vec<&str> = list.items().iter().map(Item::kind).collect();
    assert_eq!(kinds, vec!["Glue", "ItemList", "Glue", "ItemList"]);

    let mut bottoms = Vec::new();
    for p in positioned_items(&page) {
        // main text words sit left of the margin
        if let Item::TextBox(t) = p.item
            && p.x >= 170.0
        {
            bottoms.push((t.text().to_string(), p.x, p.y + p.item.height()));
        }
    }
    assert_eq!(bottoms.len(), 3);
    // lines 3 and 10 end at 50 + 2 * 24 + 20 and 50 + 9 * 24 + 20
    for (text, _, bottom) in &bottoms {
        let expected = if text == "c" { 286.0 } else { 118.0 };
        assert!((bottom - expected).abs() < 1e-3, "{text} ends at {bottom}");
    }
    // left aligned, 5 of glue between sub-entries
    let first_width = 13.333_333 * 0.5;
    assert!((bottoms[0].1 - 180.0).abs() < 1e-3);
    assert!((bottoms[1].1 - (180.0 + first_width + 5.0)).abs() < 1e-3);
}

#[test]
fn test_right_aligned_notes_end_at_x_position() {
    let doc = document(800.0, 4);
    let processor = marginalia(MarginaliaConfig {
        align: MarginAlign::Right,
        ..notes_config(vec![(2, vec!["ab", "c"])])
    });
    let page = processor.process(doc.pages[0].clone()).unwrap();

    let last = positioned_items(&page)
        .into_iter()
        .filter(|p| p.depth == 1)
        .last()
        .unwrap();
    assert!((last.x + last.item.width() - 180.0).abs() < 1e-3);
}

#[test]
fn test_notes_follow_absolute_line_numbers_across_pages() {
    // 120 text area: five lines per page
    let doc = document(220.0, 12);
    let processor = marginalia(notes_config(vec![(2, vec!["two"]), (7, vec!["seven"])]));
    let doc = process_document(doc, &[&processor]).unwrap();

    assert_eq!(note_texts(&doc.pages[0]), vec![vec!["two"]]);
    assert_eq!(note_texts(&doc.pages[1]), vec![vec!["seven"]]);
    // line 7 is the second line of page two
    let list = notes_list(&doc.pages[1]).unwrap();
    assert_eq!(list.items()[0].height(), 24.0);
    assert!(notes_list(&doc.pages[2]).is_none());
    assert_eq!(doc.pages[2].items.len(), 1);
}

#[test]
fn test_item_entries_keep_their_size_and_take_the_text_direction() {
    let doc = document(800.0, 3);
    let processor = marginalia(MarginaliaConfig {
        text_direction: TextDirection::Rtl,
        ..notes_config(Vec::new())
    })
    .with_entry(1, vec![vec![TextBox::new("x").with_size(30.0, 20.0).into()]]);
    let page = processor.process(doc.pages[0].clone()).unwrap();

    let list = notes_list(&page).unwrap();
    let note = list.lists().next().unwrap();
    assert_eq!(note.shift_y, 0.0);
    match &note.items()[0] {
        Item::TextBox(t) => {
            assert_eq!(t.width(), Some(30.0));
            assert_eq!(t.text_direction(), TextDirection::Rtl);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_marginalia_without_entries_leave_pages_untouched() {
    let doc = document(800.0, 3);
    let processor = marginalia(notes_config(Vec::new()));
    assert_eq!(processor.process(doc.pages[0].clone()).unwrap(), doc.pages[0]);

    let processor = marginalia(notes_config(vec![(40, vec!["far"])]));
    assert_eq!(processor.process(doc.pages[0].clone()).unwrap(), doc.pages[0]);
}

#[test]
fn test_marginalia_config_is_validated() {
    let result = Marginalia::new(
        MarginaliaConfig {
            glue_width: -1.0,
            ..MarginaliaConfig::default()
        },
        Arc::new(FixedAdvanceMeasurer::default()),
    );
    assert!(matches!(result, Err(LayoutError::InvalidConfig(_))));
}
