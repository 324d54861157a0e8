//! Tagged JSON import and export.
//!
//! Every exported object carries a `class` discriminator naming its kind. Import checks the
//! discriminators of the whole tree before deserializing, so an unknown class is reported by name
//! instead of as a generic parse failure.

use crate::document::{Document, Page};
use crate::item::{BoxItem, Glue, Item, Penalty, TextBox};
use crate::list::ItemList;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const CLASS_KEY: &str = "class";

/// Discriminators accepted at import.
pub const KNOWN_CLASSES: [&str; 7] = [
    "Box", "TextBox", "Glue", "Penalty", "ItemList", "Page", "Document",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unknown class '{0}' in imported object")]
    UnknownClass(String),

    #[error("Imported object has no '{CLASS_KEY}' discriminator")]
    MissingClass,

    #[error("Expected a {expected}, found a {found}")]
    UnexpectedClass {
        expected: &'static str,
        found: &'static str,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any object that can be exported on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum ExportObject {
    Box(BoxItem),
    TextBox(TextBox),
    Glue(Glue),
    Penalty(Penalty),
    ItemList(ItemList),
    Page(Page),
    Document(Document),
}

impl ExportObject {
    pub fn class(&self) -> &'static str {
        match self {
            ExportObject::Box(_) => "Box",
            ExportObject::TextBox(_) => "TextBox",
            ExportObject::Glue(_) => "Glue",
            ExportObject::Penalty(_) => "Penalty",
            ExportObject::ItemList(_) => "ItemList",
            ExportObject::Page(_) => "Page",
            ExportObject::Document(_) => "Document",
        }
    }

    pub fn into_document(self) -> Result<Document, ExportError> {
        match self {
            ExportObject::Document(d) => Ok(d),
            other => Err(ExportError::UnexpectedClass {
                expected: "Document",
                found: other.class(),
            }),
        }
    }

    pub fn into_item_list(self) -> Result<ItemList, ExportError> {
        match self {
            ExportObject::ItemList(l) => Ok(l),
            other => Err(ExportError::UnexpectedClass {
                expected: "ItemList",
                found: other.class(),
            }),
        }
    }
}

impl From<Item> for ExportObject {
    fn from(item: Item) -> Self {
        match item {
            Item::Box(b) => ExportObject::Box(b),
            Item::TextBox(t) => ExportObject::TextBox(t),
            Item::Glue(g) => ExportObject::Glue(g),
            Item::Penalty(p) => ExportObject::Penalty(p),
            Item::List(l) => ExportObject::ItemList(l),
        }
    }
}

impl From<Document> for ExportObject {
    fn from(d: Document) -> Self {
        ExportObject::Document(d)
    }
}

impl From<Page> for ExportObject {
    fn from(p: Page) -> Self {
        ExportObject::Page(p)
    }
}

impl From<ItemList> for ExportObject {
    fn from(l: ItemList) -> Self {
        ExportObject::ItemList(l)
    }
}

/// Serde adapters for the page and document sequences, whose elements are typed by their field
/// and would otherwise be written without a `class`.
macro_rules! tagged_seq {
    ($module:ident, $ty:ident) => {
        pub(crate) mod $module {
            use super::$ty;
            use serde::{Deserialize, Deserializer, Serialize, Serializer};

            #[derive(Serialize)]
            #[serde(tag = "class")]
            enum Tagged<'a> {
                $ty(&'a $ty),
            }

            #[derive(Deserialize)]
            #[serde(tag = "class")]
            enum Owned {
                $ty($ty),
            }

            pub fn serialize<S: Serializer>(
                values: &[$ty],
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                serializer.collect_seq(values.iter().map(Tagged::$ty))
            }

            pub fn deserialize<'de, D: Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Vec<$ty>, D::Error> {
                let values: Vec<Owned> = Vec::deserialize(deserializer)?;
                Ok(values.into_iter().map(|Owned::$ty(value)| value).collect())
            }
        }
    };
}

tagged_seq!(tagged_pages, Page);
tagged_seq!(tagged_lists, ItemList);

/// Walks a JSON tree and fails on the first unknown discriminator.
fn check_classes(value: &Value) -> Result<(), ExportError> {
    match value {
        Value::Object(map) => {
            if let Some(class) = map.get(CLASS_KEY) {
                match class.as_str() {
                    Some(name) if KNOWN_CLASSES.contains(&name) => {}
                    Some(name) => return Err(ExportError::UnknownClass(name.to_string())),
                    None => return Err(ExportError::UnknownClass(class.to_string())),
                }
            }
            map.values().try_for_each(check_classes)
        }
        Value::Array(values) => values.iter().try_for_each(check_classes),
        _ => Ok(()),
    }
}

pub fn import_value(value: Value) -> Result<ExportObject, ExportError> {
    if !value.get(CLASS_KEY).is_some_and(Value::is_string) {
        return Err(ExportError::MissingClass);
    }
    check_classes(&value)?;
    Ok(serde_json::from_value(value)?)
}

pub fn import_json(json: &str) -> Result<ExportObject, ExportError> {
    let value: Value = serde_json::from_str(json)?;
    import_value(value)
}

pub fn export_json(object: &ExportObject) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(object)?)
}

impl Document {
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&ExportObject::Document(self.clone()))?)
    }

    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        import_json(json)?.into_document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Annotation, ListType};
    use serde_json::json;

    fn sample_document() -> Document {
        let mut line = ItemList::horizontal();
        line.metadata.insert(Annotation::ListType(ListType::Line));
        line.push(TextBox::new("Hello").with_size(30.0, 12.0));
        line.push(Glue::horizontal(5.0, 2.0, 1.0));
        line.push(Penalty::new(50, true));
        line.push(BoxItem::new(4.0, 4.0));
        line.set_height(12.0);

        let mut main = ItemList::vertical();
        main.metadata.insert(Annotation::ListType(ListType::MainText));
        main.shift_x = 50.0;
        main.shift_y = 50.0;
        main.push(line);
        main.push(Glue::vertical(12.0));

        let mut page = Page::new(200.0, 300.0);
        page.push(main);
        let mut doc = Document::from_pages(vec![page]);
        doc.annotate(Annotation::Typesetter("test".into()));
        doc
    }

    #[test]
    fn document_round_trips_through_json() {
        let doc = sample_document();
        let json = doc.to_json().unwrap();
        assert!(json.contains("\"class\": \"Document\""));
        let back = Document::from_json(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn nested_items_carry_their_class() {
        let value = serde_json::to_value(ExportObject::from(sample_document())).unwrap();
        let page = &value["pages"][0];
        assert_eq!(page["class"], "Page");
        assert_eq!(page["items"][0]["class"], "ItemList");
        let first_item = &page["items"][0]["items"][0];
        assert_eq!(first_item["class"], "ItemList");
        assert_eq!(first_item["items"][0]["class"], "TextBox");
    }

    #[test]
    fn unknown_class_is_rejected_by_name() {
        let value = json!({
            "class": "ItemList",
            "direction": "horizontal",
            "items": [ { "class": "Kern", "width": 1.0 } ]
        });
        match import_value(value) {
            Err(ExportError::UnknownClass(name)) => assert_eq!(name, "Kern"),
            other => panic!("expected UnknownClass, got {:?}", other),
        }
    }

    #[test]
    fn standalone_page_lists_carry_their_class() {
        let mut doc = sample_document();
        let page = doc.pages.remove(0);
        let json = export_json(&ExportObject::from(page.clone())).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["class"], "Page");
        assert_eq!(value["items"][0]["class"], "ItemList");
        assert!(matches!(import_json(&json).unwrap(), ExportObject::Page(p) if p == page));
    }

    #[test]
    fn untagged_pages_are_rejected() {
        let value = json!({
            "class": "Document",
            "width": 100.0,
            "height": 100.0,
            "pages": [ { "width": 100.0, "height": 100.0 } ]
        });
        assert!(matches!(import_value(value), Err(ExportError::Json(_))));
    }

    #[test]
    fn missing_class_is_rejected() {
        let err = import_json(r#"{"width": 1.0}"#).unwrap_err();
        assert!(matches!(err, ExportError::MissingClass));
    }

    #[test]
    fn wrong_top_level_class_is_reported() {
        let object = import_json(r#"{"class":"Glue","direction":"vertical","height":3.0}"#).unwrap();
        assert!(matches!(
            object.into_document(),
            Err(ExportError::UnexpectedClass { expected: "Document", found: "Glue" })
        ));
    }
}
