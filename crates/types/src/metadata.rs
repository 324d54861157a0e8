//! Typed annotations the typesetter attaches to items, lists, pages and documents.
//!
//! The set of annotation kinds is closed: every kind has a fixed payload type, and a
//! [`Metadata`] set holds at most one annotation per [`AnnotationKey`].

use serde::{Deserialize, Serialize};

/// The role of an `ItemList` in typeset output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListType {
    /// A single justified line of a paragraph.
    Line,
    /// The vertical list holding the main text of a page.
    MainText,
    /// The vertical list of line numbers added by the line-number processor.
    LineNumbers,
    /// The vertical list of marginal notes added by the marginalia processor.
    Marginalia,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GlueType {
    InterLine,
    InterParagraph,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
pub enum Annotation {
    ListType(ListType),
    GlueType(GlueType),
    /// Whether an inter-line glue already reflects the height of the line after it.
    InterLineGlueSet(bool),
    LineNumberInParagraph(u32),
    /// Absolute line number in document order.
    LineNumber(u32),
    ParagraphNumber(u32),
    /// `None` when the line could not be justified.
    AdjustmentRatio(Option<f32>),
    UnadjustedLineWidth(f32),
    /// Adjusted width divided by unadjusted width.
    LineRatio(f32),
    Typesetter(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnnotationKey {
    ListType,
    GlueType,
    InterLineGlueSet,
    LineNumberInParagraph,
    LineNumber,
    ParagraphNumber,
    AdjustmentRatio,
    UnadjustedLineWidth,
    LineRatio,
    Typesetter,
}

impl Annotation {
    pub fn key(&self) -> AnnotationKey {
        match self {
            Annotation::ListType(_) => AnnotationKey::ListType,
            Annotation::GlueType(_) => AnnotationKey::GlueType,
            Annotation::InterLineGlueSet(_) => AnnotationKey::InterLineGlueSet,
            Annotation::LineNumberInParagraph(_) => AnnotationKey::LineNumberInParagraph,
            Annotation::LineNumber(_) => AnnotationKey::LineNumber,
            Annotation::ParagraphNumber(_) => AnnotationKey::ParagraphNumber,
            Annotation::AdjustmentRatio(_) => AnnotationKey::AdjustmentRatio,
            Annotation::UnadjustedLineWidth(_) => AnnotationKey::UnadjustedLineWidth,
            Annotation::LineRatio(_) => AnnotationKey::LineRatio,
            Annotation::Typesetter(_) => AnnotationKey::Typesetter,
        }
    }
}

/// A set of annotations, at most one per key, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Vec<Annotation>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an annotation, replacing any existing annotation of the same kind.
    pub fn insert(&mut self, annotation: Annotation) {
        let key = annotation.key();
        match self.0.iter_mut().find(|a| a.key() == key) {
            Some(existing) => *existing = annotation,
            None => self.0.push(annotation),
        }
    }

    pub fn get(&self, key: AnnotationKey) -> Option<&Annotation> {
        self.0.iter().find(|a| a.key() == key)
    }

    pub fn contains(&self, key: AnnotationKey) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: AnnotationKey) -> Option<Annotation> {
        let index = self.0.iter().position(|a| a.key() == key)?;
        Some(self.0.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    pub fn list_type(&self) -> Option<ListType> {
        match self.get(AnnotationKey::ListType) {
            Some(Annotation::ListType(t)) => Some(*t),
            _ => None,
        }
    }

    pub fn glue_type(&self) -> Option<GlueType> {
        match self.get(AnnotationKey::GlueType) {
            Some(Annotation::GlueType(t)) => Some(*t),
            _ => None,
        }
    }

    pub fn inter_line_glue_set(&self) -> Option<bool> {
        match self.get(AnnotationKey::InterLineGlueSet) {
            Some(Annotation::InterLineGlueSet(set)) => Some(*set),
            _ => None,
        }
    }

    pub fn line_number_in_paragraph(&self) -> Option<u32> {
        match self.get(AnnotationKey::LineNumberInParagraph) {
            Some(Annotation::LineNumberInParagraph(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn line_number(&self) -> Option<u32> {
        match self.get(AnnotationKey::LineNumber) {
            Some(Annotation::LineNumber(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn paragraph_number(&self) -> Option<u32> {
        match self.get(AnnotationKey::ParagraphNumber) {
            Some(Annotation::ParagraphNumber(n)) => Some(*n),
            _ => None,
        }
    }

    /// The outer `Option` tells whether a ratio was recorded, the inner one whether it was defined.
    pub fn adjustment_ratio(&self) -> Option<Option<f32>> {
        match self.get(AnnotationKey::AdjustmentRatio) {
            Some(Annotation::AdjustmentRatio(ratio)) => Some(*ratio),
            _ => None,
        }
    }

    pub fn unadjusted_line_width(&self) -> Option<f32> {
        match self.get(AnnotationKey::UnadjustedLineWidth) {
            Some(Annotation::UnadjustedLineWidth(w)) => Some(*w),
            _ => None,
        }
    }

    pub fn line_ratio(&self) -> Option<f32> {
        match self.get(AnnotationKey::LineRatio) {
            Some(Annotation::LineRatio(r)) => Some(*r),
            _ => None,
        }
    }

    pub fn typesetter(&self) -> Option<&str> {
        match self.get(AnnotationKey::Typesetter) {
            Some(Annotation::Typesetter(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl FromIterator<Annotation> for Metadata {
    fn from_iter<T: IntoIterator<Item = Annotation>>(iter: T) -> Self {
        let mut metadata = Metadata::new();
        for annotation in iter {
            metadata.insert(annotation);
        }
        metadata
    }
}
