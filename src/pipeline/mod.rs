// src/pipeline/mod.rs
//! The document pipeline: input to typeset, post-processed [`Document`].

pub mod builder;
pub mod config;

pub use builder::PipelineBuilder;
pub use config::{PipelineConfig, TextConfig};

use crate::error::PipelineError;
use crate::render::OutlineRenderer;
use galley_layout::{
    BasicTypesetter, LineNumbers, Marginalia, PageProcessor, ParagraphBuilder, Typesetter,
    main_text_from_str, process_document,
};
use galley_traits::render::DocumentRenderer;
use galley_types::document::Document;
use galley_types::export::import_json;
use galley_types::geometry::Direction;
use galley_types::list::ItemList;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Typesets main text into pages and applies the configured page processors.
///
/// Built with [`PipelineBuilder`]. A pipeline holds no state between runs, so typesetting the
/// same input twice yields equal documents.
#[derive(Debug)]
pub struct DocumentPipeline {
    typesetter: BasicTypesetter,
    paragraphs: ParagraphBuilder,
    paragraph_skip: f32,
    line_numbers: Option<LineNumbers>,
    marginalia: Option<Marginalia>,
}

impl DocumentPipeline {
    pub(crate) fn new(
        typesetter: BasicTypesetter,
        paragraphs: ParagraphBuilder,
        paragraph_skip: f32,
        line_numbers: Option<LineNumbers>,
        marginalia: Option<Marginalia>,
    ) -> Self {
        Self {
            typesetter,
            paragraphs,
            paragraph_skip,
            line_numbers,
            marginalia,
        }
    }

    pub fn typesetter(&self) -> &BasicTypesetter {
        &self.typesetter
    }

    /// Typesets a vertical main-text list of paragraphs.
    pub fn typeset(&self, main_text: ItemList) -> Result<Document, PipelineError> {
        let document = self.typesetter.typeset(main_text)?;
        log::info!(
            "Typeset {} lines on {} pages",
            document.line_count(),
            document.page_count()
        );

        let mut processors: Vec<&dyn PageProcessor> = Vec::new();
        if let Some(line_numbers) = &self.line_numbers {
            processors.push(line_numbers);
        }
        if let Some(marginalia) = &self.marginalia {
            processors.push(marginalia);
        }
        Ok(process_document(document, &processors)?)
    }

    /// Typesets plain text, with paragraphs separated by blank lines.
    pub fn typeset_text(&self, text: &str) -> Result<Document, PipelineError> {
        let main_text = main_text_from_str(text, &self.paragraphs, self.paragraph_skip);
        self.typeset(main_text)
    }

    /// Typesets an exported item list.
    ///
    /// A vertical list is taken as the main text; a horizontal list as its only paragraph.
    pub fn typeset_json(&self, json: &str) -> Result<Document, PipelineError> {
        let list = import_json(json)?.into_item_list()?;
        let main_text = match list.direction() {
            Direction::Horizontal => {
                let mut main_text = ItemList::vertical();
                main_text.push(list);
                main_text
            }
            _ => list,
        };
        self.typeset(main_text)
    }

    /// Typesets a file, choosing the input format from its extension: `.json` files hold an
    /// exported item list, anything else is plain text.
    pub fn typeset_file<P: AsRef<Path>>(&self, path: P) -> Result<Document, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => self.typeset_json(&source),
            _ => self.typeset_text(&source),
        }
    }

    /// Writes the document as tagged JSON.
    pub fn export<W: Write>(&self, document: &Document, mut writer: W) -> Result<W, PipelineError> {
        let json = document.to_json()?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(writer)
    }

    /// Writes a plain text outline of every page.
    pub fn render_outline<W: Write>(
        &self,
        document: &Document,
        writer: W,
    ) -> Result<W, PipelineError> {
        Ok(Box::new(OutlineRenderer::<W>::new()).render(writer, document)?)
    }
}
