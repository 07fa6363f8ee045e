//! Whole style documents.
//!
//! A document bundles options with the three kinds of styles so a complete
//! stylesheet can be described in one JSON file:
//!
//! ```json
//! {
//!   "options": { "obfuscate": false },
//!   "tags": { "body": { "margin": 0 } },
//!   "classes": { "button": { "color": "red" } },
//!   "animations": { "spin": { "0%": { "opacity": 0 } } }
//! }
//! ```
//!
//! Sections are compiled in the order options, tags, animations, classes, so
//! class rules can refer to animation names issued by the same document.

use serde::{Deserialize, Serialize};

use crate::assemble::{KeyframeMap, NameMap, StyleSheetMap, StyleSheets};
use crate::error::Result;
use crate::options::OptionsUpdate;

/// A complete style document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleDocument {
    #[serde(default)]
    pub options: Option<serde_json::Value>,
    #[serde(default)]
    pub tags: StyleSheetMap,
    #[serde(default)]
    pub classes: StyleSheetMap,
    #[serde(default)]
    pub animations: KeyframeMap,
}

impl StyleDocument {
    /// Parses a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Names issued while compiling a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentNames {
    pub classes: NameMap,
    pub animations: NameMap,
}

impl StyleSheets {
    /// Compiles every section of `document` and appends the CSS to the sink.
    ///
    /// Sections are emitted one after another; if a later section fails, the
    /// CSS of earlier sections has already been appended.
    pub fn compile_document(&mut self, document: StyleDocument) -> Result<DocumentNames> {
        self.compile_document_with(document, OptionsUpdate::new())
    }

    /// Like [`compile_document`](Self::compile_document), with `overrides`
    /// taking precedence over the document's own options.
    ///
    /// The merged options are applied in a single call.
    pub fn compile_document_with(
        &mut self,
        document: StyleDocument,
        overrides: OptionsUpdate,
    ) -> Result<DocumentNames> {
        let options = match document.options {
            Some(value) => OptionsUpdate::from_value(value)?,
            None => OptionsUpdate::new(),
        }
        .merge(overrides);
        if !options.is_empty() {
            self.set_options(options);
        }
        self.create_global_tag_styles(&document.tags)?;
        let animations = self.create_unique_keyframe_animations(&document.animations)?;
        let classes = self.create_unique_class_styles(&document.classes)?;
        Ok(DocumentNames {
            classes,
            animations,
        })
    }
}
