//! # Stylesheets - style objects compiled to CSS
//!
//! `stylesheets` turns nested, camelCase style maps into CSS text and appends
//! it to a single stylesheet, generating collision-free class and keyframe
//! animation names along the way.
//!
//! ## Core Concepts
//!
//! - [`StyleValue`] / [`StyleMap`]: the style tree (numbers, strings, lists, nested maps)
//! - [`format_value`]: unit inference (`px`, `ms`, none) and list joining
//! - [`SelectorCompiler`]: the recursive walk producing rule blocks, pseudo-selectors, and media queries
//! - [`StyleSheets`]: a compiler instance owning options, name registries, and the sink
//! - [`CssSink`]: where generated CSS goes ([`Sheet`] keeps it in memory)
//!
//! ## Quick Start
//!
//! ```rust
//! use stylesheets::StyleSheets;
//! use serde_json::json;
//!
//! let mut sheets = StyleSheets::new();
//! let classes = sheets
//!     .create_unique_class_styles_json(json!({
//!         "button": {
//!             "padding": { "vertical": 4, "horizontal": 8 },
//!             "transition": ["color", 200],
//!             "hover": { "color": "red" }
//!         }
//!     }))
//!     .unwrap();
//!
//! // Obfuscation is on by default: "button_" plus five random letters.
//! assert!(classes["button"].starts_with("button_"));
//! assert!(sheets.css().unwrap().contains("transition: color 200ms;"));
//! ```
//!
//! ## Style Keys
//!
//! Within a style map each key is one of:
//!
//! - a camelCase property (`backgroundColor`); hyphens are rejected
//! - a nested pseudo-selector from [`NESTED_SELECTORS`] (`hover`, `before`, `firstChild`, ...)
//! - a media query starting with `@media`, only valid inside a tag or class
//!
//! A property whose value is a map is a shorthand sub-object:
//! `{ margin: { top: 10, horizontal: 0 } }` expands to `margin-top`,
//! `margin-right`, and `margin-left` declarations; `all` maps to the bare
//! property.
//!
//! ## Options
//!
//! Options are set once per compiler with [`StyleSheets::set_options`]:
//! obfuscation (default on), minification (default off), a vendor prefix
//! table, and the [`EmptyBlocks`] policy.

pub mod assemble;
pub mod compile;
pub mod document;
pub mod error;
pub mod format;
pub mod names;
pub mod options;
pub mod sheet;
pub mod value;

pub use assemble::{Generated, KeyframeMap, NameMap, StyleSheetMap, StyleSheets, StyleSheetsBuilder};
pub use compile::{
    is_media_query, SelectorCompiler, DOUBLE_COLON_SELECTORS, MEDIA_QUERY_PREFIX, NESTED_SELECTORS,
};
pub use document::{DocumentNames, StyleDocument};
pub use error::{Error, Result, MESSAGE_PREFIX};
pub use format::{format_value, to_spinal_case};
pub use names::{NameGenerator, NameKind, NameRegistry};
pub use options::{EmptyBlocks, Options, OptionsUpdate, VendorPrefixes};
pub use sheet::{minify, CssSink, FnSink, Sheet};
pub use value::{style_map_from_json, StyleMap, StyleValue};
