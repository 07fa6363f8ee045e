//! Selector compiler: the recursive walk from a style tree to CSS text.
//!
//! Each call to [`SelectorCompiler::compile`] produces one rule block for the
//! selector's direct declarations, followed by sibling blocks for every
//! nested pseudo-selector and media query:
//!
//! ```text
//! { a: { color: red, hover: { before: { content: '">"' } } } }
//!
//! a {
//!   color: red;
//! }
//!
//! a:hover::before {
//!   content: ">";
//! }
//! ```
//!
//! Pseudo-selector rules are never nested inside their parent block. Media
//! queries wrap a copy of the parent selector in an indented `@media` block.

use crate::error::{Error, Result};
use crate::format::{format_value, to_spinal_case};
use crate::options::{EmptyBlocks, Options};
use crate::value::{StyleMap, StyleValue};

/// One level of indentation.
pub const INDENT: &str = "  ";

/// Prefix that marks a key as a media query.
pub const MEDIA_QUERY_PREFIX: &str = "@media";

/// Pseudo-selectors written with `::`.
pub const DOUBLE_COLON_SELECTORS: &[&str] =
    &["before", "after", "firstLetter", "firstLine", "selection"];

/// Keys treated as nested pseudo-selectors rather than properties.
///
/// Pseudo-classes taking arguments (`lang`, `not`, `nthChild`, ...) are not
/// supported.
pub const NESTED_SELECTORS: &[&str] = &[
    "active",
    "after",
    "before",
    "checked",
    "disabled",
    "empty",
    "enabled",
    "firstChild",
    "firstLetter",
    "firstLine",
    "firstOfType",
    "focus",
    "hover",
    "inRange",
    "invalid",
    "lastChild",
    "lastOfType",
    "link",
    "onlyOfType",
    "onlyChild",
    "optional",
    "outOfRange",
    "readOnly",
    "readWrite",
    "required",
    "root",
    "selection",
    "target",
    "valid",
    "visited",
];

/// Returns true if `key` is a media query key.
pub fn is_media_query(key: &str) -> bool {
    key.starts_with(MEDIA_QUERY_PREFIX)
}

/// Returns the separator for a nested selector key, or `None` if `key` is not
/// a nested selector.
pub fn nested_selector_separator(key: &str) -> Option<&'static str> {
    if !NESTED_SELECTORS.contains(&key) {
        None
    } else if DOUBLE_COLON_SELECTORS.contains(&key) {
        Some("::")
    } else {
        Some(":")
    }
}

/// Compiles style maps to CSS text under a fixed set of options.
#[derive(Debug, Clone, Copy)]
pub struct SelectorCompiler<'a> {
    options: &'a Options,
}

/// Declarations collected for one rule block.
struct Block {
    padding: String,
    text: String,
    has_declarations: bool,
}

impl Block {
    fn new(level: usize) -> Self {
        Self {
            padding: INDENT.repeat(level + 1),
            text: String::new(),
            has_declarations: false,
        }
    }

    fn declare(&mut self, name: &str, value: &str) {
        self.has_declarations = true;
        self.text.push_str(&self.padding);
        self.text.push_str(&to_spinal_case(name));
        self.text.push_str(": ");
        self.text.push_str(value);
        self.text.push_str(";\n");
    }
}

impl<'a> SelectorCompiler<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// Compiles `styles` under `selector` at the given indentation level.
    ///
    /// # Errors
    ///
    /// - [`Error::MisplacedMediaQuery`] if `selector` is itself a media query
    /// - [`Error::HyphenatedProperty`] if a property key is not camelCase
    /// - [`Error::ExpectedMap`] if a nested selector or media query value is
    ///   not a map
    /// - [`Error::UnsupportedValue`] if a shorthand sub-value is a map
    pub fn compile(&self, selector: &str, styles: &StyleMap, level: usize) -> Result<String> {
        if is_media_query(selector) {
            return Err(Error::MisplacedMediaQuery {
                selector: selector.to_string(),
            });
        }

        let padding = INDENT.repeat(level);
        let mut block = Block::new(level);
        let mut nested = String::new();

        for (key, value) in styles {
            let media = is_media_query(key);
            if !media && key.contains('-') {
                return Err(Error::HyphenatedProperty {
                    property: key.clone(),
                });
            }

            if let Some(prefixes) = self.options.prefixes_for(key) {
                for prefix in prefixes {
                    let prefixed = format!("-{}-{}", prefix, key);
                    self.declare_property(&mut block, &prefixed, key, value)?;
                }
                self.declare_property(&mut block, key, key, value)?;
            } else if let Some(separator) = nested_selector_separator(key) {
                let inner = expect_map(key, value, "Nested selector")?;
                let child = format!("{}{}{}", selector, separator, to_spinal_case(key));
                nested.push_str(&self.compile(&child, inner, level)?);
            } else if media {
                let inner = expect_map(key, value, "Media query")?;
                nested.push('\n');
                nested.push_str(&padding);
                nested.push_str(key);
                nested.push_str(" {\n");
                nested.push_str(&self.compile(selector, inner, level + 1)?);
                nested.push_str(&padding);
                nested.push('\n');
                nested.push_str(&padding);
                nested.push_str("}\n");
            } else {
                self.declare_property(&mut block, key, key, value)?;
            }
        }

        let emit_wrapper =
            block.has_declarations || self.options.empty_blocks == EmptyBlocks::Emit;

        let mut out = String::new();
        if emit_wrapper {
            log::trace!("rule block {}", selector);
            out.push('\n');
            out.push_str(&padding);
            out.push_str(selector);
            out.push_str(" {\n");
            out.push_str(&block.text);
            out.push_str(&padding);
            out.push_str("}\n");
        }
        out.push_str(&nested);
        Ok(out)
    }

    /// Emits declarations for one property, expanding shorthand sub-objects.
    ///
    /// `name` is the (possibly vendor-prefixed) camelCase property name;
    /// `format_key` selects the unit and separator rules.
    fn declare_property(
        &self,
        block: &mut Block,
        name: &str,
        format_key: &str,
        value: &StyleValue,
    ) -> Result<()> {
        let StyleValue::Map(sides) = value else {
            block.declare(name, &format_value(format_key, value)?);
            return Ok(());
        };

        for (side, side_value) in sides {
            match side.as_str() {
                "all" => block.declare(name, &format_value(format_key, side_value)?),
                "vertical" => {
                    declare_side(block, name, format_key, "top", side_value)?;
                    declare_side(block, name, format_key, "bottom", side_value)?;
                }
                "horizontal" => {
                    declare_side(block, name, format_key, "right", side_value)?;
                    declare_side(block, name, format_key, "left", side_value)?;
                }
                other => declare_side(block, name, format_key, other, side_value)?,
            }
        }
        Ok(())
    }
}

fn declare_side(
    block: &mut Block,
    name: &str,
    format_key: &str,
    side: &str,
    value: &StyleValue,
) -> Result<()> {
    let composite = format!("{}-{}", format_key, side);
    let formatted = format_value(&composite, value)?;
    block.declare(&format!("{}-{}", name, side), &formatted);
    Ok(())
}

fn expect_map<'v>(key: &str, value: &'v StyleValue, context: &'static str) -> Result<&'v StyleMap> {
    value.as_map().ok_or_else(|| {
        log::debug!("{} {} is a {}, expected an object", context, key, value.kind());
        Error::ExpectedMap {
            key: key.to_string(),
            context,
        }
    })
}
