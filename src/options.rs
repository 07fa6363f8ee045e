//! Compiler options.
//!
//! [`Options`] holds the values the compiler reads on every call.
//! [`OptionsUpdate`] is a partial set of options: fields left unset keep their
//! current value when the update is applied. Updates deserialize from the
//! camelCase JSON shape:
//!
//! ```json
//! { "obfuscate": false, "minify": true, "vendorPrefixes": { "transform": ["webkit", "ms"] } }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Vendor prefix table: camelCase property name to ordered prefix tokens.
pub type VendorPrefixes = IndexMap<String, Vec<String>>;

/// What to do with a rule block that has no direct declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptyBlocks {
    /// Omit the `selector { }` wrapper; nested rules are still emitted.
    #[default]
    Suppress,
    /// Always emit the wrapper, even when it is empty.
    Emit,
}

/// Options read by the compiler at call time.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Append a random suffix to class and animation names.
    pub obfuscate: bool,
    /// Strip the whitespace the compiler inserts.
    pub minify: bool,
    /// Prefixed declarations emitted before the unprefixed one.
    pub vendor_prefixes: VendorPrefixes,
    /// Policy for rule blocks without declarations.
    pub empty_blocks: EmptyBlocks,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            obfuscate: true,
            minify: false,
            vendor_prefixes: VendorPrefixes::new(),
            empty_blocks: EmptyBlocks::Suppress,
        }
    }
}

impl Options {
    /// Overwrites every field present in `update`.
    pub fn apply(&mut self, update: OptionsUpdate) {
        if let Some(obfuscate) = update.obfuscate {
            self.obfuscate = obfuscate;
        }
        if let Some(minify) = update.minify {
            self.minify = minify;
        }
        if let Some(prefixes) = update.vendor_prefixes {
            self.vendor_prefixes = prefixes;
        }
        if let Some(empty_blocks) = update.empty_blocks {
            self.empty_blocks = empty_blocks;
        }
    }

    /// Prefix tokens configured for `property`, if any.
    pub fn prefixes_for(&self, property: &str) -> Option<&[String]> {
        self.vendor_prefixes.get(property).map(|p| p.as_slice())
    }
}

/// A partial options object.
///
/// Unknown keys are ignored.
///
/// # Example
///
/// ```rust
/// use stylesheets::OptionsUpdate;
///
/// let update = OptionsUpdate::new()
///     .obfuscate(false)
///     .vendor_prefix("transform", ["webkit", "ms"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsUpdate {
    pub obfuscate: Option<bool>,
    pub minify: Option<bool>,
    pub vendor_prefixes: Option<VendorPrefixes>,
    pub empty_blocks: Option<EmptyBlocks>,
}

impl OptionsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn obfuscate(mut self, obfuscate: bool) -> Self {
        self.obfuscate = Some(obfuscate);
        self
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.minify = Some(minify);
        self
    }

    pub fn empty_blocks(mut self, policy: EmptyBlocks) -> Self {
        self.empty_blocks = Some(policy);
        self
    }

    /// Adds one vendor prefix entry, creating the table if needed.
    pub fn vendor_prefix<I, S>(mut self, property: &str, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vendor_prefixes
            .get_or_insert_with(VendorPrefixes::new)
            .insert(
                property.to_string(),
                prefixes.into_iter().map(Into::into).collect(),
            );
        self
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Combines two updates; fields set in `overrides` win.
    pub fn merge(self, overrides: OptionsUpdate) -> Self {
        Self {
            obfuscate: overrides.obfuscate.or(self.obfuscate),
            minify: overrides.minify.or(self.minify),
            vendor_prefixes: overrides.vendor_prefixes.or(self.vendor_prefixes),
            empty_blocks: overrides.empty_blocks.or(self.empty_blocks),
        }
    }

    /// Parses an update from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not an object of the expected
    /// shape (for example `vendorPrefixes` not mapping names to string lists).
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config {
            message: e.to_string(),
        })
    }

    /// Converts an already parsed JSON value into an update.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::Config {
                message: "options must be an object".to_string(),
            });
        }
        serde_json::from_value(value).map_err(|e| Error::Config {
            message: e.to_string(),
        })
    }
}
