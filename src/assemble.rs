//! The stylesheet compiler instance.
//!
//! [`StyleSheets`] owns everything that lives for the lifetime of one
//! stylesheet: the options, the class and animation name registries, the
//! random name source, and the sink that receives generated CSS.
//!
//! # Example
//!
//! ```rust
//! use stylesheets::{OptionsUpdate, StyleSheets};
//! use serde_json::json;
//!
//! let mut sheets = StyleSheets::new();
//! sheets.set_options(OptionsUpdate::new().obfuscate(false));
//!
//! let classes = sheets
//!     .create_unique_class_styles_json(json!({ "button": { "color": "red" } }))
//!     .unwrap();
//!
//! assert_eq!(classes["button"], "button");
//! assert_eq!(sheets.css(), Some("\n.button {\n  color: red;\n}\n"));
//! ```

use indexmap::IndexMap;

use crate::compile::SelectorCompiler;
use crate::error::{Error, Result};
use crate::names::{NameGenerator, NameKind, NameRegistry};
use crate::options::{Options, OptionsUpdate};
use crate::sheet::{minify, CssSink, Sheet};
use crate::value::StyleMap;

/// Selector (tag or class name) to style map.
pub type StyleSheetMap = IndexMap<String, StyleMap>;

/// Animation name to percentage-keyed frames.
pub type KeyframeMap = IndexMap<String, IndexMap<String, StyleMap>>;

/// Original name to generated name.
pub type NameMap = IndexMap<String, String>;

/// Output of one generation call, before it reaches the sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generated {
    /// Names issued by this call. Empty for global tag styles.
    pub names: NameMap,
    /// The generated CSS, minified if the option is enabled.
    pub css: String,
}

enum Target {
    Sheet(Sheet),
    Sink(Box<dyn CssSink>),
}

impl Target {
    fn append(&mut self, css: &str) {
        match self {
            Target::Sheet(sheet) => sheet.append(css),
            Target::Sink(sink) => sink.append(css),
        }
    }
}

/// Compiles style maps into CSS and appends the result to a sink.
pub struct StyleSheets {
    options: Options,
    options_set: bool,
    class_names: NameRegistry,
    animation_names: NameRegistry,
    generator: NameGenerator,
    target: Target,
}

impl Default for StyleSheets {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StyleSheets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleSheets")
            .field("options", &self.options)
            .field("class_names", &self.class_names.len())
            .field("animation_names", &self.animation_names.len())
            .finish_non_exhaustive()
    }
}

impl StyleSheets {
    /// Creates a compiler writing to an in-memory [`Sheet`].
    pub fn new() -> Self {
        Self::from_parts(Target::Sheet(Sheet::new()), NameGenerator::new())
    }

    /// Starts building a compiler with a custom sink or seed.
    pub fn builder() -> StyleSheetsBuilder {
        StyleSheetsBuilder::default()
    }

    fn from_parts(target: Target, generator: NameGenerator) -> Self {
        Self {
            options: Options::default(),
            options_set: false,
            class_names: NameRegistry::new(),
            animation_names: NameRegistry::new(),
            generator,
            target,
        }
    }

    /// Applies an options update.
    ///
    /// Options are meant to be set once; later calls still apply but log a
    /// warning.
    pub fn set_options(&mut self, update: OptionsUpdate) {
        if self.options_set {
            log::warn!("You tried to set options more than once. This is not advised.");
        }
        self.options.apply(update);
        self.options_set = true;
    }

    /// Parses an options object from JSON and applies it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the options have the wrong shape. Nothing
    /// is applied in that case.
    pub fn set_options_json(&mut self, value: serde_json::Value) -> Result<()> {
        let update = OptionsUpdate::from_value(value)?;
        self.set_options(update);
        Ok(())
    }

    /// The options currently in effect.
    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn class_names(&self) -> &NameRegistry {
        &self.class_names
    }

    pub fn animation_names(&self) -> &NameRegistry {
        &self.animation_names
    }

    /// The accumulated CSS, if this compiler writes to its own [`Sheet`].
    pub fn css(&self) -> Option<&str> {
        match &self.target {
            Target::Sheet(sheet) => Some(sheet.as_str()),
            Target::Sink(_) => None,
        }
    }

    fn finish(&self, css: String) -> String {
        if self.options.minify {
            minify(&css)
        } else {
            css
        }
    }

    fn emit(&mut self, generated: &Generated) {
        if generated.css.is_empty() {
            return;
        }
        log::debug!(
            "appending {} bytes of css ({} names issued)",
            generated.css.len(),
            generated.names.len()
        );
        self.target.append(&generated.css);
    }

    /// Compiles tag styles without touching the sink.
    pub fn generate_global_tag_styles(&self, styles: &StyleSheetMap) -> Result<Generated> {
        let compiler = SelectorCompiler::new(&self.options);
        let mut css = String::new();
        for (tag, style) in styles {
            css.push_str(&compiler.compile(tag, style, 0)?);
        }
        Ok(Generated {
            names: NameMap::new(),
            css: self.finish(css),
        })
    }

    /// Compiles class styles under unique names without touching the sink.
    ///
    /// Issued names are registered only if every class compiles.
    pub fn generate_unique_class_styles(&mut self, styles: &StyleSheetMap) -> Result<Generated> {
        let compiler = SelectorCompiler::new(&self.options);
        let mut reservation = self.class_names.reserve(NameKind::Class);
        let mut names = NameMap::new();
        let mut css = String::new();

        for (class, style) in styles {
            let unique =
                reservation.unique_name(class, self.options.obfuscate, &mut self.generator)?;
            css.push_str(&compiler.compile(&format!(".{}", unique), style, 0)?);
            names.insert(class.clone(), unique);
        }

        reservation.commit();
        Ok(Generated {
            names,
            css: self.finish(css),
        })
    }

    /// Compiles keyframe animations under unique names without touching the
    /// sink.
    ///
    /// An animation whose frames produce no CSS still receives a name but
    /// emits no `@keyframes` block.
    pub fn generate_unique_keyframe_animations(
        &mut self,
        animations: &KeyframeMap,
    ) -> Result<Generated> {
        let compiler = SelectorCompiler::new(&self.options);
        let mut reservation = self.animation_names.reserve(NameKind::Animation);
        let mut names = NameMap::new();
        let mut css = String::new();

        for (animation, frames) in animations {
            let unique =
                reservation.unique_name(animation, self.options.obfuscate, &mut self.generator)?;

            let mut body = String::new();
            for (percentage, style) in frames {
                body.push_str(&compiler.compile(percentage, style, 1)?);
            }
            if !body.is_empty() {
                css.push_str("\n@keyframes ");
                css.push_str(&unique);
                css.push_str(" {\n");
                css.push_str(&body);
                css.push_str("\n}\n");
            }

            names.insert(animation.clone(), unique);
        }

        reservation.commit();
        Ok(Generated {
            names,
            css: self.finish(css),
        })
    }

    /// Compiles tag styles and appends them to the sink.
    ///
    /// Tag selectors are used exactly as given.
    pub fn create_global_tag_styles(&mut self, styles: &StyleSheetMap) -> Result<()> {
        let generated = self.generate_global_tag_styles(styles)?;
        self.emit(&generated);
        Ok(())
    }

    /// Compiles class styles under unique names, appends them to the sink,
    /// and returns the name mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NameConflict`] if obfuscation is disabled and a class
    /// name was already issued, or any compile error. On error no names are
    /// claimed and nothing is appended.
    pub fn create_unique_class_styles(&mut self, styles: &StyleSheetMap) -> Result<NameMap> {
        let generated = self.generate_unique_class_styles(styles)?;
        self.emit(&generated);
        Ok(generated.names)
    }

    /// Compiles keyframe animations under unique names, appends them to the
    /// sink, and returns the name mapping.
    pub fn create_unique_keyframe_animations(
        &mut self,
        animations: &KeyframeMap,
    ) -> Result<NameMap> {
        let generated = self.generate_unique_keyframe_animations(animations)?;
        self.emit(&generated);
        Ok(generated.names)
    }

    /// [`create_global_tag_styles`](Self::create_global_tag_styles) from JSON.
    pub fn create_global_tag_styles_json(&mut self, styles: serde_json::Value) -> Result<()> {
        let styles: StyleSheetMap = serde_json::from_value(styles)?;
        self.create_global_tag_styles(&styles)
    }

    /// [`create_unique_class_styles`](Self::create_unique_class_styles) from JSON.
    pub fn create_unique_class_styles_json(
        &mut self,
        styles: serde_json::Value,
    ) -> Result<NameMap> {
        let styles: StyleSheetMap = serde_json::from_value(styles)?;
        self.create_unique_class_styles(&styles)
    }

    /// [`create_unique_keyframe_animations`](Self::create_unique_keyframe_animations) from JSON.
    pub fn create_unique_keyframe_animations_json(
        &mut self,
        animations: serde_json::Value,
    ) -> Result<NameMap> {
        let animations: KeyframeMap = serde_json::from_value(animations)?;
        self.create_unique_keyframe_animations(&animations)
    }
}

/// Builder for [`StyleSheets`] with an external sink.
///
/// A sink is required: [`StyleSheetsBuilder::build`] fails with
/// [`Error::Setup`] when none was provided.
#[derive(Default)]
pub struct StyleSheetsBuilder {
    target: Option<Target>,
    seed: Option<u64>,
    options: Option<OptionsUpdate>,
}

impl StyleSheetsBuilder {
    /// Sets the sink that receives generated CSS.
    pub fn sink(mut self, sink: impl CssSink + 'static) -> Self {
        self.target = Some(Target::Sink(Box::new(sink)));
        self
    }

    /// Uses an in-memory [`Sheet`] as the sink, readable through
    /// [`StyleSheets::css`].
    pub fn in_memory(mut self) -> Self {
        self.target = Some(Target::Sheet(Sheet::new()));
        self
    }

    /// Seeds the name generator, making obfuscated names reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Initial options. Counts as the one expected options call.
    pub fn options(mut self, options: OptionsUpdate) -> Self {
        self.options = Some(options);
        self
    }

    pub fn build(self) -> Result<StyleSheets> {
        let target = self.target.ok_or(Error::Setup)?;
        let generator = match self.seed {
            Some(seed) => NameGenerator::with_seed(seed),
            None => NameGenerator::new(),
        };
        let mut sheets = StyleSheets::from_parts(target, generator);
        if let Some(options) = self.options {
            sheets.set_options(options);
        }
        Ok(sheets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Mutex;

    use crate::sheet::FnSink;

    fn plain() -> StyleSheets {
        let mut sheets = StyleSheets::new();
        sheets.set_options(OptionsUpdate::new().obfuscate(false));
        sheets
    }

    #[test]
    fn test_builder_without_sink_fails() {
        let err = StyleSheets::builder().seed(1).build().unwrap_err();
        assert_eq!(err, Error::Setup);
    }

    #[test]
    fn test_builder_with_sink() {
        let captured = Rc::new(RefCell::new(String::new()));
        let target = Rc::clone(&captured);
        let mut sheets = StyleSheets::builder()
            .sink(FnSink(move |css: &str| target.borrow_mut().push_str(css)))
            .options(OptionsUpdate::new().minify(true))
            .build()
            .unwrap();

        sheets
            .create_global_tag_styles_json(json!({ "p": { "color": "red" } }))
            .unwrap();

        assert_eq!(captured.borrow().as_str(), "p{color:red;}");
        assert_eq!(sheets.css(), None);
    }

    #[test]
    fn test_global_tag_styles() {
        let mut sheets = StyleSheets::new();
        sheets
            .create_global_tag_styles_json(json!({ "p": { "color": "red" } }))
            .unwrap();
        assert_eq!(sheets.css(), Some("\np {\n  color: red;\n}\n"));
    }

    #[test]
    fn test_class_styles_obfuscated() {
        let mut sheets = StyleSheets::builder().in_memory().seed(3).build().unwrap();
        let names = sheets
            .create_unique_class_styles_json(json!({ "myClass": { "color": "red" } }))
            .unwrap();

        let name = &names["myClass"];
        assert!(name.starts_with("myClass_"));
        assert_eq!(name.len(), "myClass_".len() + 5);
        assert!(sheets.class_names().contains(name));
    }

    #[test]
    fn test_class_styles_plain_conflict() {
        let mut sheets = plain();
        sheets
            .create_unique_class_styles_json(json!({ "header": { "color": "red" } }))
            .unwrap();
        let err = sheets
            .create_unique_class_styles_json(json!({ "header": { "color": "blue" } }))
            .unwrap_err();
        assert!(matches!(err, Error::NameConflict { kind: "class", .. }));
    }

    #[test]
    fn test_failed_batch_claims_no_names() {
        let mut sheets = plain();
        sheets
            .create_unique_class_styles_json(json!({ "taken": { "color": "red" } }))
            .unwrap();
        let before = sheets.css().unwrap().to_string();

        let result = sheets.create_unique_class_styles_json(json!({
            "first": { "color": "red" },
            "taken": { "color": "blue" }
        }));

        assert!(result.is_err());
        assert!(!sheets.class_names().contains("first"));
        assert_eq!(sheets.css().unwrap(), before);
    }

    #[test]
    fn test_compile_error_claims_no_names() {
        let mut sheets = plain();
        let result = sheets.create_unique_class_styles_json(json!({
            "ok": { "color": "red" },
            "bad": { "font-size": 3 }
        }));
        assert!(matches!(result, Err(Error::HyphenatedProperty { .. })));
        assert!(sheets.class_names().is_empty());
        assert_eq!(sheets.css(), Some(""));
    }

    #[test]
    fn test_registries_are_independent() {
        let mut sheets = plain();
        sheets
            .create_unique_class_styles_json(json!({ "spin": { "color": "red" } }))
            .unwrap();
        let names = sheets
            .create_unique_keyframe_animations_json(json!({
                "spin": { "0%": { "opacity": 0 } }
            }))
            .unwrap();
        assert_eq!(names["spin"], "spin");
    }

    #[test]
    fn test_keyframes() {
        let mut sheets = plain();
        sheets
            .create_unique_keyframe_animations_json(json!({
                "spin": {
                    "0%": { "transform": "rotate(0deg)" },
                    "100%": { "transform": "rotate(360deg)" }
                }
            }))
            .unwrap();
        assert_eq!(
            sheets.css().unwrap(),
            "\n@keyframes spin {\n\n  0% {\n    transform: rotate(0deg);\n  }\n\n  100% {\n    transform: rotate(360deg);\n  }\n\n}\n"
        );
    }

    #[test]
    fn test_empty_keyframes_still_named() {
        let mut sheets = plain();
        let names = sheets
            .create_unique_keyframe_animations_json(json!({ "fade": {} }))
            .unwrap();
        assert_eq!(names["fade"], "fade");
        assert_eq!(sheets.css(), Some(""));
        assert!(sheets.animation_names().contains("fade"));
    }

    #[test]
    fn test_animation_name_conflict() {
        let mut sheets = plain();
        let frames = json!({ "pulse": { "50%": { "opacity": 0.5 } } });
        sheets
            .create_unique_keyframe_animations_json(frames.clone())
            .unwrap();
        let err = sheets
            .create_unique_keyframe_animations_json(frames)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::NameConflict {
                kind: "keyframe animation",
                ..
            }
        ));
    }

    #[test]
    fn test_generate_does_not_emit() {
        let mut sheets = plain();
        let styles: StyleSheetMap =
            serde_json::from_value(json!({ "x": { "color": "red" } })).unwrap();
        let generated = sheets.generate_unique_class_styles(&styles).unwrap();
        assert_eq!(generated.css, "\n.x {\n  color: red;\n}\n");
        assert_eq!(sheets.css(), Some(""));
        assert!(sheets.class_names().contains("x"));
    }

    #[test]
    fn test_set_options_twice_still_applies() {
        let mut sheets = StyleSheets::new();
        sheets.set_options(OptionsUpdate::new().minify(true));
        sheets.set_options(OptionsUpdate::new().obfuscate(false));
        assert!(sheets.options().minify);
        assert!(!sheets.options().obfuscate);
    }

    #[test]
    fn test_builder_accepts_string_sink() {
        let mut sheets = StyleSheets::builder().sink(String::new()).build().unwrap();
        sheets
            .create_global_tag_styles_json(json!({ "p": { "color": "red" } }))
            .unwrap();
        assert_eq!(sheets.css(), None);
    }

    struct WarningLog;

    static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
    static LOGGER: WarningLog = WarningLog;

    impl log::Log for WarningLog {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                WARNINGS.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    fn repeated_options_warnings() -> usize {
        WARNINGS
            .lock()
            .unwrap()
            .iter()
            .filter(|w| w.contains("set options more than once"))
            .count()
    }

    #[test]
    fn test_set_options_twice_logs_advisory() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Warn);

        let mut sheets = StyleSheets::new();
        sheets.set_options(OptionsUpdate::new().minify(true));
        let before = repeated_options_warnings();
        sheets.set_options(OptionsUpdate::new().minify(false));
        assert!(repeated_options_warnings() > before);
    }

    #[test]
    fn test_set_options_json_invalid() {
        let mut sheets = StyleSheets::new();
        let err = sheets
            .set_options_json(json!({ "vendorPrefixes": "webkit" }))
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(sheets.options().vendor_prefixes.is_empty());
    }

    #[test]
    fn test_invalid_document_shape() {
        let mut sheets = StyleSheets::new();
        let err = sheets
            .create_global_tag_styles_json(json!({ "p": "red" }))
            .unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
    }
}
