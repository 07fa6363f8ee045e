//! Errors raised while configuring the compiler or compiling styles.

/// Prefix carried by every error message, for caller-side detection.
pub const MESSAGE_PREFIX: &str = "StyleSheets: ";

/// Error returned when a style map cannot be compiled.
///
/// All errors are fatal to the call that raised them. A failed call leaves the
/// sink and the name registries exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The stylesheet sink was not provided when building the compiler.
    #[error("StyleSheets: Could not locate a stylesheet sink. Provide one before compiling styles.")]
    Setup,

    /// A property key contains `-`; property names must be camelCase.
    #[error(
        "StyleSheets: Found \"-\" in style property name \"{property}\". Style property names must be defined in camelcase."
    )]
    HyphenatedProperty { property: String },

    /// A nested selector, media query, or keyframe body was not a map.
    #[error("StyleSheets: {context} \"{key}\" must be an object.")]
    ExpectedMap { key: String, context: &'static str },

    /// A media query was used as a top-level selector.
    #[error(
        "StyleSheets: Media query \"{selector}\" must be nested inside your tag / class."
    )]
    MisplacedMediaQuery { selector: String },

    /// A name is already in use and obfuscation is disabled.
    #[error("StyleSheets: The {kind} name \"{name}\" is already in use, please choose another.")]
    NameConflict { kind: &'static str, name: String },

    /// The options object has the wrong shape.
    #[error("StyleSheets: Invalid options: {message}")]
    Config { message: String },

    /// A value cannot be represented as CSS text.
    #[error("StyleSheets: Unsupported value for \"{key}\": {reason}")]
    UnsupportedValue { key: String, reason: String },

    /// Input text is not a valid style document.
    #[error("StyleSheets: Invalid style document: {message}")]
    Json { message: String },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
