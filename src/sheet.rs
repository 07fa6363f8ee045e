//! Stylesheet sinks and minification.

use std::fmt;

/// An append-only target for generated CSS text.
///
/// This is the only capability the compiler needs from the surrounding
/// document: text is appended in call order and never removed or reordered.
pub trait CssSink {
    fn append(&mut self, css: &str);
}

/// In-memory stylesheet buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    text: String,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full stylesheet text appended so far.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl CssSink for Sheet {
    fn append(&mut self, css: &str) {
        self.text.push_str(css);
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl CssSink for String {
    fn append(&mut self, css: &str) {
        self.push_str(css);
    }
}

/// Sink that forwards every chunk to a closure.
pub struct FnSink<F>(pub F);

impl<F: FnMut(&str)> CssSink for FnSink<F> {
    fn append(&mut self, css: &str) {
        (self.0)(css)
    }
}

/// Removes the whitespace the compiler inserts around generated rules.
///
/// Newlines, indentation, the space before `{`, and the space after a
/// declaration's colon are dropped. Whitespace inside values is kept, so
/// `transition: ease-in-out 1000ms;` becomes `transition:ease-in-out 1000ms;`.
/// A value spanning several lines is copied verbatim, newlines included.
///
/// ```rust
/// use stylesheets::minify;
///
/// assert_eq!(minify("\np {\n  color: red;\n}\n"), "p{color:red;}");
/// ```
pub fn minify(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut open: Option<String> = None;

    for line in css.lines() {
        if let Some(declaration) = open.as_mut() {
            declaration.push('\n');
            declaration.push_str(line);
            if line.ends_with(';') {
                push_declaration(&mut out, declaration);
                open = None;
            }
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(head) = trimmed.strip_suffix('{') {
            out.push_str(head.trim_end());
            out.push('{');
        } else if trimmed == "}" {
            out.push('}');
        } else if trimmed.ends_with(';') {
            push_declaration(&mut out, trimmed);
        } else {
            // Value continues on the next line.
            open = Some(line.trim_start().to_string());
        }
    }

    if let Some(declaration) = open {
        out.push_str(&declaration);
    }
    out
}

fn push_declaration(out: &mut String, declaration: &str) {
    match declaration.split_once(": ") {
        Some((property, value)) => {
            out.push_str(property);
            out.push(':');
            out.push_str(value);
        }
        None => out.push_str(declaration),
    }
}
