//! Value formatting and property name conversion.
//!
//! [`format_value`] turns one [`StyleValue`] into CSS text using the property
//! key to decide unit suffixes and list separators:
//!
//! | Property category | Numeric `n` (non-zero) |
//! |-------------------|------------------------|
//! | [`NO_SUFFIX_PROPERTIES`] | `n` |
//! | [`TIME_SUFFIX_PROPERTIES`] | `nms` |
//! | anything else | `npx` |
//!
//! Zero is always emitted as `0`.

use crate::error::{Error, Result};
use crate::value::StyleValue;

/// Properties whose list values are joined with `", "`.
pub const COMMA_SEPARATED_PROPERTIES: &[&str] = &["fontFamily"];

/// Properties whose numbers are emitted without a unit.
pub const NO_SUFFIX_PROPERTIES: &[&str] = &["opacity", "animationIterationCount"];

/// Properties whose numbers are durations in milliseconds.
pub const TIME_SUFFIX_PROPERTIES: &[&str] = &[
    "transition",
    "transitionDuration",
    "transitionDelay",
    "animation",
    "animationDuration",
    "animationDelay",
];

/// Formats a style value for the given property key.
///
/// Lists are formatted element by element with the same key. Nested maps
/// cannot be formatted and produce [`Error::UnsupportedValue`].
///
/// # Example
///
/// ```rust
/// use stylesheets::{format_value, StyleValue};
///
/// let value = StyleValue::from(vec![StyleValue::from("ease-in-out"), 1000.into(), 0.into()]);
/// assert_eq!(format_value("transition", &value).unwrap(), "ease-in-out 1000ms 0");
/// assert_eq!(format_value("width", &StyleValue::from(0)).unwrap(), "0");
/// ```
pub fn format_value(key: &str, value: &StyleValue) -> Result<String> {
    match value {
        StyleValue::List(items) => {
            let separator = if COMMA_SEPARATED_PROPERTIES.contains(&key) {
                ", "
            } else {
                " "
            };
            let parts = items
                .iter()
                .map(|item| format_value(key, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(parts.join(separator))
        }
        StyleValue::Number(n) => format_number(key, *n),
        StyleValue::Text(text) => Ok(text.clone()),
        StyleValue::Map(_) => Err(Error::UnsupportedValue {
            key: key.to_string(),
            reason: "objects cannot be used as values here".to_string(),
        }),
    }
}

fn format_number(key: &str, n: f64) -> Result<String> {
    if !n.is_finite() {
        return Err(Error::UnsupportedValue {
            key: key.to_string(),
            reason: format!("{} is not a finite number", n),
        });
    }
    if n == 0.0 {
        return Ok("0".to_string());
    }
    if NO_SUFFIX_PROPERTIES.contains(&key) {
        Ok(format!("{}", n))
    } else if TIME_SUFFIX_PROPERTIES.contains(&key) {
        Ok(format!("{}ms", n))
    } else {
        Ok(format!("{}px", n))
    }
}

/// Converts a camelCase name to spinal-case.
///
/// A hyphen is inserted before every uppercase letter that follows a
/// lowercase letter, then the whole string is lowercased.
///
/// ```rust
/// use stylesheets::to_spinal_case;
///
/// assert_eq!(to_spinal_case("backgroundColor"), "background-color");
/// assert_eq!(to_spinal_case("-webkit-boxShadow"), "-webkit-box-shadow");
/// ```
pub fn to_spinal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut previous_lower = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() && previous_lower {
            out.push('-');
        }
        // A consumed uppercase letter never starts a new hyphen.
        previous_lower = c.is_ascii_lowercase();
        out.push(c.to_ascii_lowercase());
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn zero_never_gets_a_unit(key in "[a-z][a-zA-Z]{0,20}") {
            prop_assert_eq!(format_value(&key, &StyleValue::Number(0.0)).unwrap(), "0");
        }

        #[test]
        fn zero_never_gets_a_unit_for_known_categories(
            index in 0usize..(NO_SUFFIX_PROPERTIES.len() + TIME_SUFFIX_PROPERTIES.len())
        ) {
            let key = NO_SUFFIX_PROPERTIES
                .iter()
                .chain(TIME_SUFFIX_PROPERTIES.iter())
                .nth(index)
                .copied()
                .unwrap();
            prop_assert_eq!(format_value(key, &StyleValue::Number(0.0)).unwrap(), "0");
        }

        #[test]
        fn spinal_case_is_lowercase_without_double_hyphens(name in "[a-z][a-zA-Z]{0,30}") {
            let spinal = to_spinal_case(&name);
            prop_assert_eq!(spinal.to_lowercase(), spinal.clone());
            prop_assert!(!spinal.contains("--"));
            prop_assert_eq!(spinal.replace('-', ""), name.to_lowercase());
        }
    }
}
