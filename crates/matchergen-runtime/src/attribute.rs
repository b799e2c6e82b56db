//! Attributes recorded by the comparator and their text rendering.

use std::fmt;

/// Type names rendered as quoted plain text instead of re-quoted `Debug`.
const SCALAR_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
    "bool",
];

/// A captured field value.
///
/// The value is rendered with `Debug` at capture time, so an attribute never
/// borrows from the matcher or from the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// An integer or boolean, holding its textual form.
    Scalar(String),
    /// Any other value, holding its `Debug` rendering.
    Other(String),
}

impl Value {
    /// Captures `value`, classifying it by its static type.
    #[must_use]
    pub fn capture<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        let text = format!("{value:?}");
        if SCALAR_TYPES.contains(&std::any::type_name::<T>()) {
            Self::Scalar(text)
        } else {
            Self::Other(text)
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(text) => write!(f, "\"{text}\""),
            Self::Other(text) => write!(f, "{text:?}"),
        }
    }
}

/// One field's expected or actual value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Field name, as written in the generated matcher.
    pub name: String,
    /// Captured value.
    pub value: Value,
}

impl Attribute {
    /// Creates an attribute by capturing `value`.
    #[must_use]
    pub fn new<T: fmt::Debug + ?Sized>(name: impl Into<String>, value: &T) -> Self {
        Self {
            name: name.into(),
            value: Value::capture(value),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Renders attributes as space-separated `name=value` tokens.
#[must_use]
pub fn format_attributes(attributes: &[Attribute]) -> String {
    attributes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_quoted_once() {
        assert_eq!(Attribute::new("age", &30).to_string(), r#"age="30""#);
        assert_eq!(Attribute::new("count", &7_u64).to_string(), r#"count="7""#);
        assert_eq!(Attribute::new("delta", &-3_i8).to_string(), r#"delta="-3""#);
    }

    #[test]
    fn booleans_are_quoted_once() {
        assert_eq!(
            Attribute::new("active", &true).to_string(),
            r#"active="true""#
        );
    }

    #[test]
    fn text_is_quoted_twice() {
        assert_eq!(
            Attribute::new("name", &"Alice").to_string(),
            r#"name="\"Alice\"""#
        );
        assert_eq!(
            Attribute::new("name", &String::from("Alice")).to_string(),
            r#"name="\"Alice\"""#
        );
    }

    #[test]
    fn other_values_quote_their_debug_text() {
        assert_eq!(
            Attribute::new("tags", &vec![1, 2]).to_string(),
            r#"tags="[1, 2]""#
        );
        assert_eq!(
            Attribute::new("nick", &Some("al")).to_string(),
            r#"nick="Some(\"al\")""#
        );
    }

    #[test]
    fn chars_quote_their_debug_text() {
        assert_eq!(Attribute::new("initial", &'a').to_string(), r#"initial="'a'""#);
    }

    #[test]
    fn references_to_integers_are_not_scalars() {
        let age = 30;
        assert_eq!(Value::capture(&&age), Value::Other("30".to_string()));
        assert_eq!(Value::capture(&age), Value::Scalar("30".to_string()));
    }

    #[test]
    fn format_joins_with_spaces() {
        let attributes = vec![Attribute::new("age", &30), Attribute::new("name", &"Alice")];
        insta::assert_snapshot!(format_attributes(&attributes), @r#"age="30" name="\"Alice\"""#);
    }

    #[test]
    fn format_empty_is_empty() {
        assert_eq!(format_attributes(&[]), "");
    }
}
