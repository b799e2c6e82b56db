//! Mismatch accumulation for generated matchers.

use std::fmt::Debug;

use crate::attribute::{format_attributes, Attribute};

/// Records the fields that differ between an expected and an actual value.
///
/// `wanted[i]` and `got[i]` always describe the same field. Fields that
/// compare equal leave no trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparator {
    wanted: Vec<Attribute>,
    got: Vec<Attribute>,
}

impl Comparator {
    /// Creates an empty comparator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares `want` against `got`, recording both under `name` when they differ.
    pub fn equal<T>(&mut self, name: &str, want: &T, got: &T)
    where
        T: PartialEq + Debug + ?Sized,
    {
        if want != got {
            self.wanted.push(Attribute::new(name, want));
            self.got.push(Attribute::new(name, got));
        }
    }

    /// Returns `true` when at least one recorded field differs.
    ///
    /// Generated predicates return this value as-is, so `true` means the
    /// candidate does *not* match.
    #[must_use]
    pub fn matches(&self) -> bool {
        !self.wanted.is_empty()
    }

    /// Expected values of the mismatching fields, in comparison order.
    #[must_use]
    pub fn wanted(&self) -> &[Attribute] {
        &self.wanted
    }

    /// Actual values of the mismatching fields, in comparison order.
    #[must_use]
    pub fn got(&self) -> &[Attribute] {
        &self.got
    }

    /// Renders the expected values of the mismatching fields.
    #[must_use]
    pub fn describe_wanted(&self) -> String {
        format_attributes(&self.wanted)
    }

    /// Renders the actual values of the mismatching fields.
    #[must_use]
    pub fn describe_got(&self) -> String {
        format_attributes(&self.got)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn equal_values_leave_no_trace() {
        let mut comparator = Comparator::new();
        comparator.equal("name", &"Alice", &"Alice");
        comparator.equal("age", &30, &30);

        assert!(!comparator.matches());
        assert!(comparator.wanted().is_empty());
        assert!(comparator.got().is_empty());
    }

    #[test]
    fn mismatch_is_recorded_at_shared_index() {
        let mut comparator = Comparator::new();
        comparator.equal("name", &"Alice", &"Alice");
        comparator.equal("age", &30, &31);

        assert!(comparator.matches());
        assert_eq!(comparator.wanted().len(), 1);
        assert_eq!(comparator.got().len(), 1);
        assert_eq!(comparator.wanted()[0].name, "age");
        assert_eq!(comparator.got()[0].name, "age");
        assert_eq!(comparator.wanted()[0].value, Value::Scalar("30".to_string()));
        assert_eq!(comparator.got()[0].value, Value::Scalar("31".to_string()));
    }

    #[test]
    fn mismatches_keep_comparison_order() {
        let mut comparator = Comparator::new();
        comparator.equal("b", &1, &2);
        comparator.equal("a", &"x", &"y");

        let names: Vec<&str> = comparator.wanted().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(comparator.describe_wanted(), r#"b="1" a="\"x\"""#);
        assert_eq!(comparator.describe_got(), r#"b="2" a="\"y\"""#);
    }

    #[test]
    fn unsized_values_compare_through_references() {
        let mut comparator = Comparator::new();
        comparator.equal::<str>("name", "Alice", "Bob");

        assert!(comparator.matches());
        assert_eq!(comparator.describe_got(), r#"name="\"Bob\"""#);
    }

    #[test]
    fn empty_comparator_describes_nothing() {
        let comparator = Comparator::new();
        assert!(!comparator.matches());
        assert_eq!(comparator.describe_wanted(), "");
        assert_eq!(comparator.describe_got(), "");
    }
}
