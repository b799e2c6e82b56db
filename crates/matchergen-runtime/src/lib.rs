//! # matchergen-runtime
//!
//! Runtime support for matchers generated by `matchergen`.
//!
//! Generated matchers never compare fields themselves. They hand every
//! expected/actual pair to a [`Comparator`], which keeps only the pairs that
//! differ and renders them for assertion failures.
//!
//! - [`Matcher`] is the protocol every generated matcher implements
//! - [`Candidate`] is the object-safe view over the value under test
//! - [`Comparator`] accumulates mismatching [`Attribute`]s
//! - [`verify`] turns a matcher run into a `Result` for tests
//!
//! ## Example
//!
//! ```ignore
//! use matchergen_runtime::{verify, Matcher};
//!
//! let mut matcher = HumanMatcher::new("Alice", 30);
//! verify(&mut matcher, &Human::new("Alice", 30))?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attribute;
mod comparator;
mod matcher;

pub use attribute::{format_attributes, Attribute, Value};
pub use comparator::Comparator;
pub use matcher::{verify, Candidate, Matcher, Mismatch};
