//! A small domain model with matchers generated at build time.
//!
//! ```
//! use matchergen_demo::model::Human;
//! use matchergen_demo::modeltest::HumanMatcher;
//! use matchergen_runtime::verify;
//!
//! let mut matcher = HumanMatcher::new("Alice", 30);
//! assert!(verify(&mut matcher, &Human::new("Alice", 30)).is_ok());
//! ```

pub mod model;
pub mod types;

/// Matchers for [`model`], generated by `build.rs`.
pub mod modeltest {
    include!(concat!(env!("OUT_DIR"), "/model_matcher.rs"));
}
