//! # matchergen-core
//!
//! Generates test matchers from the accessor methods of Rust types.
//!
//! A matcher captures one expected value per accessor of a target type and
//! compares a candidate against them, recording every differing attribute.
//! The generated code depends only on `matchergen-runtime`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use matchergen_core::{generate, write_output, PackageInput, PrettyFormatter, Request};
//!
//! let input = PackageInput::from_args(&["src/model".into()])?;
//! let request = Request::new(vec!["Human".to_string()], input);
//! let source = generate(&request, &PrettyFormatter)?;
//! write_output(&request.output_path(), &source)?;
//! ```
//!
//! ## Pipeline
//!
//! 1. [`SourcePackage::load`] reads and parses the `.rs` files of one module
//!    directory, dropping items disabled by the enabled features.
//! 2. [`extract_accessors`] finds the public `&self` methods of the target type.
//! 3. [`synthesize`] emits the matcher tokens.
//! 4. [`Generator::finish`] formats the file and prepends the header.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod accessor;
pub mod cfg;
pub mod config;
pub mod format;
pub mod generator;
pub mod package;
pub mod synth;

pub use accessor::{extract_accessors, Accessor};
pub use cfg::CfgEvaluator;
pub use config::{parse_packages, Config, ConfigError, GenerateConfig};
pub use format::{format_or_raw, FormatError, PrettyFormatter, SourceFormatter};
pub use generator::{generate, write_output, GenerateError, Generator, Request, GENERATED_HEADER};
pub use package::{LoadError, PackageInput, SourceFile, SourcePackage};
pub use synth::{prelude, synthesize, MatcherSpec, Packages};
