//! Formatting of synthesized source text.

use thiserror::Error;
use tracing::warn;

/// Errors reported by a [`SourceFormatter`].
#[derive(Debug, Error, miette::Diagnostic)]
pub enum FormatError {
    /// The synthesized text is not a valid Rust file.
    #[error("invalid Rust generated: {0}")]
    #[diagnostic(code(matchergen::format::parse))]
    Parse(#[from] syn::Error),
}

/// Turns raw synthesized text into canonically formatted source.
pub trait SourceFormatter {
    /// Formats `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` cannot be formatted.
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Formats through `syn` and `prettyplease`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyFormatter;

impl SourceFormatter for PrettyFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let file = syn::parse_file(source)?;
        Ok(prettyplease::unparse(&file))
    }
}

/// Formats `source`, falling back to the raw text when formatting fails.
#[must_use]
pub fn format_or_raw(formatter: &dyn SourceFormatter, source: &str) -> String {
    match formatter.format(source) {
        Ok(formatted) => formatted,
        Err(e) => {
            warn!("internal error: {e}");
            warn!("compile the generated file to analyze the error");
            source.to_string()
        }
    }
}
