//! Per-invocation generation: one package, any number of target types, one
//! output file.

use std::path::{Path, PathBuf};

use proc_macro2::Ident;
use thiserror::Error;
use tracing::{debug, info};

use crate::accessor::extract_accessors;
use crate::config::ConfigError;
use crate::format::{format_or_raw, SourceFormatter};
use crate::package::{LoadError, PackageInput, SourcePackage};
use crate::synth::{prelude, synthesize, MatcherSpec, Packages};

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by matchergen. DO NOT EDIT.";

/// Errors that can occur during generation.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum GenerateError {
    /// Invalid request.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// The source package could not be loaded.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    /// The output file could not be written.
    #[error("writing output {path}: {source}")]
    #[diagnostic(code(matchergen::write))]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Accumulates the matchers of one invocation.
///
/// The prelude is emitted once; every [`Generator::generate`] call appends one
/// matcher in call order.
pub struct Generator<'p> {
    package: &'p SourcePackage,
    packages: Packages,
    buf: String,
    type_names: Vec<String>,
}

impl<'p> Generator<'p> {
    /// Creates a generator over `package`.
    #[must_use]
    pub fn new(package: &'p SourcePackage, packages: Packages) -> Self {
        let mut buf = prelude(&packages).to_string();
        buf.push('\n');
        Self {
            package,
            packages,
            buf,
            type_names: Vec::new(),
        }
    }

    /// Appends the matcher for `type_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if `type_name` is not a Rust identifier.
    pub fn generate(&mut self, type_name: &str) -> Result<&mut Self, ConfigError> {
        let ident = parse_type_name(type_name)?;
        let accessors = extract_accessors(self.package, type_name);
        let spec = MatcherSpec::new(ident, accessors);

        debug!("Synthesizing {}", spec.matcher_name());
        self.buf
            .push_str(&synthesize(&spec, &self.packages).to_string());
        self.buf.push('\n');
        self.type_names.push(type_name.to_string());
        Ok(self)
    }

    /// Unformatted text accumulated so far.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.buf
    }

    /// Formats the accumulated text and prepends the generated-file header.
    ///
    /// Falls back to the raw text if formatting fails.
    #[must_use]
    pub fn finish(self, formatter: &dyn SourceFormatter) -> String {
        let body = format_or_raw(formatter, &self.buf);
        format!(
            "{GENERATED_HEADER}\n// source: {}, types: {}\n\n{body}",
            self.package.name(),
            self.type_names.join(", "),
        )
    }
}

/// One invocation of the generator.
#[derive(Debug, Clone)]
pub struct Request {
    type_names: Vec<String>,
    input: PackageInput,
    features: Vec<String>,
    packages: Packages,
    output: Option<PathBuf>,
    suffix: String,
}

impl Request {
    /// Creates a request for `type_names` over `input` with default settings.
    #[must_use]
    pub fn new(type_names: Vec<String>, input: PackageInput) -> Self {
        Self {
            type_names,
            input,
            features: Vec::new(),
            packages: Packages::default(),
            output: None,
            suffix: "_matcher.rs".to_string(),
        }
    }

    /// Sets the features enabled while reading sources.
    #[must_use]
    pub fn features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }

    /// Sets the module paths used by the generated code.
    #[must_use]
    pub fn packages(mut self, packages: Packages) -> Self {
        self.packages = packages;
        self
    }

    /// Sets an explicit output path.
    #[must_use]
    pub fn output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// Sets the suffix of the default output file name.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Requested type names, in generation order.
    #[must_use]
    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }

    /// Checks the request before any file is read.
    ///
    /// # Errors
    ///
    /// Returns an error if no type name is given, a type name is invalid, or
    /// features are combined with an explicit file list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.type_names.is_empty() {
            return Err(ConfigError::NoTypeNames);
        }
        for name in &self.type_names {
            parse_type_name(name)?;
        }
        if !self.features.is_empty() && self.input.is_files() {
            return Err(ConfigError::FeaturesWithFiles);
        }
        Ok(())
    }

    /// Output path: the explicit one, or `<dir>/<first type><suffix>` lower-cased.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let first = self.type_names.first().map_or("", String::as_str);
        let base = format!("{first}{}", self.suffix).to_lowercase();
        self.input.output_dir().join(base)
    }
}

/// Runs `request`: loads the package once and synthesizes every matcher.
///
/// # Errors
///
/// Returns an error if the request is invalid or the package cannot be loaded.
pub fn generate(request: &Request, formatter: &dyn SourceFormatter) -> Result<String, GenerateError> {
    request.validate()?;

    let package = SourcePackage::load(&request.input, &request.features)?;
    let mut generator = Generator::new(&package, request.packages.clone());
    for type_name in &request.type_names {
        generator.generate(type_name)?;
    }

    info!(
        "generated {} matcher(s) from package {}",
        request.type_names.len(),
        package.name()
    );
    Ok(generator.finish(formatter))
}

/// Writes generated source to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_output(path: &Path, source: &str) -> Result<(), GenerateError> {
    std::fs::write(path, source).map_err(|e| GenerateError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("wrote {}", path.display());
    Ok(())
}

fn parse_type_name(name: &str) -> Result<Ident, ConfigError> {
    syn::parse_str::<Ident>(name).map_err(|_| ConfigError::InvalidTypeName {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{FormatError, PrettyFormatter};

    const HUMAN: &str = r#"
pub struct Human { name: String, age: u32 }

impl Human {
    pub fn name(&self) -> &str { &self.name }
    pub fn age(&self) -> u32 { self.age }
}
"#;

    struct FailingFormatter;

    impl SourceFormatter for FailingFormatter {
        fn format(&self, source: &str) -> Result<String, FormatError> {
            Err(FormatError::Parse(syn::parse_file(&format!("{source} {{")).unwrap_err()))
        }
    }

    fn package() -> SourcePackage {
        SourcePackage::parse("model", [("human.rs", HUMAN)], &[]).unwrap()
    }

    #[test]
    fn test_prelude_emitted_once_for_many_types() {
        let package = package();
        let mut generator = Generator::new(&package, Packages::default());
        generator.generate("Human").unwrap().generate("Robot").unwrap();

        let raw = generator.raw();
        assert_eq!(raw.matches("use super :: * ;").count(), 1);
        assert!(raw.contains("pub struct HumanMatcher"));
        assert!(raw.contains("pub struct RobotMatcher"));
        assert!(raw.find("HumanMatcher") < raw.find("RobotMatcher"));
    }

    #[test]
    fn test_finish_prepends_header() {
        let package = package();
        let mut generator = Generator::new(&package, Packages::default());
        generator.generate("Human").unwrap();
        let source = generator.finish(&PrettyFormatter);

        let mut lines = source.lines();
        assert_eq!(lines.next(), Some(GENERATED_HEADER));
        assert_eq!(lines.next(), Some("// source: model, types: Human"));
        assert!(source.contains("pub struct HumanMatcher<'m> {"));
        syn::parse_file(&source).expect("formatted output should parse");
    }

    #[test]
    fn test_finish_falls_back_to_raw_text() {
        let package = package();
        let mut generator = Generator::new(&package, Packages::default());
        generator.generate("Human").unwrap();
        let raw = generator.raw().to_string();
        let source = generator.finish(&FailingFormatter);

        assert!(source.starts_with(GENERATED_HEADER));
        assert!(source.ends_with(&raw));
    }

    #[test]
    fn test_invalid_type_name() {
        let package = package();
        let mut generator = Generator::new(&package, Packages::default());
        assert!(matches!(
            generator.generate("not a type"),
            Err(ConfigError::InvalidTypeName { .. })
        ));
        assert!(matches!(
            generator.generate("struct"),
            Err(ConfigError::InvalidTypeName { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_missing_types() {
        let request = Request::new(vec![], PackageInput::Directory(PathBuf::from(".")));
        assert!(matches!(request.validate(), Err(ConfigError::NoTypeNames)));
    }

    #[test]
    fn test_validate_rejects_features_with_files() {
        let request = Request::new(
            vec!["Human".to_string()],
            PackageInput::Files(vec![PathBuf::from("model/human.rs")]),
        )
        .features(vec!["serde".to_string()]);
        assert!(matches!(
            request.validate(),
            Err(ConfigError::FeaturesWithFiles)
        ));
    }

    #[test]
    fn test_validate_allows_features_with_directory() {
        let request = Request::new(
            vec!["Human".to_string()],
            PackageInput::Directory(PathBuf::from("model")),
        )
        .features(vec!["serde".to_string()]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_default_output_path() {
        let request = Request::new(
            vec!["IDCard".to_string(), "Human".to_string()],
            PackageInput::Directory(PathBuf::from("src/model")),
        );
        assert_eq!(
            request.output_path(),
            PathBuf::from("src/model/idcard_matcher.rs")
        );

        let request = Request::new(
            vec!["Human".to_string()],
            PackageInput::Files(vec![PathBuf::from("src/model/human.rs")]),
        )
        .suffix("_match.rs");
        assert_eq!(
            request.output_path(),
            PathBuf::from("src/model/human_match.rs")
        );
    }

    #[test]
    fn test_explicit_output_path() {
        let request = Request::new(
            vec!["Human".to_string()],
            PackageInput::Directory(PathBuf::from("src/model")),
        )
        .output(Some(PathBuf::from("tests/support/human.rs")));
        assert_eq!(request.output_path(), PathBuf::from("tests/support/human.rs"));
    }
}
