//! Generation command implementation.

use anyhow::{Context, Result};
use matchergen_core::{
    generate, parse_packages, write_output, GenerateConfig, PackageInput, PrettyFormatter, Request,
};

use crate::config_resolver::ConfigSource;
use crate::Cli;

/// Runs one generation: flags over configuration, then generate and write.
pub fn run(cli: &Cli, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let request = build_request(cli, &config.generate)?;
    let output = request.output_path();

    tracing::info!(
        "Generating matchers for {} into {}",
        request.type_names().join(", "),
        output.display()
    );

    let code = generate(&request, &PrettyFormatter).context("Failed to generate matchers")?;
    write_output(&output, &code)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}

/// Command-line flags take precedence over `defaults`.
fn build_request(cli: &Cli, defaults: &GenerateConfig) -> Result<Request> {
    let input = PackageInput::from_args(&cli.paths).context("Failed to read input paths")?;

    let source_module = cli.source_module.as_deref().unwrap_or(&defaults.source_module);
    let runtime = cli.runtime.as_deref().unwrap_or(&defaults.runtime);
    let packages = parse_packages(source_module, runtime)?;

    // Configured features only apply to directory input; `--tags` with files
    // is rejected by `validate`.
    let features = if cli.tags.is_empty() && input.is_files() {
        if !defaults.features.is_empty() {
            tracing::debug!(
                "Ignoring configured features [{}] for explicit files",
                defaults.features.join(", ")
            );
        }
        Vec::new()
    } else if cli.tags.is_empty() {
        defaults.features.clone()
    } else {
        cli.tags.clone()
    };

    let request = Request::new(cli.types.clone(), input)
        .features(features)
        .packages(packages)
        .output(cli.output.clone())
        .suffix(defaults.suffix.clone());
    request.validate()?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("matchergen").chain(args.iter().copied())).unwrap()
    }

    fn model_dir() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("human.rs"),
            "pub struct Human;\nimpl Human {\n    pub fn age(&self) -> u32 { 0 }\n}\n",
        )
        .unwrap();
        tmp
    }

    #[test]
    fn config_supplies_defaults() {
        let tmp = model_dir();
        let dir = tmp.path().to_str().unwrap();
        let defaults = GenerateConfig {
            suffix: "_match.rs".to_string(),
            ..GenerateConfig::default()
        };

        let request = build_request(&cli(&["-t", "Human", dir]), &defaults).unwrap();
        assert_eq!(request.output_path(), tmp.path().join("human_match.rs"));
    }

    #[test]
    fn flags_override_config() {
        let tmp = model_dir();
        let dir = tmp.path().to_str().unwrap();
        let defaults = GenerateConfig {
            runtime: "not a path".to_string(),
            ..GenerateConfig::default()
        };

        assert!(build_request(&cli(&["-t", "Human", dir]), &defaults).is_err());
        assert!(build_request(
            &cli(&["-t", "Human", "--runtime", "matchergen_runtime", dir]),
            &defaults
        )
        .is_ok());
    }

    #[test]
    fn tags_with_files_rejected() {
        let tmp = model_dir();
        let file = tmp.path().join("human.rs");
        let file = file.to_str().unwrap();

        let err = build_request(
            &cli(&["-t", "Human", "--tags", "nicknames", file]),
            &GenerateConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("--tags"));
    }

    #[test]
    fn configured_features_ignored_for_files() {
        let tmp = model_dir();
        let file = tmp.path().join("human.rs");
        let defaults = GenerateConfig {
            features: vec!["nicknames".to_string()],
            ..GenerateConfig::default()
        };

        let request = build_request(&cli(&["-t", "Human", file.to_str().unwrap()]), &defaults);
        assert!(request.is_ok());
    }

    #[test]
    fn configured_features_apply_to_directories() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("human.rs"),
            "pub struct Human;\n#[cfg(feature = \"nicknames\")]\nimpl Human {\n    pub fn age(&self) -> u32 { 0 }\n}\n",
        )
        .unwrap();
        let dir = tmp.path().to_str().unwrap();
        let defaults = GenerateConfig {
            features: vec!["nicknames".to_string()],
            ..GenerateConfig::default()
        };

        let request = build_request(&cli(&["-t", "Human", dir]), &defaults).unwrap();
        let code = generate(&request, &PrettyFormatter).unwrap();
        assert!(code.contains("age: u32"));
    }

    #[test]
    fn run_writes_default_output() {
        let tmp = model_dir();
        let dir = tmp.path().to_str().unwrap();

        run(&cli(&["-t", "Human", dir]), &ConfigSource::Default).unwrap();

        let written = fs::read_to_string(tmp.path().join("human_matcher.rs")).unwrap();
        assert!(written.starts_with("// Code generated by matchergen. DO NOT EDIT."));
        assert!(written.contains("pub struct HumanMatcher {"));
    }

    #[test]
    fn run_honours_explicit_output() {
        let tmp = model_dir();
        let dir = tmp.path().to_str().unwrap();
        let out: PathBuf = tmp.path().join("generated.rs");

        run(
            &cli(&["-t", "Human", "-o", out.to_str().unwrap(), dir]),
            &ConfigSource::Default,
        )
        .unwrap();
        assert!(out.exists());
        assert!(!tmp.path().join("human_matcher.rs").exists());
    }
}
