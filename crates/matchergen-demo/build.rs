//! Generates `model_matcher.rs` for the types in `src/model`.

use anyhow::{Context, Result};
use matchergen_core::{generate, write_output, PackageInput, Packages, PrettyFormatter, Request};
use std::path::PathBuf;

const TYPES: [&str; 3] = ["Human", "IdCard", "Badge"];

fn main() -> Result<()> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let model = manifest_dir.join("src/model");
    println!("cargo:rerun-if-changed={}", model.display());

    let mut features = Vec::new();
    if std::env::var_os("CARGO_FEATURE_NICKNAMES").is_some() {
        features.push("nicknames".to_string());
    }

    let output = PathBuf::from(std::env::var("OUT_DIR")?).join("model_matcher.rs");
    let request = Request::new(
        TYPES.iter().map(ToString::to_string).collect(),
        PackageInput::Directory(model),
    )
    .features(features)
    .packages(Packages::parse("crate::model", "matchergen_runtime")?)
    .output(Some(output.clone()));

    let code = generate(&request, &PrettyFormatter).context("Failed to generate model matchers")?;
    write_output(&output, &code)?;
    Ok(())
}
