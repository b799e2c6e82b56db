//! Loading of source packages: the `.rs` files of a single directory.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::cfg::CfgEvaluator;

/// Errors that can occur while loading a source package.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum LoadError {
    /// IO error reading a file or directory.
    #[error("IO error on {path}: {source}")]
    #[diagnostic(code(matchergen::load::io))]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Error parsing a Rust source file.
    #[error("Parse error in {path}: {message}")]
    #[diagnostic(code(matchergen::load::parse))]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// An explicit input file is not a Rust source file.
    #[error("{path} is not a .rs file")]
    #[diagnostic(code(matchergen::load::not_rust))]
    NotRustFile {
        /// Offending path.
        path: PathBuf,
    },

    /// No source files remained after discovery and cfg filtering.
    #[error("no source package matching {patterns}")]
    #[diagnostic(
        code(matchergen::load::no_package),
        help("pass a directory containing .rs files, or the files themselves")
    )]
    NoPackage {
        /// Input patterns, space separated.
        patterns: String,
    },

    /// Explicit files spread over more than one directory.
    #[error("{count} packages matching {patterns}")]
    #[diagnostic(
        code(matchergen::load::multiple_packages),
        help("all files must live in the same directory")
    )]
    MultiplePackages {
        /// Number of distinct directories.
        count: usize,
        /// Input patterns, space separated.
        patterns: String,
    },

    /// Invalid glob pattern built from the input directory.
    #[error("Invalid glob pattern: {0}")]
    #[diagnostic(code(matchergen::load::glob))]
    Glob(#[from] glob::PatternError),
}

/// What the user pointed the generator at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageInput {
    /// Every `.rs` file directly inside a directory.
    Directory(PathBuf),
    /// An explicit list of files belonging to one directory.
    Files(Vec<PathBuf>),
}

impl PackageInput {
    /// Interprets positional arguments: none means the current directory, a
    /// single directory means directory mode, anything else is a file list.
    ///
    /// # Errors
    ///
    /// Returns an error if a single argument cannot be inspected.
    pub fn from_args(args: &[PathBuf]) -> Result<Self, LoadError> {
        match args {
            [] => Ok(Self::Directory(PathBuf::from("."))),
            [single] => {
                let metadata = std::fs::metadata(single).map_err(|e| LoadError::Io {
                    path: single.clone(),
                    source: e,
                })?;
                if metadata.is_dir() {
                    Ok(Self::Directory(single.clone()))
                } else {
                    Ok(Self::Files(vec![single.clone()]))
                }
            }
            many => Ok(Self::Files(many.to_vec())),
        }
    }

    /// Returns `true` for an explicit file list.
    #[must_use]
    pub fn is_files(&self) -> bool {
        matches!(self, Self::Files(_))
    }

    /// Directory the default output file is placed in.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        match self {
            Self::Directory(dir) => dir.clone(),
            Self::Files(files) => files
                .first()
                .and_then(|f| f.parent())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        }
    }

    fn patterns(&self) -> String {
        match self {
            Self::Directory(dir) => dir.display().to_string(),
            Self::Files(files) => files
                .iter()
                .map(|f| f.display().to_string())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// One parsed source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path the file was read from.
    pub path: PathBuf,
    /// Parsed AST, with cfg-disabled items removed.
    pub ast: syn::File,
}

/// The parsed files of one source package, in file order.
#[derive(Debug, Clone)]
pub struct SourcePackage {
    name: String,
    files: Vec<SourceFile>,
}

impl SourcePackage {
    /// Loads the package described by `input` with `features` enabled.
    ///
    /// Directory files are read in lexicographic order; explicit files in the
    /// order given.
    ///
    /// # Errors
    ///
    /// Returns an error if no file or files from several directories match,
    /// or if any file cannot be read or parsed.
    pub fn load(input: &PackageInput, features: &[String]) -> Result<Self, LoadError> {
        let paths = match input {
            PackageInput::Directory(dir) => discover_files(dir)?,
            PackageInput::Files(files) => {
                if let Some(path) = files
                    .iter()
                    .find(|f| f.extension().map_or(true, |ext| ext != "rs"))
                {
                    return Err(LoadError::NotRustFile { path: path.clone() });
                }
                files.clone()
            }
        };

        if paths.is_empty() {
            return Err(LoadError::NoPackage {
                patterns: input.patterns(),
            });
        }

        let dirs: BTreeSet<PathBuf> = paths.iter().map(|p| normalized_parent(p)).collect();
        if dirs.len() > 1 {
            return Err(LoadError::MultiplePackages {
                count: dirs.len(),
                patterns: input.patterns(),
            });
        }

        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let content = std::fs::read_to_string(&path).map_err(|e| LoadError::Io {
                path: path.clone(),
                source: e,
            })?;
            sources.push((path, content));
        }

        let name = package_name(input);
        let package = Self::parse(name, sources, features)?;
        if package.files.is_empty() {
            return Err(LoadError::NoPackage {
                patterns: input.patterns(),
            });
        }

        info!("found package {}", package.name);
        Ok(package)
    }

    /// Builds a package from in-memory sources.
    ///
    /// Files disabled by an inner `#![cfg(...)]` are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if any source fails to parse.
    pub fn parse<I, P, C>(name: impl Into<String>, sources: I, features: &[String]) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<PathBuf>,
        C: AsRef<str>,
    {
        let cfg = CfgEvaluator::new(features.iter().cloned());
        let mut files = Vec::new();

        for (path, content) in sources {
            let path = path.into();
            debug!("Parsing: {}", path.display());

            let mut ast = syn::parse_file(content.as_ref()).map_err(|e| LoadError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?;

            if !cfg.retain(&mut ast) {
                debug!("Excluding {} (disabled by cfg)", path.display());
                continue;
            }

            files.push(SourceFile { path, ast });
        }

        Ok(Self {
            name: name.into(),
            files,
        })
    }

    /// Package name, taken from the directory name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Files in traversal order.
    #[must_use]
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }
}

fn discover_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let escaped = glob::Pattern::escape(&dir.display().to_string());
    let pattern = format!("{escaped}/*.rs");
    let mut files = Vec::new();

    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| LoadError::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn normalized_parent(path: &Path) -> PathBuf {
    path.parent()
        .unwrap_or_else(|| Path::new(""))
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn package_name(input: &PackageInput) -> String {
    let dir = input.output_dir();
    dir.file_name()
        .map(PathBuf::from)
        .or_else(|| {
            std::fs::canonicalize(&dir)
                .ok()
                .and_then(|d| d.file_name().map(PathBuf::from))
        })
        .map_or_else(|| "crate".to_string(), |n| n.display().to_string())
}
