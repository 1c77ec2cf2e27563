//! Run configuration, validated before any file is touched.

use std::path::PathBuf;

use crate::filter::FilterOptions;
use crate::tokenize::ModelId;

/// A configuration problem. Every variant is fatal.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// The directory argument was empty.
    #[error("no directory provided")]
    #[diagnostic(
        code(tokentally::config::empty_directory),
        help("pass the directory to scan, e.g. `tokentally .`")
    )]
    EmptyDirectory,

    /// The directory argument does not name an existing directory.
    #[error("path provided is not a directory: {}", .0.display())]
    #[diagnostic(code(tokentally::config::not_a_directory))]
    NotADirectory(PathBuf),

    /// Both an include and an exclude list were given.
    #[error("--include and --exclude cannot be combined")]
    #[diagnostic(
        code(tokentally::config::conflicting_filters),
        help("use either -i/--include or -e/--exclude")
    )]
    ConflictingFilters,
}

/// Everything a scan needs, checked up front.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory to scan.
    pub root: PathBuf,
    /// Filtering choices.
    pub filter: FilterOptions,
    /// Model whose tokenization is used.
    pub model: ModelId,
}

impl RunConfig {
    /// Validate `directory` and the filter lists.
    pub fn new(
        directory: &str,
        filter: FilterOptions,
        model: ModelId,
    ) -> Result<Self, ConfigError> {
        let root = validate_root(directory)?;
        if filter.has_conflicting_lists() {
            return Err(ConfigError::ConflictingFilters);
        }
        Ok(Self {
            root,
            filter,
            model,
        })
    }
}

/// Check that `raw` is non-empty and names an existing directory.
pub fn validate_root(raw: &str) -> Result<PathBuf, ConfigError> {
    if raw.is_empty() {
        return Err(ConfigError::EmptyDirectory);
    }
    let root = PathBuf::from(raw);
    if !root.is_dir() {
        return Err(ConfigError::NotADirectory(root));
    }
    Ok(root)
}
