//! Directory walking and file content loading.

use std::path::{Path, PathBuf};

/// A filesystem entry whose name has at least one `.` in it.
///
/// Directories matching that rule are yielded too; the filter stage is
/// responsible for skipping them before any read is attempted.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Path used for reading (the walk root joined with `rel_path`).
    pub path: PathBuf,
    /// Path relative to the walk root.
    pub rel_path: PathBuf,
    /// Base name, used as the display name in the report.
    pub name: String,
    /// Suffix after the last `.`, without the dot. See [`extension_of`].
    pub extension: String,
    /// Whether the entry resolves to a directory.
    pub is_dir: bool,
}

/// Lazily walk `root` to unbounded depth, yielding every entry whose name
/// contains a `.`.
///
/// Hidden files and `.gitignore` rules are not honoured: every file under
/// the root is seen. Within one directory, files come before subdirectories
/// and each group is in file-name order, so a directory's own matches are
/// yielded before anything nested below it. The root itself is not yielded.
pub fn walk_candidates(root: &Path) -> impl Iterator<Item = Result<Candidate, WalkError>> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .sort_by_file_path(|a, b| {
            a.is_dir()
                .cmp(&b.is_dir())
                .then_with(|| a.file_name().cmp(&b.file_name()))
        });

    let root = root.to_path_buf();
    builder.build().filter_map(move |result| match result {
        Ok(dir_entry) => {
            if dir_entry.depth() == 0 {
                return None;
            }
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            if !name.contains('.') {
                return None;
            }
            let path = dir_entry.path().to_path_buf();
            let rel_path = path.strip_prefix(&root).unwrap_or(&path).to_path_buf();
            Some(Ok(Candidate {
                extension: extension_of(&name),
                is_dir: path.is_dir(),
                name,
                path,
                rel_path,
            }))
        }
        Err(e) => Some(Err(WalkError::new(e.to_string()))),
    })
}

/// The suffix after the last `.` of `name`.
///
/// Empty when the only dot is leading (`.gitignore`) or trailing (`notes.`).
#[must_use]
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        None | Some(0) => String::new(),
        Some(i) => name[i + 1..].to_string(),
    }
}

/// A bundle of non-fatal walk errors, rendered as related diagnostics.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("errors while walking {}", .root.display())]
#[diagnostic(code(tokentally::walk))]
pub struct WalkErrors {
    root: PathBuf,
    #[related]
    related: Vec<WalkError>,
}

impl WalkErrors {
    /// Build a diagnostic from the errors of one scan (cloning them).
    /// Returns `None` if there are no errors.
    #[must_use]
    pub fn from_errors(root: &Path, errors: &[WalkError]) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        Some(Self {
            root: root.to_path_buf(),
            related: errors.to_vec(),
        })
    }
}

/// A non-fatal error encountered while walking a directory tree.
#[derive(Debug, Clone, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
#[diagnostic(code(tokentally::walk::entry))]
pub struct WalkError {
    message: String,
}

impl WalkError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ─── Reading ──────────────────────────────────────────────────────────────────

/// Why a file's text could not be loaded.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ReadError {
    /// The content is not valid UTF-8.
    #[error("not valid UTF-8 (first bad byte at offset {valid_up_to})")]
    #[diagnostic(code(tokentally::walk::decode))]
    Decode {
        /// Length of the valid prefix.
        valid_up_to: usize,
    },

    /// The file could not be opened or read.
    #[error("{0}")]
    #[diagnostic(code(tokentally::walk::io))]
    Io(String),
}

/// Source of file text for the scan pipeline.
pub trait SourceReader {
    /// Read the full content of `path` as text.
    fn read_text(&self, path: &Path) -> Result<String, ReadError>;
}

/// Reads files from disk as strict UTF-8, with `\r\n` and lone `\r` line
/// endings turned into `\n`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read_text(&self, path: &Path) -> Result<String, ReadError> {
        let bytes = std::fs::read(path).map_err(|e| ReadError::Io(e.to_string()))?;
        let text = String::from_utf8(bytes).map_err(|e| ReadError::Decode {
            valid_up_to: e.utf8_error().valid_up_to(),
        })?;
        Ok(normalize_newlines(text))
    }
}

fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
