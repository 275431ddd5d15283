//! Errors raised while reading a single content file

use std::path::PathBuf;
use thiserror::Error;

/// Why one content file could not be turned into a record.
///
/// These never escape a batch load: the loader logs them, skips the file,
/// and keeps going with the rest of the directory.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid frontmatter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown project category {value:?} in {path:?} (expected Ideation, MVP or Feedback)")]
    Category { path: PathBuf, value: String },
}

impl ContentError {
    /// Path of the file that failed
    pub fn path(&self) -> &std::path::Path {
        match self {
            ContentError::Io { path, .. }
            | ContentError::FrontMatter { path, .. }
            | ContentError::Category { path, .. } => path,
        }
    }
}
