//! Engine error types for typed error handling.
//!
//! The engine distinguishes exactly two failure classes: the fatal
//! alias-slot conflict, which aborts a whole publish run, and per-resource
//! I/O failures, which are reported but never stop sibling resources.

use std::path::PathBuf;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors with structured context.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The public-root alias slot for a resource is occupied by something
    /// that is neither a symlink nor an empty directory. Overwriting it
    /// could destroy unrelated content, so this aborts the entire run.
    #[error("public path \"{}\" already exists but is not a symlink", path.display())]
    AliasConflict { path: PathBuf },

    /// IO error with context.
    #[error("IO error in {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an alias-conflict error.
    pub fn alias_conflict(path: impl Into<PathBuf>) -> Self {
        Self::AliasConflict { path: path.into() }
    }

    /// True if this error must abort the whole publish run rather than be
    /// recorded against a single resource.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::AliasConflict { .. })
    }
}
