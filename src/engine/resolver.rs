//! Reference resolution against the public document root.
//!
//! Configuration values reference things in four shapes: email addresses,
//! absolute URLs, paths already rooted under the public directory, and bare
//! filenames that belong in the well-known sub-directory. [`PathResolver`]
//! classifies a reference into a [`Resolved`] value that is either a
//! pass-through string (emitted verbatim into resource bodies) or an
//! on-disk path.

use crate::engine::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// A resolved reference, either a pass-through value or a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Email address, normalized to a `mailto: ` value. Pass-through.
    Mailto(String),
    /// Absolute URL, returned unchanged. Pass-through.
    Url(String),
    /// Filesystem path under the public root.
    File(PathBuf),
}

impl Resolved {
    /// True for values that are emitted verbatim rather than written to.
    #[must_use]
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Mailto(_) | Self::Url(_))
    }

    /// The filesystem path, if this resolved to one.
    #[must_use]
    pub fn as_file(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            _ => None,
        }
    }

    /// Render for embedding into a resource body.
    ///
    /// File paths are stripped of `strip_prefix` (when given) so the emitted
    /// reference is root-relative instead of an absolute filesystem path;
    /// pass-through values are returned as-is.
    #[must_use]
    pub fn render(&self, strip_prefix: Option<&Path>) -> String {
        match self {
            Self::Mailto(value) | Self::Url(value) => value.clone(),
            Self::File(path) => {
                if let Some(prefix) = strip_prefix
                    && let Ok(rel) = path.strip_prefix(prefix)
                {
                    return format!("/{}", rel.display());
                }
                path.display().to_string()
            },
        }
    }
}

/// Resolves logical references relative to a public root and a well-known
/// sub-directory.
#[derive(Debug, Clone)]
pub struct PathResolver {
    public_dir: PathBuf,
    location_uri: String,
}

impl PathResolver {
    /// Create a resolver for the given public root.
    ///
    /// `location_uri` is the sub-directory that holds generated resources;
    /// a leading `/` is tolerated and stripped.
    pub fn new(public_dir: impl Into<PathBuf>, location_uri: &str) -> Self {
        Self {
            public_dir: public_dir.into(),
            location_uri: location_uri.trim_start_matches('/').to_string(),
        }
    }

    /// The public document root.
    #[must_use]
    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// The on-disk well-known directory: `<public_dir>/<location_uri>`.
    #[must_use]
    pub fn well_known_dir(&self) -> PathBuf {
        self.public_dir.join(&self.location_uri)
    }

    /// Classify a reference without touching the filesystem.
    ///
    /// Rules, in order:
    /// 1. Contains `@` -> email address, normalized `mailto: ` pass-through.
    /// 2. Parses as an absolute URL -> pass-through, unchanged.
    /// 3. Starts with `/` -> already rooted under the public root.
    /// 4. Bare filename -> lives in the well-known sub-directory.
    #[must_use]
    pub fn locate(&self, reference: &str) -> Resolved {
        let reference = reference.trim();
        if reference.contains('@') {
            let address = reference.strip_prefix("mailto:").unwrap_or(reference);
            return Resolved::Mailto(format!("mailto: {}", address.trim()));
        }
        if Url::parse(reference).is_ok() {
            return Resolved::Url(reference.to_string());
        }
        if let Some(rooted) = reference.strip_prefix('/') {
            return Resolved::File(self.public_dir.join(rooted));
        }
        Resolved::File(self.well_known_dir().join(reference))
    }

    /// Classify a reference and make sure a bare filename's well-known
    /// directory exists (all intermediate directories created).
    pub fn resolve(&self, reference: &str) -> Result<Resolved> {
        let resolved = self.locate(reference);
        if let Resolved::File(path) = &resolved
            && path.starts_with(self.well_known_dir())
        {
            let dir = self.well_known_dir();
            fs::create_dir_all(&dir)
                .map_err(|e| Error::io(format!("creating {}", dir.display()), e))?;
        }
        Ok(resolved)
    }

    /// Resolve a reference into the string form used inside resource
    /// bodies: pass-throughs verbatim, file paths root-relative.
    #[must_use]
    pub fn format_ref(&self, reference: &str) -> String {
        self.locate(reference).render(Some(&self.public_dir))
    }
}
