//! Write-target policy for the public root.
//!
//! Generated files may only land inside the public directory, and never
//! inside the first-level sub-trees owned by the host framework (`bundles`,
//! `assets`, `storage`). A rejected target is a silent skip, not an error:
//! the policy exists to avoid clobbering framework-managed directories.

use crate::constants::RESERVED_DIRS;
use crate::engine::resolver::Resolved;
use std::path::{Component, Path, PathBuf};

/// Decides whether a resolved reference is an acceptable write target.
#[derive(Debug, Clone)]
pub struct SafetyGuard {
    public_dir: PathBuf,
}

impl SafetyGuard {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    /// Pass-through values are always safe (they are never written to);
    /// file paths are checked with [`SafetyGuard::is_safe_path`].
    #[must_use]
    pub fn is_safe(&self, target: &Resolved) -> bool {
        match target {
            Resolved::Mailto(_) | Resolved::Url(_) => true,
            Resolved::File(path) => self.is_safe_path(path),
        }
    }

    /// A path is safe if it lies under the public root and its first
    /// segment relative to the root is not a reserved directory name.
    #[must_use]
    pub fn is_safe_path(&self, path: &Path) -> bool {
        let Ok(rel) = path.strip_prefix(&self.public_dir) else {
            return false;
        };
        match rel.components().next() {
            Some(Component::Normal(first)) => first
                .to_str()
                .is_some_and(|segment| !RESERVED_DIRS.contains(&segment)),
            // The public root itself is not a writable file target.
            _ => false,
        }
    }
}
