//! Alias publishing: symlinks from the public root to generated files.
//!
//! Resources are generated inside the well-known sub-directory; aliasing
//! makes each one also reachable at `<public_root>/<filename>` via a
//! symbolic link. The slot at the public root is classified before any
//! mutation so the one destructive-refusal path stays auditable.

use crate::engine::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Pre-flight classification of an alias slot at the public root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasSlot {
    /// Nothing occupies the slot.
    Absent,
    /// An existing symlink (possibly dangling); safe to replace.
    Symlink,
    /// An empty directory; safe to remove.
    EmptyDir,
    /// A regular file or non-empty directory. Replacing it would destroy
    /// unrelated content.
    Occupied,
}

impl AliasSlot {
    /// Classify whatever currently occupies `path`.
    ///
    /// Uses `symlink_metadata` so a dangling symlink still classifies as
    /// [`AliasSlot::Symlink`]. Anything unreadable classifies as
    /// [`AliasSlot::Occupied`].
    #[must_use]
    pub fn classify(path: &Path) -> Self {
        let meta = match fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Self::Absent,
            Err(_) => return Self::Occupied,
        };
        if meta.is_symlink() {
            return Self::Symlink;
        }
        if meta.is_dir() {
            return match fs::read_dir(path) {
                Ok(mut entries) => {
                    if entries.next().is_none() {
                        Self::EmptyDir
                    } else {
                        Self::Occupied
                    }
                },
                Err(_) => Self::Occupied,
            };
        }
        Self::Occupied
    }
}

/// Creates symbolic links from the public root to generated files.
#[derive(Debug, Clone)]
pub struct AliasLinker {
    public_dir: PathBuf,
}

impl AliasLinker {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    /// Link `<public_dir>/<basename(target)>` to `target`.
    ///
    /// An existing symlink is replaced and an empty directory removed; an
    /// occupied slot is a fatal configuration conflict and nothing is
    /// mutated. Linking a file that already sits at the public root is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// [`Error::AliasConflict`] when the slot is occupied; [`Error::Io`]
    /// when removal or link creation fails.
    pub fn link(&self, target: &Path) -> Result<()> {
        let Some(name) = target.file_name() else {
            return Ok(());
        };
        let alias = self.public_dir.join(name);
        if alias == target {
            return Ok(());
        }

        match AliasSlot::classify(&alias) {
            AliasSlot::Absent => {},
            AliasSlot::Symlink => fs::remove_file(&alias)
                .map_err(|e| Error::io(format!("removing symlink {}", alias.display()), e))?,
            AliasSlot::EmptyDir => fs::remove_dir(&alias)
                .map_err(|e| Error::io(format!("removing directory {}", alias.display()), e))?,
            AliasSlot::Occupied => return Err(Error::alias_conflict(alias)),
        }

        symlink(target, &alias)
            .map_err(|e| Error::io(format!("linking {}", alias.display()), e))
    }
}

#[cfg(unix)]
fn symlink(target: &Path, alias: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, alias)
}

#[cfg(windows)]
fn symlink(target: &Path, alias: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, alias)
}
