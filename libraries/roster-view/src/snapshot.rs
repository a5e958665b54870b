//! Stored reference snapshots.
//!
//! A snapshot is the pretty JSON of a rendered tree written to
//! `<dir>/<name>.snap`. The first check records it; later checks compare
//! against it.

use crate::element::Element;
use crate::error::{Result, ViewError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Setting this variable to `1` rewrites mismatching snapshots.
pub const UPDATE_SNAPSHOTS_ENV: &str = "ROSTER_UPDATE_SNAPSHOTS";

/// What a snapshot check did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// No reference existed; it has been written
    Created,
    /// Reference matched
    Matched,
    /// Reference differed and was overwritten (update mode)
    Updated,
}

/// Directory of reference snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
    update: bool,
}

impl SnapshotStore {
    /// Store rooted at `dir`; update mode follows [`UPDATE_SNAPSHOTS_ENV`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let update = std::env::var(UPDATE_SNAPSHOTS_ENV).is_ok_and(|v| v == "1");
        Self {
            dir: dir.into(),
            update,
        }
    }

    /// Force update mode on or off.
    #[must_use]
    pub fn updating(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the snapshot file for `name`.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty()
            || name.contains(['/', '\\'])
            || name.starts_with('.')
        {
            return Err(ViewError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{name}.snap")))
    }

    /// Compare the snapshot of `tree` with the stored reference.
    pub fn check_element(&self, name: &str, tree: &Element) -> Result<SnapshotOutcome> {
        let actual = tree.to_snapshot()?;
        self.check(name, &actual)
    }

    /// Compare `actual` with the stored reference, recording it if missing.
    ///
    /// Trailing whitespace is ignored on both sides.
    pub fn check(&self, name: &str, actual: &str) -> Result<SnapshotOutcome> {
        let path = self.path_for(name)?;
        let actual = actual.trim_end();

        match std::fs::read_to_string(&path) {
            Ok(expected) => {
                let expected = expected.trim_end();
                if expected == actual {
                    debug!(snapshot = %name, "Snapshot matched");
                    Ok(SnapshotOutcome::Matched)
                } else if self.update {
                    self.write(&path, actual)?;
                    info!(snapshot = %name, "Snapshot updated");
                    Ok(SnapshotOutcome::Updated)
                } else {
                    Err(ViewError::Mismatch {
                        name: name.to_string(),
                        expected: expected.to_string(),
                        actual: actual.to_string(),
                    })
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                self.write(&path, actual)?;
                info!(snapshot = %name, path = %path.display(), "Snapshot recorded");
                Ok(SnapshotOutcome::Created)
            }
            Err(source) => Err(ViewError::Io { path, source }),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|source| ViewError::Io {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(path, format!("{contents}\n")).map_err(|source| ViewError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
