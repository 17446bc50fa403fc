// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Plain directory target.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::sink::{EntrySink, EntryState, WriteReport};
use crate::error::ExportError;
use crate::export::WriteStrategy;
use crate::logging::LogReason;
use crate::overlay::RelativePath;
use crate::utility::fs::copy::{copy_file, link_or_copy, remove_existing};

/// Writes entries below a root directory, creating parents lazily.
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    overwrite_existing: bool,
    /// Topmost directory this run created, removed on cleanup.
    created: Option<PathBuf>,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>, overwrite_existing: bool) -> Self {
        Self {
            root: root.into(),
            overwrite_existing,
            created: None,
        }
    }

    /// Whether `open` had to create the root.
    #[must_use]
    pub const fn created_root(&self) -> bool {
        self.created.is_some()
    }

    fn prepare_parent(path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) => std::fs::create_dir_all(parent),
            None => Ok(()),
        }
    }

    /// Clears the way for a new entry at `target`.
    ///
    /// Returns `None` when an existing file must be kept.
    fn claim(&self, target: &Path) -> io::Result<Option<EntryState>> {
        Self::prepare_parent(target)?;
        let exists = std::fs::symlink_metadata(target).is_ok();
        if exists && !self.overwrite_existing {
            return Ok(None);
        }
        // Never write through an existing hardlink
        let removed = remove_existing(target)?;
        Ok(Some(if removed {
            EntryState::Replaced
        } else {
            EntryState::Created
        }))
    }
}

/// First ancestor of `path` (itself included) that does not exist yet.
fn topmost_missing(path: &Path) -> Option<PathBuf> {
    let mut missing = None;
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() || ancestor.exists() {
            break;
        }
        missing = Some(ancestor.to_path_buf());
    }
    missing
}

impl EntrySink for DirectorySink {
    fn destination(&self) -> &Path {
        &self.root
    }

    fn open(&mut self) -> Result<(), ExportError> {
        if self.root.exists() {
            if !self.root.is_dir() {
                return Err(ExportError::destination(
                    &self.root,
                    io::Error::new(io::ErrorKind::AlreadyExists, "not a directory"),
                ));
            }
            return Ok(());
        }

        let topmost = topmost_missing(&self.root);
        if let Err(e) = std::fs::create_dir_all(&self.root) {
            if let Some(partial) = &topmost {
                let _ = std::fs::remove_dir_all(partial);
            }
            return Err(ExportError::destination(&self.root, e));
        }
        debug!(root = %self.root.display(), "created destination root");
        self.created = topmost;
        Ok(())
    }

    fn create_dir(&mut self, path: &RelativePath) -> io::Result<bool> {
        let target = path.to_native(&self.root);
        if target.is_dir() {
            return Ok(false);
        }
        std::fs::create_dir_all(&target)?;
        Ok(true)
    }

    fn write_file(
        &mut self,
        path: &RelativePath,
        source: &Path,
        strategy: WriteStrategy,
    ) -> io::Result<WriteReport> {
        let target = path.to_native(&self.root);
        let Some(state) = self.claim(&target)? else {
            return Ok(WriteReport::kept());
        };

        let fallback = match strategy {
            WriteStrategy::Copy => {
                copy_file(source, &target)?;
                None
            }
            WriteStrategy::Hardlink => {
                let (_, cause) = link_or_copy(source, &target)?;
                cause.map(|e| format!("hardlink failed, copied instead: {e}"))
            }
        };
        Ok(WriteReport { state, fallback })
    }

    fn write_bytes(&mut self, path: &RelativePath, bytes: &[u8]) -> io::Result<WriteReport> {
        let target = path.to_native(&self.root);
        let Some(state) = self.claim(&target)? else {
            return Ok(WriteReport::kept());
        };
        std::fs::write(&target, bytes)?;
        Ok(WriteReport {
            state,
            fallback: None,
        })
    }

    fn finalize(&mut self) -> Result<(), ExportError> {
        Ok(())
    }

    fn abort(&mut self, cleanup: bool) {
        if !cleanup {
            return;
        }
        if let Some(created) = self.created.take() {
            match std::fs::remove_dir_all(&created) {
                Ok(()) => debug!(root = %created.display(), "removed destination"),
                Err(e) => warn!(
                    reason = LogReason::Write.as_str(),
                    root = %created.display(),
                    error = %e,
                    "failed to remove destination"
                ),
            }
        }
    }
}
