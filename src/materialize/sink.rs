// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output medium capability.
//!
//! ```text
//! open() --> create_dir() / write_file() / write_bytes() ... --> finalize()
//!    \                                                      \
//!     +-------------------------- abort() <------------------+  (fatal / cancel)
//! ```
//!
//! The materializer drives a sink without knowing which medium it is.

use std::io;
use std::path::Path;

use crate::error::ExportError;
use crate::export::WriteStrategy;
use crate::overlay::RelativePath;

/// What happened at the destination path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Nothing was there before.
    Created,
    /// An existing file was replaced.
    Replaced,
    /// An existing file was left untouched.
    Kept,
}

/// Outcome of one successful entry write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub state: EntryState,
    /// Why a requested hardlink became a copy.
    pub fallback: Option<String>,
}

impl WriteReport {
    #[must_use]
    pub const fn created() -> Self {
        Self {
            state: EntryState::Created,
            fallback: None,
        }
    }

    #[must_use]
    pub const fn kept() -> Self {
        Self {
            state: EntryState::Kept,
            fallback: None,
        }
    }
}

/// A destination the materializer writes entries into.
///
/// `open` and `finalize` failures are fatal. Per-entry failures are plain
/// I/O errors that the caller records and skips.
pub trait EntrySink {
    /// Path shown to the user.
    fn destination(&self) -> &Path;

    /// Prepares the medium. Nothing is written before this succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::DestinationFatal`] when the medium cannot be created.
    fn open(&mut self) -> Result<(), ExportError>;

    /// Creates a directory entry. Returns whether it was newly created.
    ///
    /// # Errors
    ///
    /// Returns the I/O error of the underlying medium.
    fn create_dir(&mut self, path: &RelativePath) -> io::Result<bool>;

    /// Writes the content of `source` at `path`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error of reading `source` or writing the entry.
    fn write_file(
        &mut self,
        path: &RelativePath,
        source: &Path,
        strategy: WriteStrategy,
    ) -> io::Result<WriteReport>;

    /// Writes in-memory content at `path`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error of writing the entry.
    fn write_bytes(&mut self, path: &RelativePath, bytes: &[u8]) -> io::Result<WriteReport>;

    /// Makes the output visible and complete.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::DestinationFatal`] when the output cannot be committed.
    fn finalize(&mut self) -> Result<(), ExportError>;

    /// Stops the export. `cleanup` asks to remove what this run created.
    fn abort(&mut self, cleanup: bool);
}
