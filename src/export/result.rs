// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export outcome.
//!
//! ```text
//! ExportResult
//! ├── files_written / files_skipped / dirs_created / overwritten
//! ├── conflicts   OverlayEntry with shadowed sources (combined mode)
//! ├── errors      ExportFailure { path, kind, cause }   recovered, file skipped
//! ├── notes       ExportNote { path, kind, message }    informational
//! └── cancelled   true when the run stopped early
//! ```
//!
//! Fatal problems never end up here; they are an [`ExportError`](crate::error::ExportError).

use serde::Serialize;
use std::fmt;

use crate::overlay::OverlayEntry;

/// Category of a recovered failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A source root or directory could not be read; its content is skipped.
    SourceAccess,
    /// A single file could not be read, copied, linked or written.
    FileIo,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceAccess => write!(f, "source access"),
            Self::FileIo => write!(f, "file i/o"),
        }
    }
}

/// A recovered failure: the path was skipped, the run went on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFailure {
    path: String,
    kind: FailureKind,
    cause: String,
}

impl ExportFailure {
    pub fn source_access(path: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            kind: FailureKind::SourceAccess,
            cause: cause.to_string(),
        }
    }

    pub fn file_io(path: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            kind: FailureKind::FileIo,
            cause: cause.to_string(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    #[must_use]
    pub fn cause(&self) -> &str {
        &self.cause
    }
}

impl fmt::Display for ExportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.path, self.kind, self.cause)
    }
}

/// Category of an informational note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    /// A hardlink was requested but the entry was copied.
    HardlinkFallback,
    /// Two mods sanitized to the same folder name.
    NameCollision,
    /// An existing destination file was left untouched.
    KeptExisting,
}

/// Something the caller should know that is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportNote {
    path: String,
    kind: NoteKind,
    message: String,
}

impl ExportNote {
    pub fn new(kind: NoteKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn kind(&self) -> NoteKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ExportNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Aggregated outcome of one export run.
#[derive(Debug, Default, Serialize)]
pub struct ExportResult {
    pub files_written: usize,
    /// Excluded, collided, kept-existing or failed entries.
    pub files_skipped: usize,
    pub dirs_created: usize,
    /// Existing destination files that were replaced.
    pub overwritten: usize,
    pub conflicts: Vec<OverlayEntry>,
    pub errors: Vec<ExportFailure>,
    pub notes: Vec<ExportNote>,
    pub cancelled: bool,
}

impl ExportResult {
    /// True when no recovered failure occurred and the run was not cancelled.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && !self.cancelled
    }

    /// Notes of one kind.
    pub fn notes_of(&self, kind: NoteKind) -> impl Iterator<Item = &ExportNote> {
        self.notes.iter().filter(move |note| note.kind == kind)
    }

    /// One-line human summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} written, {} skipped, {} conflicts, {} errors",
            self.files_written,
            self.files_skipped,
            self.conflicts.len(),
            self.errors.len()
        );
        if self.overwritten > 0 {
            summary.push_str(&format!(", {} overwritten", self.overwritten));
        }
        if self.cancelled {
            summary.push_str(" (cancelled)");
        }
        summary
    }

    pub(crate) fn record_failure(&mut self, failure: ExportFailure) {
        self.files_skipped += 1;
        self.errors.push(failure);
    }
}
