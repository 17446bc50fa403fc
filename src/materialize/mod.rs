// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Writing an export to its output medium.
//!
//! ```text
//!                   ┌──────────────────────────────┐
//!  OverlayIndex ──> │ Materializer::materialize    │
//!                   │   skip excluded              │      ┌─ DirectorySink (copy | hardlink)
//!  sources ───────> │ Materializer::               │ ───> │
//!                   │   materialize_separate       │      └─ ZipSink (copy, zip64 when needed)
//!                   │   folder naming + meta.ini   │
//!                   └──────────────────────────────┘
//!                          │ ProgressSink (optional)
//!                          │ CancellationToken (checked before each write)
//! ```
//!
//! Writes are sequential, so no destination path ever has two writers.
//! A failed entry is recorded in [`ExportResult::errors`] and skipped.

pub mod archive;
pub mod directory;
pub mod metadata;
pub mod naming;
pub mod sink;

use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn};

use crate::export::{ExportFailure, ExportNote, ExportResult, NoteKind, WriteStrategy};
use crate::filter::ExclusionFilter;
use crate::logging::LogReason;
use crate::overlay::{OverlayIndex, RelativePath};
use crate::source::ModSource;
use crate::utility::fs::walk::{WalkOptions, walk_source};

pub use archive::ZipSink;
pub use directory::DirectorySink;
pub use metadata::{META_FILE_NAME, find_meta_file, render_meta_ini};
pub use naming::{FolderName, FolderNamer, sanitize_folder_name};
pub use sink::{EntrySink, EntryState, WriteReport};

/// Receives progress updates while entries are written.
pub trait ProgressSink: Send + Sync {
    /// Number of entries expected so far.
    fn begin(&self, _total: u64) {}
    /// More entries were discovered.
    fn extend(&self, _more: u64) {}
    /// One entry was handled (written, skipped or failed).
    fn advance(&self, _path: &str) {}
    fn finish(&self) {}
}

/// Drives an [`EntrySink`] with the entries of one export.
pub struct Materializer<'a> {
    sink: &'a mut dyn EntrySink,
    strategy: WriteStrategy,
    cancel: Option<CancellationToken>,
    progress: Option<Arc<dyn ProgressSink>>,
}

impl std::fmt::Debug for Materializer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Materializer")
            .field("destination", &self.sink.destination())
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

impl<'a> Materializer<'a> {
    /// The sink must already be open.
    pub fn new(sink: &'a mut dyn EntrySink, strategy: WriteStrategy) -> Self {
        Self {
            sink,
            strategy,
            cancel: None,
            progress: None,
        }
    }

    #[must_use]
    pub fn with_cancel_token(mut self, token: Option<CancellationToken>) -> Self {
        self.cancel = token;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Option<Arc<dyn ProgressSink>>) -> Self {
        self.progress = progress;
        self
    }

    /// Writes every non-excluded overlay winner, then the empty directories.
    pub fn materialize(&mut self, index: &OverlayIndex, filter: &ExclusionFilter) -> ExportResult {
        let _span = info_span!("materialize", destination = %self.sink.destination().display())
            .entered();

        let mut result = ExportResult {
            conflicts: index.conflicts().cloned().collect(),
            errors: index.failures().to_vec(),
            ..ExportResult::default()
        };
        let total = index.len() + index.empty_dirs().count();
        self.progress(|p| p.begin(total as u64));

        for entry in index.entries() {
            if self.check_cancelled(&mut result) {
                break;
            }
            let path = entry.path();
            if is_excluded(filter, path, path) {
                result.files_skipped += 1;
            } else {
                self.write_entry(&mut result, path, entry.source_file());
            }
            self.progress(|p| p.advance(path.as_str()));
        }

        for dir in index.empty_dirs() {
            if self.check_cancelled(&mut result) {
                break;
            }
            if !is_excluded(filter, dir, dir) {
                self.create_dir(&mut result, dir);
            }
            self.progress(|p| p.advance(dir.as_str()));
        }

        self.progress(|p| p.finish());
        info!(
            reason = LogReason::Write.as_str(),
            written = result.files_written,
            skipped = result.files_skipped,
            errors = result.errors.len(),
            "combined tree written"
        );
        result
    }

    /// Recreates each source's own tree under its own folder, plus metadata.
    ///
    /// `sources` are taken as given: the caller decides whether inactive
    /// mods, separators or the Overwrite layer belong in the export.
    /// Exclusions apply to paths inside each mod folder.
    pub fn materialize_separate(
        &mut self,
        sources: &[Arc<ModSource>],
        filter: &ExclusionFilter,
        walk: &WalkOptions,
    ) -> ExportResult {
        let _span = info_span!("materialize_separate", sources = sources.len()).entered();

        let mut result = ExportResult::default();
        let mut namer = FolderNamer::new();
        self.progress(|p| p.begin(0));

        for source in sources {
            if self.check_cancelled(&mut result) {
                break;
            }
            let folder = namer.assign(source);
            if let Some(taken) = &folder.collided_with {
                result.notes.push(ExportNote::new(
                    NoteKind::NameCollision,
                    &folder.name,
                    format!(
                        "'{taken}' is already used, exporting '{}' as '{}'",
                        source.display_name(),
                        folder.name
                    ),
                ));
            }
            let prefix = match RelativePath::normalize(&folder.name) {
                Ok(prefix) => prefix,
                Err(rejection) => {
                    result.record_failure(ExportFailure::file_io(&folder.name, rejection));
                    continue;
                }
            };
            self.export_source(&mut result, source, &prefix, filter, walk);
        }

        self.progress(|p| p.finish());
        info!(
            reason = LogReason::Write.as_str(),
            written = result.files_written,
            skipped = result.files_skipped,
            errors = result.errors.len(),
            "mod folders written"
        );
        result
    }

    fn export_source(
        &mut self,
        result: &mut ExportResult,
        source: &ModSource,
        prefix: &RelativePath,
        filter: &ExclusionFilter,
        walk: &WalkOptions,
    ) {
        debug!(source = source.display_name(), folder = %prefix, "exporting mod folder");
        self.create_dir(result, prefix);

        if let Ok(meta_path) = RelativePath::normalize(META_FILE_NAME) {
            let meta_path = meta_path.prefixed(prefix);
            // Never hardlinked, the importing host rewrites this file
            let written = match find_meta_file(source.root()) {
                Some(existing) => self
                    .sink
                    .write_file(&meta_path, &existing, WriteStrategy::Copy),
                None => self
                    .sink
                    .write_bytes(&meta_path, render_meta_ini(source).as_bytes()),
            };
            match written {
                Ok(report) => record_report(result, &meta_path, report),
                Err(e) => result.record_failure(ExportFailure::file_io(meta_path.as_str(), e)),
            }
        }

        if source.is_separator() {
            return;
        }

        let tree = match walk_source(source.root(), walk) {
            Ok(tree) => tree,
            Err(e) => {
                warn!(
                    reason = LogReason::Write.as_str(),
                    source = source.display_name(),
                    error = %e,
                    "cannot read source, skipping"
                );
                result.errors.push(ExportFailure::source_access(
                    source.root().display().to_string(),
                    e,
                ));
                return;
            }
        };
        for (path, message) in tree.errors() {
            result.errors.push(ExportFailure::source_access(
                source.root().join(path).display().to_string(),
                message,
            ));
        }
        self.progress(|p| p.extend((tree.files().len() + tree.empty_dirs().len()) as u64));

        for file in tree.files() {
            if self.check_cancelled(result) {
                return;
            }
            match RelativePath::from_path(&file.relative) {
                Ok(inner) => {
                    let target = inner.prefixed(prefix);
                    if is_excluded(filter, &inner, &target) {
                        result.files_skipped += 1;
                    } else {
                        self.write_entry(result, &target, &file.absolute);
                    }
                    self.progress(|p| p.advance(target.as_str()));
                }
                Err(rejection) => result.record_failure(ExportFailure::file_io(
                    file.absolute.display().to_string(),
                    rejection,
                )),
            }
        }

        for dir in tree.empty_dirs() {
            if self.check_cancelled(result) {
                return;
            }
            if let Ok(inner) = RelativePath::from_path(dir) {
                let target = inner.prefixed(prefix);
                if !is_excluded(filter, &inner, &target) {
                    self.create_dir(result, &target);
                }
                self.progress(|p| p.advance(target.as_str()));
            }
        }
    }

    fn write_entry(&mut self, result: &mut ExportResult, path: &RelativePath, source: &Path) {
        match self.sink.write_file(path, source, self.strategy) {
            Ok(report) => record_report(result, path, report),
            Err(e) => {
                warn!(
                    reason = LogReason::Write.as_str(),
                    path = %path,
                    source = %source.display(),
                    error = %e,
                    "failed to write entry, skipping"
                );
                result.record_failure(ExportFailure::file_io(path.as_str(), e));
            }
        }
    }

    fn create_dir(&mut self, result: &mut ExportResult, path: &RelativePath) {
        match self.sink.create_dir(path) {
            Ok(true) => result.dirs_created += 1,
            Ok(false) => {}
            Err(e) => {
                warn!(
                    reason = LogReason::Write.as_str(),
                    path = %path,
                    error = %e,
                    "failed to create directory"
                );
                result
                    .errors
                    .push(ExportFailure::file_io(path.as_str(), e));
            }
        }
    }

    fn check_cancelled(&self, result: &mut ExportResult) -> bool {
        if self
            .cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
        {
            if !result.cancelled {
                warn!(
                    reason = LogReason::Interruption.as_str(),
                    written = result.files_written,
                    "export cancelled, no further writes"
                );
            }
            result.cancelled = true;
        }
        result.cancelled
    }

    fn progress(&self, update: impl FnOnce(&dyn ProgressSink)) {
        if let Some(progress) = &self.progress {
            update(progress.as_ref());
        }
    }
}

/// `matched` is tested against the rules, `shown` is what gets logged.
fn is_excluded(filter: &ExclusionFilter, matched: &RelativePath, shown: &RelativePath) -> bool {
    let Some(rule) = filter.matching_rule(matched.as_str()) else {
        return false;
    };
    debug!(
        reason = LogReason::Filter.as_str(),
        path = %shown,
        pattern = rule.pattern(),
        "excluded"
    );
    true
}

fn record_report(result: &mut ExportResult, path: &RelativePath, report: WriteReport) {
    match report.state {
        EntryState::Created => result.files_written += 1,
        EntryState::Replaced => {
            result.files_written += 1;
            result.overwritten += 1;
        }
        EntryState::Kept => {
            result.files_skipped += 1;
            result.notes.push(ExportNote::new(
                NoteKind::KeptExisting,
                path.as_str(),
                "destination exists, left untouched",
            ));
        }
    }
    if let Some(reason) = report.fallback {
        result
            .notes
            .push(ExportNote::new(NoteKind::HardlinkFallback, path.as_str(), reason));
    }
}
