// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, warn};

use super::job::{ExportJob, ExportMode, ExportTarget};
use super::result::ExportResult;
use crate::error::ExportError;
use crate::logging::LogReason;
use crate::materialize::{DirectorySink, EntrySink, Materializer, ProgressSink, ZipSink};
use crate::overlay::OverlayResolver;
use crate::source::ModSource;

/// Single entry point for running an export.
///
/// Each call to [`plan`](Self::plan) builds fresh snapshots, a fresh overlay
/// and a fresh result; nothing carries over between runs.
#[derive(Default)]
pub struct ExportPlanner {
    resolver: OverlayResolver,
    cancel: Option<CancellationToken>,
    progress: Option<Arc<dyn ProgressSink>>,
}

impl std::fmt::Debug for ExportPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportPlanner")
            .field("resolver", &self.resolver)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

impl ExportPlanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: OverlayResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Token checked before each write.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Runs `job` over `sources`.
    ///
    /// Order: validate, open the destination, resolve (combined mode),
    /// materialize, finalize. Recoverable problems end up in the result.
    ///
    /// # Errors
    ///
    /// - [`ExportError::Configuration`] before any I/O
    /// - [`ExportError::DestinationFatal`] when the destination cannot be
    ///   created or committed; anything this run created is removed
    pub fn plan(&self, sources: &[ModSource], job: &ExportJob) -> Result<ExportResult, ExportError> {
        let _span = info_span!(
            "export",
            mode = %job.mode(),
            target = %job.target(),
            destination = %job.destination().display()
        )
        .entered();

        let filter = job.validate(sources)?;
        let snapshot: Vec<Arc<ModSource>> = sources.iter().cloned().map(Arc::new).collect();

        let mut sink: Box<dyn EntrySink> = match job.target() {
            ExportTarget::Directory => {
                Box::new(DirectorySink::new(job.destination(), job.overwrite_existing()))
            }
            ExportTarget::Zip => Box::new(ZipSink::new(
                job.destination(),
                job.compression(),
                job.compression_level(),
                job.overwrite_existing(),
            )),
        };
        sink.open()?;

        let result = {
            let mut materializer = Materializer::new(sink.as_mut(), job.strategy())
                .with_cancel_token(self.cancel.clone())
                .with_progress(self.progress.clone());
            match job.mode() {
                ExportMode::CombinedTree => {
                    let index = self.resolver.resolve(&snapshot, job.include_overwrite());
                    materializer.materialize(&index, &filter)
                }
                ExportMode::SeparateFolders => {
                    let selected = separate_sources(&snapshot, job.include_overwrite());
                    materializer.materialize_separate(
                        &selected,
                        &filter,
                        self.resolver.walk_options(),
                    )
                }
            }
        };

        if result.cancelled {
            warn!(
                reason = LogReason::Interruption.as_str(),
                cleanup = job.cleanup_on_cancel(),
                "export cancelled"
            );
            sink.abort(job.cleanup_on_cancel());
            return Ok(result);
        }

        if let Err(e) = sink.finalize() {
            sink.abort(true);
            return Err(e);
        }

        info!(summary = %result.summary(), "export complete");
        Ok(result)
    }
}

/// Sources exported in separate-folders mode, lowest priority first.
///
/// Separators are kept (they become empty folders); the Overwrite layer
/// only when requested.
fn separate_sources(sources: &[Arc<ModSource>], include_overwrite: bool) -> Vec<Arc<ModSource>> {
    let mut selected: Vec<Arc<ModSource>> = sources
        .iter()
        .filter(|s| s.is_active())
        .filter(|s| include_overwrite || !s.is_overwrite())
        .cloned()
        .collect();
    selected.sort_by_key(|s| (s.is_overwrite(), s.priority()));
    selected
}
