// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export command implementation for mox.
//!
//! ```text
//! config + flags --> HostOptions --> load_sources (+ Overwrite)
//!                --> ExportJob
//!                        |
//!   Ctrl+C --> CancellationToken
//!                        v
//!          spawn_blocking(ExportPlanner::plan)
//!                        |  ProgressSink --> indicatif bar (stderr)
//!                        v
//!             ExportResult --> summary | --json
//! ```

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, OnceLock};
use tokio_util::sync::CancellationToken;

use crate::cli::export::ExportArgs;
use crate::config::Config;
use crate::error::Result;
use crate::export::{ExportPlanner, ExportResult};
use crate::host;
use crate::logging::LogReason;
use crate::materialize::ProgressSink;

/// Main handler for export command.
///
/// A completed export succeeds even when some entries failed; they are
/// listed in the report.
///
/// # Errors
///
/// Returns an error when the job is invalid, the mod list cannot be read,
/// or the destination cannot be created.
pub async fn run_export_command(args: &ExportArgs, config: &Config) -> Result<()> {
    let mut config = config.clone();
    args.apply(&mut config.export);

    let options = config.host_options()?;
    let mut sources = host::load_sources(&options)?;
    sources.push(host::overwrite_source(&options));
    let job = config.export_job(&args.destination);

    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();
    let signal = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!(
                reason = LogReason::Interruption.as_str(),
                "Received Ctrl+C, stopping export..."
            );
            signal_token.cancel();
        }
    });

    let progress: Arc<dyn ProgressSink> = Arc::new(BarProgress::new(!args.json));
    let planner = ExportPlanner::new()
        .with_cancel_token(cancel_token)
        .with_progress(progress);

    let outcome = tokio::task::spawn_blocking(move || planner.plan(&sources, &job))
        .await
        .context("export worker stopped unexpectedly")?;
    signal.abort();
    let result = outcome?;

    if args.json {
        let json = serde_json::to_string_pretty(&result).context("failed to serialize result")?;
        println!("{json}");
    } else {
        for line in render_report(&result) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Human-readable report: errors, notes, then the summary line.
#[must_use]
pub fn render_report(result: &ExportResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.errors.len() + result.notes.len() + 2);
    for failure in &result.errors {
        lines.push(format!("error: {failure}"));
    }
    for note in &result.notes {
        lines.push(format!("note: {note}"));
    }
    if result.cancelled {
        lines.push("export cancelled before completion".to_string());
    }
    lines.push(result.summary());
    lines
}

fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {wide_msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

/// Renders materializer progress as an `indicatif` bar on stderr.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new(visible: bool) -> Self {
        let bar = if visible {
            let bar = ProgressBar::new(0);
            bar.set_style(bar_style());
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }
}

impl ProgressSink for BarProgress {
    fn begin(&self, total: u64) {
        self.bar.set_length(total);
    }

    fn extend(&self, more: u64) {
        self.bar.inc_length(more);
    }

    fn advance(&self, path: &str) {
        self.bar.set_message(path.to_string());
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests;
