// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export command arguments.
//!
//! # Flag Effects
//!
//! ```text
//! Flags only switch behavior on; anything not given keeps the [export]
//! value from the config files.
//!
//! --zip          target = zip
//! --hardlink     strategy = hardlink
//! --overwrite    include the Overwrite folder (always wins)
//! --separators   separator entries become empty folders (separate mode)
//! --exclude G    appended to export.exclude
//! ```

use clap::{ArgAction, Args};
use std::path::PathBuf;

use crate::config::ExportConfig;
use crate::export::{ExportMode, ExportTarget, WriteStrategy, ZipCompression};

/// Arguments for the `export` command.
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Output layout: `combined` (merged tree) or `separate` (one folder per mod).
    #[arg(long, value_name = "MODE")]
    pub mode: Option<ExportMode>,

    /// Writes a zip archive instead of a directory.
    #[arg(long, action = ArgAction::SetTrue)]
    pub zip: bool,

    /// Hardlinks files instead of copying them, falling back to a copy.
    #[arg(long, action = ArgAction::SetTrue)]
    pub hardlink: bool,

    /// Includes the Overwrite folder as the topmost layer.
    #[arg(long, action = ArgAction::SetTrue)]
    pub overwrite: bool,

    /// Includes separators in the mod list.
    #[arg(long, action = ArgAction::SetTrue)]
    pub separators: bool,

    /// Leaves files that already exist at the destination untouched.
    #[arg(long = "no-overwrite-existing", action = ArgAction::SetTrue)]
    pub no_overwrite_existing: bool,

    /// Glob of paths to leave out, e.g. '**/*.log'. Can be specified multiple times.
    #[arg(short = 'x', long = "exclude", value_name = "GLOB", action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Zip compression method: stored, deflated, bzip2 or zstd.
    #[arg(long, value_name = "METHOD")]
    pub compression: Option<ZipCompression>,

    /// Zip compression level for the chosen method.
    #[arg(long, value_name = "N")]
    pub level: Option<i64>,

    /// Removes the destination folder when the export is interrupted.
    #[arg(long = "cleanup-on-cancel", action = ArgAction::SetTrue)]
    pub cleanup_on_cancel: bool,

    /// Prints the result as JSON instead of a summary.
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Destination folder, or archive path with --zip.
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,
}

impl ExportArgs {
    /// Applies the flags on top of the `[export]` section.
    pub fn apply(&self, export: &mut ExportConfig) {
        if let Some(mode) = self.mode {
            export.mode = mode;
        }
        if self.zip {
            export.target = ExportTarget::Zip;
        }
        if self.hardlink {
            export.strategy = WriteStrategy::Hardlink;
        }
        export.include_overwrite |= self.overwrite;
        export.include_separators |= self.separators;
        if self.no_overwrite_existing {
            export.overwrite_existing = false;
        }
        export.exclude.extend(self.exclude.iter().cloned());
        if let Some(compression) = self.compression {
            export.compression = compression;
        }
        if self.level.is_some() {
            export.compression_level = self.level;
        }
        export.cleanup_on_cancel |= self.cleanup_on_cancel;
    }
}
