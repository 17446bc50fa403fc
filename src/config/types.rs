// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! Config
//! ├── [global]  log levels, log file
//! ├── [host]    instance, profile, directory overrides, game_nexus_name
//! └── [export]  mode, target, strategy, exclude, compression, ...
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::export::{ExportMode, ExportTarget, WriteStrategy, ZipCompression};
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Write the log file as JSON lines.
    pub json_log: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
            json_log: false,
        }
    }
}

/// Where the mod list comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Mod Organizer 2 instance root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<PathBuf>,
    pub profile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mods_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles_dir: Option<PathBuf>,
    /// Nexus game segment for Markdown links (e.g. `skyrimspecialedition`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_nexus_name: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            instance: None,
            profile: "Default".to_string(),
            mods_dir: None,
            overwrite_dir: None,
            profiles_dir: None,
            game_nexus_name: None,
        }
    }
}

/// Export defaults; CLI flags override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub mode: ExportMode,
    pub target: ExportTarget,
    pub strategy: WriteStrategy,
    pub include_overwrite: bool,
    pub include_separators: bool,
    pub overwrite_existing: bool,
    pub cleanup_on_cancel: bool,
    /// Glob patterns excluded from the export.
    pub exclude: Vec<String>,
    pub compression: ZipCompression,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_level: Option<i64>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            mode: ExportMode::default(),
            target: ExportTarget::default(),
            strategy: WriteStrategy::default(),
            include_overwrite: false,
            include_separators: false,
            overwrite_existing: true,
            cleanup_on_cancel: false,
            exclude: Vec::new(),
            compression: ZipCompression::default(),
            compression_level: None,
        }
    }
}
