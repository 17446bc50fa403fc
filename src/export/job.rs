// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export job description.
//!
//! ```text
//! ExportJob
//! ├── mode         combined | separate
//! ├── target       directory | zip
//! ├── strategy     copy | hardlink
//! ├── include_overwrite, overwrite_existing, cleanup_on_cancel
//! ├── exclusions   glob strings, compiled by validate()
//! ├── compression  stored | deflated | bzip2 | zstd  (+ optional level)
//! └── destination
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;
use crate::filter::ExclusionFilter;
use crate::source::ModSource;

fn invalid(key: &str, expected: &str, got: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: "export".to_string(),
        key: key.to_string(),
        message: format!("expected {expected}, got '{got}'"),
    }
}

/// Shape of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportMode {
    /// One merged tree of overlay winners.
    #[default]
    #[serde(rename = "combined")]
    CombinedTree,
    /// One folder per mod, no merging.
    #[serde(rename = "separate")]
    SeparateFolders,
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CombinedTree => write!(f, "combined"),
            Self::SeparateFolders => write!(f, "separate"),
        }
    }
}

impl FromStr for ExportMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "combined" => Ok(Self::CombinedTree),
            "separate" => Ok(Self::SeparateFolders),
            _ => Err(invalid("mode", "'combined' or 'separate'", s)),
        }
    }
}

/// Output medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportTarget {
    #[default]
    Directory,
    Zip,
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => write!(f, "directory"),
            Self::Zip => write!(f, "zip"),
        }
    }
}

impl FromStr for ExportTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "directory" => Ok(Self::Directory),
            "zip" => Ok(Self::Zip),
            _ => Err(invalid("target", "'directory' or 'zip'", s)),
        }
    }
}

/// How file content reaches the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteStrategy {
    #[default]
    Copy,
    /// Hardlink where possible, copy otherwise (noted per entry).
    Hardlink,
}

impl fmt::Display for WriteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => write!(f, "copy"),
            Self::Hardlink => write!(f, "hardlink"),
        }
    }
}

impl FromStr for WriteStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "copy" => Ok(Self::Copy),
            "hardlink" => Ok(Self::Hardlink),
            _ => Err(invalid("strategy", "'copy' or 'hardlink'", s)),
        }
    }
}

/// Compression applied to archive entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZipCompression {
    Stored,
    #[default]
    Deflated,
    Bzip2,
    Zstd,
}

impl ZipCompression {
    /// Accepted levels, `None` when the method takes no level.
    #[must_use]
    pub const fn level_range(self) -> Option<RangeInclusive<i64>> {
        match self {
            Self::Stored => None,
            Self::Deflated => Some(0..=9),
            Self::Bzip2 => Some(1..=9),
            Self::Zstd => Some(1..=22),
        }
    }
}

impl fmt::Display for ZipCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored => write!(f, "stored"),
            Self::Deflated => write!(f, "deflated"),
            Self::Bzip2 => write!(f, "bzip2"),
            Self::Zstd => write!(f, "zstd"),
        }
    }
}

impl FromStr for ZipCompression {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stored" => Ok(Self::Stored),
            "deflated" => Ok(Self::Deflated),
            "bzip2" => Ok(Self::Bzip2),
            "zstd" => Ok(Self::Zstd),
            _ => Err(invalid(
                "compression",
                "'stored', 'deflated', 'bzip2' or 'zstd'",
                s,
            )),
        }
    }
}

/// One export request. Consumed once, never persisted.
#[derive(Debug, Clone, Builder)]
pub struct ExportJob {
    #[builder(setters(name = with_mode), default)]
    mode: ExportMode,
    #[builder(setters(name = with_target), default)]
    target: ExportTarget,
    #[builder(setters(name = with_strategy), default)]
    strategy: WriteStrategy,
    #[builder(setters(name = with_include_overwrite), default)]
    include_overwrite: bool,
    /// Replace files already present at the destination.
    #[builder(setters(name = with_overwrite_existing), default = true)]
    overwrite_existing: bool,
    /// Remove a destination root created by this run when it is cancelled.
    #[builder(setters(name = with_cleanup_on_cancel), default)]
    cleanup_on_cancel: bool,
    #[builder(setters(name = with_exclusions), default)]
    exclusions: Vec<String>,
    #[builder(setters(name = with_compression), default)]
    compression: ZipCompression,
    #[builder(setters(name = with_compression_level))]
    compression_level: Option<i64>,
    #[builder(setters(name = with_destination), into)]
    destination: PathBuf,
}

impl ExportJob {
    #[must_use]
    pub const fn mode(&self) -> ExportMode {
        self.mode
    }

    #[must_use]
    pub const fn target(&self) -> ExportTarget {
        self.target
    }

    #[must_use]
    pub const fn strategy(&self) -> WriteStrategy {
        self.strategy
    }

    #[must_use]
    pub const fn include_overwrite(&self) -> bool {
        self.include_overwrite
    }

    #[must_use]
    pub const fn overwrite_existing(&self) -> bool {
        self.overwrite_existing
    }

    #[must_use]
    pub const fn cleanup_on_cancel(&self) -> bool {
        self.cleanup_on_cancel
    }

    #[must_use]
    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    #[must_use]
    pub const fn compression(&self) -> ZipCompression {
        self.compression
    }

    #[must_use]
    pub const fn compression_level(&self) -> Option<i64> {
        self.compression_level
    }

    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Checks the job before any I/O and compiles its exclusion rules.
    ///
    /// Zip with hardlink is accepted: each entry is copied and noted.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingDestination`] for an empty destination
    /// - [`ConfigError::InvalidPattern`] for a malformed exclusion
    /// - [`ConfigError::IncompatibleOptions`] for a compression level the
    ///   method does not accept, or a destination inside an exported source
    pub fn validate(&self, sources: &[ModSource]) -> Result<ExclusionFilter, ConfigError> {
        if self.destination.as_os_str().is_empty() {
            return Err(ConfigError::MissingDestination);
        }

        let filter = ExclusionFilter::compile(&self.exclusions)?;

        if let Some(level) = self.compression_level {
            match self.compression.level_range() {
                None => {
                    return Err(ConfigError::IncompatibleOptions(format!(
                        "compression '{}' takes no level",
                        self.compression
                    )));
                }
                Some(range) if !range.contains(&level) => {
                    return Err(ConfigError::IncompatibleOptions(format!(
                        "level {level} is outside {}..={} for '{}'",
                        range.start(),
                        range.end(),
                        self.compression
                    )));
                }
                Some(_) => {}
            }
        }

        let destination = absolute(&self.destination);
        let exported = sources
            .iter()
            .filter(|s| s.is_active() && !s.is_separator())
            .filter(|s| self.include_overwrite || !s.is_overwrite());
        for source in exported {
            if destination.starts_with(absolute(source.root())) {
                return Err(ConfigError::IncompatibleOptions(format!(
                    "destination '{}' lies inside source '{}'",
                    self.destination.display(),
                    source.display_name()
                )));
            }
        }

        Ok(filter)
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
