// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for mox.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. mox.toml (cwd, optional)
//! 3. --ini FILE (repeatable)
//! 4. MOX_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! Sections and keys are separated by a double underscore:
//!
//! ```text
//! MOX_HOST__INSTANCE=/games/mo2          → host.instance
//! MOX_EXPORT__INCLUDE_OVERWRITE=true     → export.include_overwrite
//! MOX_EXPORT__EXCLUDE=*.log,fomod/**     → export.exclude (comma list)
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::export::ExportJob;
use crate::host::HostOptions;

pub use loader::ConfigLoader;
pub use types::{ExportConfig, GlobalConfig, HostConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub host: HostConfig,
    pub export: ExportConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mox::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("mox.toml")
    ///     .with_env_prefix("MOX")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty profile name.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.host.profile.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "host".to_string(),
                key: "profile".to_string(),
                message: "profile name must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Host reader options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] when no instance is configured.
    pub fn host_options(&self) -> std::result::Result<HostOptions, ConfigError> {
        let instance = self
            .host
            .instance
            .clone()
            .ok_or_else(|| ConfigError::MissingKey {
                section: "host".to_string(),
                key: "instance".to_string(),
            })?;
        Ok(HostOptions::builder()
            .with_instance(instance)
            .with_profile(self.host.profile.clone())
            .maybe_with_mods_dir(self.host.mods_dir.clone())
            .maybe_with_overwrite_dir(self.host.overwrite_dir.clone())
            .maybe_with_profiles_dir(self.host.profiles_dir.clone())
            .with_include_separators(self.export.include_separators)
            .build())
    }

    /// Export job for `destination` from the `[export]` section.
    #[must_use]
    pub fn export_job(&self, destination: impl Into<PathBuf>) -> ExportJob {
        let export = &self.export;
        ExportJob::builder()
            .with_destination(destination)
            .with_mode(export.mode)
            .with_target(export.target)
            .with_strategy(export.strategy)
            .with_include_overwrite(export.include_overwrite)
            .with_overwrite_existing(export.overwrite_existing)
            .with_cleanup_on_cancel(export.cleanup_on_cancel)
            .with_exclusions(export.exclude.clone())
            .with_compression(export.compression)
            .maybe_with_compression_level(export.compression_level)
            .build()
    }

    /// Format configuration options for display.
    ///
    /// Output is sorted by key and aligned on `=`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_host_options(&mut options);
        self.format_export_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), display_opt(self.global.log_file.as_deref()));
        options.insert("global.json_log".into(), self.global.json_log.to_string());
    }

    fn format_host_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("host.instance".into(), display_opt(self.host.instance.as_deref()));
        options.insert("host.profile".into(), self.host.profile.clone());
        options.insert("host.mods_dir".into(), display_opt(self.host.mods_dir.as_deref()));
        options.insert(
            "host.overwrite_dir".into(),
            display_opt(self.host.overwrite_dir.as_deref()),
        );
        options.insert(
            "host.profiles_dir".into(),
            display_opt(self.host.profiles_dir.as_deref()),
        );
        options.insert(
            "host.game_nexus_name".into(),
            self.host.game_nexus_name.clone().unwrap_or_default(),
        );
    }

    fn format_export_options(&self, options: &mut BTreeMap<String, String>) {
        let export = &self.export;
        options.insert("export.mode".into(), export.mode.to_string());
        options.insert("export.target".into(), export.target.to_string());
        options.insert("export.strategy".into(), export.strategy.to_string());
        options.insert(
            "export.include_overwrite".into(),
            export.include_overwrite.to_string(),
        );
        options.insert(
            "export.include_separators".into(),
            export.include_separators.to_string(),
        );
        options.insert(
            "export.overwrite_existing".into(),
            export.overwrite_existing.to_string(),
        );
        options.insert(
            "export.cleanup_on_cancel".into(),
            export.cleanup_on_cancel.to_string(),
        );
        options.insert("export.exclude".into(), export.exclude.join(", "));
        options.insert("export.compression".into(), export.compression.to_string());
        options.insert(
            "export.compression_level".into(),
            export
                .compression_level
                .map_or_else(String::new, |level| level.to_string()),
        );
    }
}

fn display_opt(path: Option<&Path>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}
