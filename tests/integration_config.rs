// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use mox::config::{Config, ConfigLoader};
use mox::export::{ExportMode, ExportTarget, WriteStrategy, ZipCompression};
use mox::logging::LogLevel;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_empty() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.host.profile, "Default");
    assert!(config.host.instance.is_none());
    assert_eq!(config.export.mode, ExportMode::CombinedTree);
}

#[test]
fn config_parse_full() {
    let toml = r#"
[global]
output_log_level = 2
file_log_level = 5
log_file = "logs/mox.log"
json_log = true

[host]
instance = "D:/Modding/MO2"
profile = "Vanilla+"
mods_dir = "E:/mods"
game_nexus_name = "skyrimspecialedition"

[export]
mode = "combined"
target = "zip"
strategy = "copy"
include_overwrite = true
overwrite_existing = false
exclude = ["**/*.log", "fomod/**"]
compression = "bzip2"
compression_level = 9
"#;
    let config = Config::parse(toml).unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::WARN);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert_eq!(config.global.log_file, Some(PathBuf::from("logs/mox.log")));
    assert!(config.global.json_log);
    assert_eq!(config.host.profile, "Vanilla+");
    assert_eq!(config.host.mods_dir, Some(PathBuf::from("E:/mods")));
    assert_eq!(config.export.target, ExportTarget::Zip);
    assert_eq!(config.export.strategy, WriteStrategy::Copy);
    assert!(!config.export.overwrite_existing);
    assert_eq!(config.export.compression, ZipCompression::Bzip2);

    let job = config.export_job("out.zip");
    assert_eq!(job.compression_level(), Some(9));
    assert!(job.include_overwrite());
}

#[test]
fn config_invalid_log_level_rejected() {
    assert!(Config::parse("[global]\noutput_log_level = 9").is_err());
}

#[test]
fn config_invalid_toml_rejected() {
    assert!(Config::parse("[export\nmode = ").is_err());
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_later_file_overrides_earlier() {
    let mut base = NamedTempFile::new().unwrap();
    writeln!(base, "[host]\ninstance = \"/base\"\n[export]\nmode = \"separate\"").unwrap();
    let mut local = NamedTempFile::new().unwrap();
    writeln!(local, "[host]\ninstance = \"/local\"").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file(base.path())
        .add_toml_file(local.path());
    assert_eq!(loader.loaded_files().len(), 2);

    let config = loader.build().unwrap();
    assert_eq!(config.host.instance, Some(PathBuf::from("/local")));
    assert_eq!(config.export.mode, ExportMode::SeparateFolders);
}

#[test]
fn config_cli_override_wins() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\noutput_log_level = 3")
        .set("global.output_log_level", 5_i64)
        .unwrap()
        .set("host.profile", "Survival")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::TRACE);
    assert_eq!(config.host.profile, "Survival");
}

#[test]
fn config_options_listing_covers_every_section() {
    let options = Config::default().format_options();
    for prefix in ["global.", "host.", "export."] {
        assert!(
            options.iter().any(|line| line.starts_with(prefix)),
            "missing {prefix} keys"
        );
    }
}
