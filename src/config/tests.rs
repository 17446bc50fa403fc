// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader};
use crate::error::ConfigError;
use crate::export::{ExportMode, ExportTarget, WriteStrategy, ZipCompression};
use crate::logging::LogLevel;
use std::path::{Path, PathBuf};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.host.profile, "Default");
    assert_eq!(config.export.mode, ExportMode::CombinedTree);
    assert_eq!(config.export.compression, ZipCompression::Deflated);
    assert!(config.export.overwrite_existing);
    assert!(!config.export.cleanup_on_cancel);
}

#[test]
fn test_config_parse() {
    let config = Config::parse(
        r#"
[global]
output_log_level = 4

[host]
instance = "/games/mo2"
profile = "Survival"
game_nexus_name = "skyrimspecialedition"

[export]
mode = "separate"
target = "zip"
strategy = "hardlink"
include_overwrite = true
exclude = ["*.log", "fomod/**"]
compression = "zstd"
compression_level = 10
"#,
    )
    .expect("parse should succeed");

    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.host.instance, Some(PathBuf::from("/games/mo2")));
    assert_eq!(config.host.profile, "Survival");
    assert_eq!(config.export.mode, ExportMode::SeparateFolders);
    assert_eq!(config.export.target, ExportTarget::Zip);
    assert_eq!(config.export.strategy, WriteStrategy::Hardlink);
    assert!(config.export.include_overwrite);
    assert_eq!(config.export.exclude, vec!["*.log", "fomod/**"]);
    assert_eq!(config.export.compression, ZipCompression::Zstd);
    assert_eq!(config.export.compression_level, Some(10));
}

#[test]
fn test_deny_unknown_fields() {
    assert!(Config::parse("[export]\nsurprise = true").is_err());
    assert!(Config::parse("[nonsense]\nkey = 1").is_err());
}

#[test]
fn test_invalid_enum_value() {
    let err = Config::parse("[export]\nmode = \"merged\"").unwrap_err();
    assert!(err.to_string().contains("merged"), "{err}");
}

#[test]
fn test_empty_profile_rejected() {
    let err = Config::parse("[host]\nprofile = \"  \"").unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().unwrap();
    assert!(matches!(config_err, ConfigError::InvalidValue { key, .. } if key == "profile"));
}

#[test]
fn test_host_options_require_instance() {
    let config = Config::default();
    assert!(matches!(
        config.host_options().unwrap_err(),
        ConfigError::MissingKey { .. }
    ));

    let config = Config::parse("[host]\ninstance = \"/mo2\"\n[export]\ninclude_separators = true")
        .unwrap();
    let options = config.host_options().unwrap();
    assert_eq!(options.instance(), Path::new("/mo2"));
    assert_eq!(options.profile(), "Default");
    assert!(options.include_separators());
}

#[test]
fn test_export_job_from_config() {
    let config = Config::parse(
        "[export]\nstrategy = \"hardlink\"\noverwrite_existing = false\nexclude = [\"*.bak\"]",
    )
    .unwrap();
    let job = config.export_job("/out");
    assert_eq!(job.destination(), Path::new("/out"));
    assert_eq!(job.strategy(), WriteStrategy::Hardlink);
    assert!(!job.overwrite_existing());
    assert_eq!(job.exclusions(), ["*.bak".to_string()]);
    assert_eq!(job.compression_level(), None);
}

#[test]
fn test_format_options_deterministic() {
    let config = Config::parse("[host]\ninstance = \"/mo2\"").unwrap();
    let first = config.format_options();
    assert_eq!(first, config.format_options());
    assert!(first.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(first.iter().any(|line| line.starts_with("host.instance")
        && line.ends_with("= /mo2")));
    let eq_columns: Vec<usize> = first.iter().filter_map(|line| line.find(" = ")).collect();
    assert!(eq_columns.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_config_loader_tracks_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[global]\n json_log = true")
        .add_toml_file_optional("/nonexistent/mox.toml");

    assert_eq!(loader.format_loaded_files(), vec!["1. [string] <string>"]);
    assert_eq!(loader.loaded_files().len(), 1);
}

#[test]
fn test_config_loader_add_toml_file_success() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(
        file,
        r#"
[host]
instance = "/test/mo2"
"#
    )
    .expect("failed to write temp file");

    let config = ConfigLoader::new()
        .add_toml_file(file.path())
        .build()
        .expect("build should succeed");

    assert_eq!(config.host.instance, Some(PathBuf::from("/test/mo2")));
}

#[test]
fn test_config_loader_add_toml_file_not_found() {
    let loader = ConfigLoader::new().add_toml_file("/nonexistent/path/to/mox.toml");
    assert!(loader.build().is_err());
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: the variable names are unique to this test
    unsafe {
        std::env::set_var("MOXTEST_EXPORT__INCLUDE_OVERWRITE", "true");
        std::env::set_var("MOXTEST_EXPORT__EXCLUDE", "*.log,fomod/**");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[export]\n include_overwrite = false")
        .with_env_prefix("MOXTEST")
        .build()
        .expect("build should succeed");

    assert!(config.export.include_overwrite, "env var should override TOML value");
    assert_eq!(config.export.exclude, vec!["*.log", "fomod/**"]);

    // SAFETY: Same as above
    unsafe {
        std::env::remove_var("MOXTEST_EXPORT__INCLUDE_OVERWRITE");
        std::env::remove_var("MOXTEST_EXPORT__EXCLUDE");
    }
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[export]\n mode = \"combined\"")
        .set("export.mode", "separate")
        .expect("set should succeed")
        .build()
        .expect("build should succeed");

    assert_eq!(config.export.mode, ExportMode::SeparateFolders);
}

#[test]
fn test_config_loader_layered_sources() {
    let config = ConfigLoader::new()
        .add_toml_str("[host]\ninstance = \"/first\"\nprofile = \"A\"")
        .add_toml_str("[host]\nprofile = \"B\"")
        .build()
        .expect("build should succeed");

    assert_eq!(config.host.instance, Some(PathBuf::from("/first")));
    assert_eq!(config.host.profile, "B");
}
