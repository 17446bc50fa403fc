// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use crate::config::ExportConfig;
use crate::export::{ExportMode, ExportTarget, WriteStrategy, ZipCompression};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["mox", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "mox", "-l", "5", "-m", "/games/mo2", "-p", "Survival", "--ini", "a.toml", "--ini",
        "b.toml", "options",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(cli.global.instance, Some(PathBuf::from("/games/mo2")));
    assert_eq!(cli.global.profile.as_deref(), Some("Survival"));
    assert_eq!(
        cli.global.inis,
        vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );

    let keys: Vec<&str> = cli
        .global
        .to_config_overrides()
        .into_iter()
        .map(|(key, _)| key)
        .collect();
    insta::assert_debug_snapshot!(keys, @r#"
    [
        "global.output_log_level",
        "global.file_log_level",
        "host.instance",
        "host.profile",
    ]
    "#);
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["mox", "-l", "7", "version"]).is_err());
}

#[test]
fn test_parse_export_defaults() {
    let cli = Cli::try_parse_from(["mox", "export", "out"]).unwrap();
    let Some(Command::Export(args)) = cli.command else {
        panic!("expected export command");
    };
    assert_eq!(args.destination, PathBuf::from("out"));
    assert!(args.mode.is_none());
    assert!(!args.zip && !args.hardlink && !args.json);

    // No flag given: config values are kept
    let mut export = ExportConfig {
        strategy: WriteStrategy::Hardlink,
        exclude: vec!["*.log".to_string()],
        ..ExportConfig::default()
    };
    args.apply(&mut export);
    assert_eq!(export.strategy, WriteStrategy::Hardlink);
    assert_eq!(export.exclude, vec!["*.log"]);
    assert!(export.overwrite_existing);
}

#[test]
fn test_parse_export_flags() {
    let cli = Cli::try_parse_from([
        "mox",
        "export",
        "--mode",
        "separate",
        "--zip",
        "--hardlink",
        "--overwrite",
        "--separators",
        "--no-overwrite-existing",
        "-x",
        "*.log",
        "--exclude",
        "fomod/**",
        "--compression",
        "zstd",
        "--level",
        "19",
        "--cleanup-on-cancel",
        "out.zip",
    ])
    .unwrap();
    let Some(Command::Export(args)) = cli.command else {
        panic!("expected export command");
    };

    let mut export = ExportConfig {
        exclude: vec!["*.bak".to_string()],
        ..ExportConfig::default()
    };
    args.apply(&mut export);

    assert_eq!(export.mode, ExportMode::SeparateFolders);
    assert_eq!(export.target, ExportTarget::Zip);
    assert_eq!(export.strategy, WriteStrategy::Hardlink);
    assert!(export.include_overwrite);
    assert!(export.include_separators);
    assert!(!export.overwrite_existing);
    assert!(export.cleanup_on_cancel);
    assert_eq!(export.exclude, vec!["*.bak", "*.log", "fomod/**"]);
    assert_eq!(export.compression, ZipCompression::Zstd);
    assert_eq!(export.compression_level, Some(19));
}

#[test]
fn test_parse_export_rejects_unknown_mode() {
    assert!(Cli::try_parse_from(["mox", "export", "--mode", "merged", "out"]).is_err());
}

#[test]
fn test_parse_export_requires_destination() {
    assert!(Cli::try_parse_from(["mox", "export"]).is_err());
}

#[test]
fn test_parse_markdown() {
    let cli = Cli::try_parse_from(["mox", "markdown", "-o", "mods.md", "--game", "skyrim"]).unwrap();
    let Some(Command::Markdown(args)) = cli.command else {
        panic!("expected markdown command");
    };
    assert_eq!(args.output, Some(PathBuf::from("mods.md")));
    assert_eq!(args.game.as_deref(), Some("skyrim"));
    assert!(!args.clipboard);
}

#[test]
fn test_parse_markdown_clipboard() {
    let cli = Cli::try_parse_from(["mox", "markdown", "--clipboard"]).unwrap();
    let Some(Command::Markdown(args)) = cli.command else {
        panic!("expected markdown command");
    };
    assert!(args.clipboard);
    assert_eq!(args.output, None);

    // One destination only
    assert!(Cli::try_parse_from(["mox", "markdown", "-c", "-o", "mods.md"]).is_err());
}
