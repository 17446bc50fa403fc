// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel, LogReason};

#[test]
fn test_log_level_conversion() {
    let conversions = vec![
        ("from_int(0)", LogLevel::from_int(0)),
        ("from_int(3)", LogLevel::from_int(3)),
        ("from_int(5)", LogLevel::from_int(5)),
        ("from_int(100)", LogLevel::from_int(100)),
    ];
    insta::assert_debug_snapshot!(conversions, @r#"
    [
        (
            "from_int(0)",
            LogLevel(
                0,
            ),
        ),
        (
            "from_int(3)",
            LogLevel(
                3,
            ),
        ),
        (
            "from_int(5)",
            LogLevel(
                5,
            ),
        ),
        (
            "from_int(100)",
            LogLevel(
                6,
            ),
        ),
    ]
    "#);
}

#[test]
fn test_log_level_rejects_out_of_range() {
    assert!(LogLevel::new(7).is_err());
    assert_eq!(LogLevel::try_from(4).unwrap(), LogLevel::DEBUG);
}

#[test]
fn test_filter_strings() {
    let filters: Vec<String> = [0, 1, 2, 3, 4, 5, 6]
        .into_iter()
        .map(|level| LogLevel::from_int(level).to_filter_string())
        .collect();
    assert_eq!(
        filters,
        vec![
            "off",
            "error",
            "warn",
            "warn,mox=info",
            "warn,mox=debug",
            "warn,mox=trace",
            "trace",
        ]
    );
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.json_file());
}

#[test]
fn test_log_reason_tags() {
    let tags: Vec<&str> = [
        LogReason::Overlay,
        LogReason::Filter,
        LogReason::Write,
        LogReason::Archive,
        LogReason::Host,
        LogReason::Interruption,
    ]
    .iter()
    .map(LogReason::as_str)
    .collect();
    assert_eq!(
        tags,
        vec!["overlay", "filter", "write", "archive", "host", "interrupt"]
    );
}
