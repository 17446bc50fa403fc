// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{markdown_lines, write_markdown};
use crate::source::{ModSource, SourceKind};

fn mods() -> Vec<ModSource> {
    vec![
        ModSource::builder()
            .with_id("1234")
            .with_display_name("Armor Pack")
            .with_version("1.2.0")
            .with_root("/m/a")
            .build(),
        ModSource::builder()
            .with_id("Base Fixes")
            .with_display_name("Base Fixes")
            .with_version("3")
            .with_root("/m/b")
            .with_url("https://example.com/fixes")
            .build(),
        ModSource::builder()
            .with_id("Group")
            .with_display_name("Group")
            .with_root("/m/g")
            .with_kind(SourceKind::Separator)
            .build(),
        ModSource::builder()
            .with_id("Plain")
            .with_display_name("Plain")
            .with_root("/m/p")
            .build(),
    ]
}

#[test]
fn test_markdown_lines_with_nexus_fallback() {
    let lines = markdown_lines(&mods(), Some("skyrimspecialedition")).join("\n");
    insta::assert_snapshot!(lines, @r"
    - [Armor Pack](https://nexusmods.com/skyrimspecialedition/mods/1234) v1.2.0
    - [Base Fixes](https://example.com/fixes) v3
    - Plain
    ");
}

#[test]
fn test_markdown_lines_without_game_name() {
    let lines = markdown_lines(&mods(), None);
    assert_eq!(lines[0], "- Armor Pack v1.2.0");
}

#[test]
fn test_write_markdown_counts_lines() {
    let mut out = Vec::new();
    let count = write_markdown(&mut out, &mods(), None).unwrap();
    assert_eq!(count, 3);
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
}
