// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::render_report;
use crate::export::{ExportFailure, ExportNote, ExportResult, NoteKind};

#[test]
fn test_render_report_clean() {
    let result = ExportResult {
        files_written: 3,
        dirs_created: 1,
        ..ExportResult::default()
    };
    insta::assert_debug_snapshot!(render_report(&result), @r#"
    [
        "3 written, 0 skipped, 0 conflicts, 0 errors",
    ]
    "#);
}

#[test]
fn test_render_report_lists_errors_and_notes() {
    let result = ExportResult {
        files_written: 1,
        files_skipped: 1,
        errors: vec![ExportFailure::file_io("textures/sky.dds", "access denied")],
        notes: vec![ExportNote::new(
            NoteKind::HardlinkFallback,
            "plugin.esp",
            "hardlink failed, copied instead",
        )],
        cancelled: true,
        ..ExportResult::default()
    };

    let lines = render_report(&result);
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("error: textures/sky.dds"));
    assert!(lines[0].ends_with("access denied"));
    assert_eq!(lines[1], "note: plugin.esp: hardlink failed, copied instead");
    assert_eq!(lines[2], "export cancelled before completion");
    assert!(lines[3].ends_with("(cancelled)"));
}
