// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for exporting a Mod Organizer 2 instance.
//!
//! Builds a small instance on disk, reads it through the host adapter and
//! runs the planner against every target.

use mox::export::{ExportJob, ExportMode, ExportPlanner, ExportTarget, WriteStrategy};
use mox::host::{self, HostOptions};
use mox::markdown::write_markdown;
use mox::source::ModSource;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Instance layout:
///
/// ```text
/// Patch  (highest)  textures/sky.dds = "patch"
/// Off    (inactive) off.txt
/// Base   (lowest)   textures/sky.dds = "base", readme.txt, meta.ini
/// overwrite         textures/sky.dds = "runtime"
/// ```
fn instance() -> TempDir {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let root = temp.path();
    write(
        &root.join("profiles/Default/modlist.txt"),
        "# managed by mox tests\r\n+Patch\r\n-Off\r\n-Textures_separator\r\n+Base\r\n",
    );
    write(&root.join("mods/Patch/textures/sky.dds"), "patch");
    write(&root.join("mods/Off/off.txt"), "off");
    write(&root.join("mods/Base/textures/sky.dds"), "base");
    write(&root.join("mods/Base/readme.txt"), "base readme");
    write(
        &root.join("mods/Base/meta.ini"),
        "[General]\r\nmodid=1001\r\nversion=1.0\r\n",
    );
    write(&root.join("overwrite/textures/sky.dds"), "runtime");
    temp
}

fn sources(root: &Path, include_separators: bool) -> Vec<ModSource> {
    let options = HostOptions::builder()
        .with_instance(root)
        .with_include_separators(include_separators)
        .build();
    let mut sources = host::load_sources(&options).unwrap();
    sources.push(host::overwrite_source(&options));
    sources
}

#[test]
fn export_combined_directory() {
    let temp = instance();
    let out = temp.path().join("export");
    let job = ExportJob::builder().with_destination(&out).build();

    let result = ExportPlanner::new()
        .plan(&sources(temp.path(), false), &job)
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(out.join("textures/sky.dds")).unwrap(),
        "patch"
    );
    assert_eq!(
        std::fs::read_to_string(out.join("readme.txt")).unwrap(),
        "base readme"
    );
    assert!(!out.join("meta.ini").exists());
    assert!(!out.join("off.txt").exists());
    assert_eq!(result.files_written, 2);
    assert_eq!(result.conflicts.len(), 1);
    assert!(result.is_clean());
}

#[test]
fn export_with_overwrite_layer() {
    let temp = instance();
    let out = temp.path().join("export");
    let job = ExportJob::builder()
        .with_destination(&out)
        .with_include_overwrite(true)
        .build();

    ExportPlanner::new()
        .plan(&sources(temp.path(), false), &job)
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(out.join("textures/sky.dds")).unwrap(),
        "runtime"
    );
}

#[test]
fn export_combined_zip() {
    let temp = instance();
    let archive_path = temp.path().join("export.zip");
    let job = ExportJob::builder()
        .with_destination(&archive_path)
        .with_target(ExportTarget::Zip)
        .build();

    let result = ExportPlanner::new()
        .plan(&sources(temp.path(), false), &job)
        .unwrap();
    assert_eq!(result.files_written, 2);

    let file = std::fs::File::open(&archive_path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let names: BTreeSet<String> = archive.file_names().map(str::to_string).collect();
    assert!(names.contains("textures/sky.dds"));
    assert!(names.contains("readme.txt"));
    assert!(!names.contains("meta.ini"));

    let mut content = String::new();
    archive
        .by_name("textures/sky.dds")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "patch");
}

#[test]
fn export_separate_folders_with_separators() {
    let temp = instance();
    let out = temp.path().join("export");
    let job = ExportJob::builder()
        .with_destination(&out)
        .with_mode(ExportMode::SeparateFolders)
        .build();

    let result = ExportPlanner::new()
        .plan(&sources(temp.path(), true), &job)
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(out.join("Base/textures/sky.dds")).unwrap(),
        "base"
    );
    assert_eq!(
        std::fs::read_to_string(out.join("Patch/textures/sky.dds")).unwrap(),
        "patch"
    );
    let base_meta = std::fs::read_to_string(out.join("Base/meta.ini")).unwrap();
    assert!(base_meta.starts_with("[General]\r\nmodid=1001\r\n"));
    assert!(out.join("Textures").is_dir());
    assert!(out.join("Textures/meta.ini").is_file());
    assert!(!out.join("Off").exists());
    assert!(result.conflicts.is_empty());
}

#[test]
fn export_hardlink_shares_content() {
    let temp = instance();
    let out = temp.path().join("export");
    let job = ExportJob::builder()
        .with_destination(&out)
        .with_strategy(WriteStrategy::Hardlink)
        .build();

    let result = ExportPlanner::new()
        .plan(&sources(temp.path(), false), &job)
        .unwrap();
    assert_eq!(result.files_written, 2);

    // Same volume: the export is a link to the winning mod file
    std::fs::write(temp.path().join("mods/Patch/textures/sky.dds"), "edited").unwrap();
    assert_eq!(
        std::fs::read_to_string(out.join("textures/sky.dds")).unwrap(),
        "edited"
    );
}

#[test]
fn export_cancelled_before_first_write() {
    let temp = instance();
    let archive_path = temp.path().join("export.zip");
    let job = ExportJob::builder()
        .with_destination(&archive_path)
        .with_target(ExportTarget::Zip)
        .build();
    let token = CancellationToken::new();
    token.cancel();

    let result = ExportPlanner::new()
        .with_cancel_token(token)
        .plan(&sources(temp.path(), false), &job)
        .unwrap();

    assert!(result.cancelled);
    assert_eq!(result.files_written, 0);
    assert!(!archive_path.exists());
}

#[test]
fn markdown_lists_active_mods() {
    let temp = instance();
    let mut out = Vec::new();
    let count = write_markdown(&mut out, &sources(temp.path(), true), Some("skyrimspecialedition"))
        .unwrap();

    assert_eq!(count, 2);
    let text = String::from_utf8(out).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r"
    - [Base](https://nexusmods.com/skyrimspecialedition/mods/1001) v1.0
    - Patch
    ");
}
