// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::path::{PathRejection, RelativePath};
use super::{OverlayResolver, overlay_layers};
use crate::source::{ModSource, SourceKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn source(name: &str, root: PathBuf, priority: i64) -> Arc<ModSource> {
    Arc::new(
        ModSource::builder()
            .with_id(name)
            .with_display_name(name)
            .with_root(root)
            .with_priority(priority)
            .build(),
    )
}

fn names(sources: &[Arc<ModSource>]) -> Vec<&str> {
    sources.iter().map(|s| s.display_name()).collect()
}

// =============================================================================
// RelativePath
// =============================================================================

#[test]
fn test_normalize_collapses_separators_and_drive() {
    let path = RelativePath::normalize(r"C:\Data\\Textures/./Sky.DDS").unwrap();
    assert_eq!(path.as_str(), "Data/Textures/Sky.DDS");
    assert_eq!(path.key(), "data/textures/sky.dds");
}

#[test]
fn test_normalize_rejects_parent_and_empty() {
    assert_eq!(
        RelativePath::normalize("a/../b").unwrap_err(),
        PathRejection::ParentSegment
    );
    assert_eq!(
        RelativePath::normalize("//./").unwrap_err(),
        PathRejection::Empty
    );
}

#[test]
fn test_case_insensitive_equality() {
    let a = RelativePath::normalize("Meshes/Armor.nif").unwrap();
    let b = RelativePath::normalize("meshes\\ARMOR.NIF").unwrap();
    assert_eq!(a, b);
    assert_ne!(a.as_str(), b.as_str());
}

#[test]
fn test_parent_and_prefix() {
    let path = RelativePath::normalize("a/b/c.txt").unwrap();
    let parent = path.parent().unwrap();
    assert_eq!(parent.as_str(), "a/b");
    assert_eq!(path.file_name(), "c.txt");
    assert!(path.starts_with(&parent));
    assert!(!path.starts_with(&RelativePath::normalize("a/b/c").unwrap()));
    assert!(RelativePath::normalize("top").unwrap().parent().is_none());

    let folder = RelativePath::normalize("Armor Pack").unwrap();
    assert_eq!(path.prefixed(&folder).as_str(), "Armor Pack/a/b/c.txt");
}

#[test]
fn test_to_native() {
    let path = RelativePath::normalize("a/b.txt").unwrap();
    assert_eq!(
        path.to_native(Path::new("/out")),
        Path::new("/out").join("a").join("b.txt")
    );
}

// =============================================================================
// Layer ordering
// =============================================================================

#[test]
fn test_layer_order_priority_then_overwrite() {
    let overwrite = Arc::new(ModSource::overwrite("/ow"));
    let low = source("Low", PathBuf::from("/low"), 1);
    let high = source("High", PathBuf::from("/high"), 9);
    let inactive = Arc::new(
        ModSource::builder()
            .with_id("off")
            .with_display_name("Off")
            .with_root("/off")
            .with_priority(5)
            .with_active(false)
            .build(),
    );
    let separator = Arc::new(
        ModSource::builder()
            .with_id("sep")
            .with_display_name("Sep")
            .with_root("/sep")
            .with_kind(SourceKind::Separator)
            .build(),
    );
    let all = vec![
        Arc::clone(&overwrite),
        high,
        inactive,
        separator,
        low,
    ];

    assert_eq!(
        names(&overlay_layers(&all, true)),
        vec!["Low", "High", "Overwrite"]
    );
    assert_eq!(names(&overlay_layers(&all, false)), vec!["Low", "High"]);
}

#[test]
fn test_layer_order_ties_keep_list_order() {
    let first = source("First", PathBuf::from("/a"), 3);
    let second = source("Second", PathBuf::from("/b"), 3);
    let layers = overlay_layers(&[first, second], false);
    assert_eq!(names(&layers), vec!["First", "Second"]);
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn test_higher_priority_wins_and_loser_is_shadowed() {
    let temp = temp_dir();
    write(&temp.path().join("a"), "x.txt", "a");
    write(&temp.path().join("b"), "x.txt", "b");
    let mod_a = source("ModA", temp.path().join("a"), 1);
    let mod_b = source("ModB", temp.path().join("b"), 2);

    // Listed high first: order comes from priority, not the list
    let index = OverlayResolver::new().resolve(&[Arc::clone(&mod_b), Arc::clone(&mod_a)], false);

    let entry = index.get("x.txt").unwrap();
    assert_eq!(entry.winner().display_name(), "ModB");
    assert_eq!(names(entry.shadowed()), vec!["ModA"]);
    assert_eq!(std::fs::read_to_string(entry.source_file()).unwrap(), "b");
    assert_eq!(index.conflicts().count(), 1);
}

#[test]
fn test_every_path_appears_once() {
    let temp = temp_dir();
    write(&temp.path().join("a"), "Data/One.txt", "1");
    write(&temp.path().join("a"), "shared.txt", "a");
    write(&temp.path().join("b"), "data/one.TXT", "2");
    write(&temp.path().join("b"), "two.txt", "2");
    write(&temp.path().join("c"), "SHARED.txt", "c");
    let sources = vec![
        source("A", temp.path().join("a"), 0),
        source("B", temp.path().join("b"), 1),
        source("C", temp.path().join("c"), 2),
    ];

    let index = OverlayResolver::new().resolve(&sources, false);

    let keys: Vec<&str> = index.entries().map(|e| e.path().key()).collect();
    assert_eq!(keys, vec!["data/one.txt", "shared.txt", "two.txt"]);
    assert_eq!(index.get("DATA/ONE.TXT").unwrap().winner().display_name(), "B");
    assert_eq!(index.get("shared.txt").unwrap().winner().display_name(), "C");
    // First spelling seen is kept for output
    assert_eq!(index.get("shared.txt").unwrap().path().as_str(), "shared.txt");
}

#[test]
fn test_overwrite_always_wins_when_included() {
    let temp = temp_dir();
    write(&temp.path().join("mod"), "ini/game.ini", "mod");
    write(&temp.path().join("overwrite"), "ini/game.ini", "runtime");
    let top = Arc::new(
        ModSource::builder()
            .with_id("top")
            .with_display_name("Top")
            .with_root(temp.path().join("mod"))
            .with_priority(i64::MAX)
            .build(),
    );
    let overwrite = Arc::new(ModSource::overwrite(temp.path().join("overwrite")));
    let sources = vec![Arc::clone(&overwrite), top];

    let included = OverlayResolver::new().resolve(&sources, true);
    let entry = included.get("ini/game.ini").unwrap();
    assert!(entry.winner().is_overwrite());
    assert_eq!(names(entry.shadowed()), vec!["Top"]);

    let excluded = OverlayResolver::new().resolve(&sources, false);
    assert_eq!(
        excluded.get("ini/game.ini").unwrap().winner().display_name(),
        "Top"
    );
}

#[test]
fn test_missing_root_is_empty_not_error() {
    let temp = temp_dir();
    let sources = vec![source("Ghost", temp.path().join("ghost"), 0)];
    let index = OverlayResolver::new().resolve(&sources, false);
    assert!(index.is_empty());
    assert!(index.failures().is_empty());
}

#[test]
fn test_unreadable_root_is_recorded_and_skipped() {
    let temp = temp_dir();
    let not_a_dir = temp.path().join("file-not-dir");
    std::fs::write(&not_a_dir, "x").unwrap();
    write(&temp.path().join("good"), "ok.txt", "ok");
    let sources = vec![
        source("Broken", not_a_dir, 0),
        source("Good", temp.path().join("good"), 1),
    ];

    let index = OverlayResolver::new().resolve(&sources, false);

    assert_eq!(index.len(), 1);
    assert_eq!(index.failures().len(), 1);
    assert_eq!(
        index.failures()[0].kind(),
        crate::export::FailureKind::SourceAccess
    );
}

#[test]
fn test_root_meta_ini_is_not_content() {
    let temp = temp_dir();
    write(&temp.path().join("a"), "meta.ini", "[General]\nmodid=1");
    write(&temp.path().join("a"), "plugin.esp", "p");
    let index = OverlayResolver::new().resolve(&[source("A", temp.path().join("a"), 0)], false);
    assert!(index.get("meta.ini").is_none());
    assert_eq!(index.len(), 1);
}

#[test]
fn test_empty_dirs_are_tracked() {
    let temp = temp_dir();
    std::fs::create_dir_all(temp.path().join("a/saves/empty")).unwrap();
    write(&temp.path().join("a"), "x.txt", "x");
    let index = OverlayResolver::new().resolve(&[source("A", temp.path().join("a"), 0)], false);
    let dirs: Vec<&str> = index.empty_dirs().map(RelativePath::as_str).collect();
    assert_eq!(dirs, vec!["saves/empty"]);
}

#[cfg(unix)]
#[test]
fn test_case_duplicate_within_one_source_is_reported() {
    let temp = temp_dir();
    write(&temp.path().join("a"), "Readme.txt", "upper");
    write(&temp.path().join("a"), "readme.txt", "lower");
    let index = OverlayResolver::new().resolve(&[source("A", temp.path().join("a"), 0)], false);

    assert_eq!(index.len(), 1);
    let entry = index.get("README.TXT").unwrap();
    assert!(!entry.is_conflict());
    assert_eq!(index.failures().len(), 1);
    let failure = &index.failures()[0];
    assert_eq!(failure.kind(), crate::export::FailureKind::FileIo);
    assert_ne!(failure.path(), entry.source_file().display().to_string());
}
