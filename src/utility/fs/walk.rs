// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use bon::Builder;
use flume::bounded;
use ignore::{DirEntry, WalkBuilder};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Options for walking one source tree.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Number of threads (None = auto-detect based on CPU count)
    #[builder(setters(name = with_threads))]
    threads: Option<usize>,
    /// File names skipped at the root of the tree (case-insensitive)
    #[builder(setters(name = with_skip_root_files), default)]
    skip_root_files: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Returns the number of threads (None = auto-detect).
    #[must_use]
    pub const fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Returns the root-level file names that are never listed.
    #[must_use]
    pub fn skip_root_files(&self) -> &[String] {
        &self.skip_root_files
    }

    /// Options for walking a mod folder: the host's `meta.ini` is not mod content.
    #[must_use]
    pub fn for_mod_folder() -> Self {
        Self::builder()
            .with_skip_root_files(vec!["meta.ini".to_string()])
            .build()
    }

    fn skips_root_file(&self, name: &str) -> bool {
        self.skip_root_files
            .iter()
            .any(|skip| skip.eq_ignore_ascii_case(name))
    }
}

/// A regular file found in a source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFile {
    /// Path relative to the tree root, as found on disk.
    pub relative: PathBuf,
    /// Absolute path used to read the content.
    pub absolute: PathBuf,
}

/// Everything found below one source root.
#[derive(Debug, Default)]
pub struct SourceTree {
    files: Vec<TreeFile>,
    empty_dirs: Vec<PathBuf>,
    errors: Vec<(PathBuf, String)>,
    escaped_links: usize,
}

impl SourceTree {
    /// Files, sorted by relative path.
    #[must_use]
    pub fn files(&self) -> &[TreeFile] {
        &self.files
    }

    /// Directories without any entry, relative to the root, sorted.
    #[must_use]
    pub fn empty_dirs(&self) -> &[PathBuf] {
        &self.empty_dirs
    }

    /// Entries that could not be read, with the cause.
    #[must_use]
    pub fn errors(&self) -> &[(PathBuf, String)] {
        &self.errors
    }

    /// Symbolic links ignored because they resolve outside the root.
    #[must_use]
    pub const fn escaped_links(&self) -> usize {
        self.escaped_links
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.empty_dirs.is_empty()
    }
}

enum WalkEvent {
    File(TreeFile),
    EmptyDir(PathBuf),
    Error(PathBuf, String),
    Escaped(PathBuf),
}

/// Builds a `WalkBuilder` that lists everything below `root`.
///
/// No ignore files, hidden entries included, links never followed.
pub(super) fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.follow_links(false);

    if let Some(threads) = options.threads() {
        builder.threads(threads);
    }

    builder
}

/// Walks one source root in parallel using `ignore::WalkParallel`.
///
/// A root that does not exist is an empty tree. Symbolic links are kept only
/// when they resolve to a regular file inside the root.
///
/// # Errors
///
/// Returns the I/O error when the root exists but cannot be listed.
pub fn walk_source<P: AsRef<Path>>(root: P, options: &WalkOptions) -> io::Result<SourceTree> {
    let root = root.as_ref();

    match std::fs::read_dir(root) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(root = %root.display(), "source root does not exist, treating as empty");
            return Ok(SourceTree::default());
        }
        Err(e) => return Err(e),
    }

    let canonical_root = Arc::new(dunce::canonicalize(root)?);
    let root_path = Arc::new(root.to_path_buf());
    let options_shared = Arc::new(options.clone());

    // Bounded so huge trees cannot exhaust memory before the collector drains
    let (tx, rx) = bounded::<WalkEvent>(1000);

    let parallel = build_walker(root, options).build_parallel();

    std::thread::scope(|scope| {
        let collector = scope.spawn(move || rx.iter().collect::<Vec<_>>());

        parallel.run(|| {
            let tx = tx.clone();
            let root_path = Arc::clone(&root_path);
            let canonical_root = Arc::clone(&canonical_root);
            let options = Arc::clone(&options_shared);

            Box::new(move |entry_result| {
                let event = match entry_result {
                    Ok(entry) if entry.depth() == 0 => None,
                    Ok(entry) => classify(&entry, &root_path, &canonical_root, &options),
                    Err(e) => {
                        let path = error_path(&e).unwrap_or_else(|| root_path.to_path_buf());
                        Some(WalkEvent::Error(path, e.to_string()))
                    }
                };
                if let Some(event) = event {
                    // Receiver outlives every sender
                    let _ = tx.send(event);
                }
                ignore::WalkState::Continue
            })
        });
        drop(tx);

        let events = collector.join().unwrap_or_default();
        Ok(collect_tree(events))
    })
}

fn classify(
    entry: &DirEntry,
    root: &Path,
    canonical_root: &Path,
    options: &WalkOptions,
) -> Option<WalkEvent> {
    let path = entry.path();
    let relative = path.strip_prefix(root).ok()?.to_path_buf();
    let file_type = entry.file_type()?;

    if entry.depth() == 1
        && !file_type.is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| options.skips_root_file(name))
    {
        return None;
    }

    if file_type.is_dir() {
        return match std::fs::read_dir(path) {
            Ok(mut entries) => entries
                .next()
                .is_none()
                .then_some(WalkEvent::EmptyDir(relative)),
            Err(e) => Some(WalkEvent::Error(relative, e.to_string())),
        };
    }

    if file_type.is_symlink() {
        return match dunce::canonicalize(path) {
            Ok(target) if target.starts_with(canonical_root) && target.is_file() => {
                Some(WalkEvent::File(TreeFile {
                    relative,
                    absolute: path.to_path_buf(),
                }))
            }
            Ok(target) if target.starts_with(canonical_root) => None,
            Ok(_) | Err(_) => Some(WalkEvent::Escaped(relative)),
        };
    }

    file_type.is_file().then(|| {
        WalkEvent::File(TreeFile {
            relative,
            absolute: path.to_path_buf(),
        })
    })
}

fn collect_tree(events: Vec<WalkEvent>) -> SourceTree {
    let mut tree = SourceTree::default();
    for event in events {
        match event {
            WalkEvent::File(file) => tree.files.push(file),
            WalkEvent::EmptyDir(dir) => tree.empty_dirs.push(dir),
            WalkEvent::Error(path, message) => {
                warn!(path = %path.display(), error = %message, "walk error");
                tree.errors.push((path, message));
            }
            WalkEvent::Escaped(path) => {
                warn!(path = %path.display(), "ignoring link that leaves the source root");
                tree.escaped_links += 1;
            }
        }
    }
    tree.files.sort_by(|a, b| a.relative.cmp(&b.relative));
    tree.empty_dirs.sort();
    tree.errors.sort();
    tree
}

fn error_path(error: &ignore::Error) -> Option<PathBuf> {
    match error {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}
