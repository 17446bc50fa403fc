// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Virtual file tree resolution.
//!
//! ```text
//! sources (any order)
//!    |  drop inactive / separators / Overwrite (unless included)
//!    |  stable sort by (is_overwrite, priority)
//!    v
//! low ... high, Overwrite last
//!    |  walk_source() each root
//!    |  RelativePath::from_path() each file
//!    v
//! OverlayIndex: key --> OverlayEntry { winner, shadowed[low..high] }
//!               + empty directory set
//!               + per-source failures
//! ```
//!
//! Last writer wins. Equal priorities keep list order, so the later one
//! wins. The index is immutable once built and lives for one export.

pub mod path;

use serde::{Serialize, Serializer};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};

use crate::export::ExportFailure;
use crate::logging::LogReason;
use crate::source::ModSource;
use crate::utility::fs::walk::{WalkOptions, walk_source};

pub use path::{PathRejection, RelativePath};

/// One visible file of the overlay.
#[derive(Debug, Clone, Serialize)]
pub struct OverlayEntry {
    path: RelativePath,
    source_file: PathBuf,
    #[serde(serialize_with = "serialize_source")]
    winner: Arc<ModSource>,
    #[serde(serialize_with = "serialize_sources")]
    shadowed: Vec<Arc<ModSource>>,
}

impl OverlayEntry {
    /// Normalized relative path.
    #[must_use]
    pub const fn path(&self) -> &RelativePath {
        &self.path
    }

    /// Absolute path of the winning file.
    #[must_use]
    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    /// Source whose file is visible.
    #[must_use]
    pub fn winner(&self) -> &Arc<ModSource> {
        &self.winner
    }

    /// Other sources containing this path, lowest priority first.
    #[must_use]
    pub fn shadowed(&self) -> &[Arc<ModSource>] {
        &self.shadowed
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        !self.shadowed.is_empty()
    }
}

fn serialize_source<S: Serializer>(source: &Arc<ModSource>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(source.display_name())
}

fn serialize_sources<S: Serializer>(
    sources: &[Arc<ModSource>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(sources.iter().map(|s| s.display_name()))
}

/// Immutable mapping from relative path to the winning source.
#[derive(Debug, Default)]
pub struct OverlayIndex {
    entries: BTreeMap<RelativePath, OverlayEntry>,
    empty_dirs: BTreeSet<RelativePath>,
    layers: Vec<Arc<ModSource>>,
    failures: Vec<ExportFailure>,
}

impl OverlayIndex {
    /// Looks up a path, normalizing it first.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&OverlayEntry> {
        let key = RelativePath::normalize(path).ok()?;
        self.entries.get(&key)
    }

    /// Entries ordered by case-folded path.
    pub fn entries(&self) -> impl Iterator<Item = &OverlayEntry> {
        self.entries.values()
    }

    /// Entries with at least one shadowed source.
    pub fn conflicts(&self) -> impl Iterator<Item = &OverlayEntry> {
        self.entries.values().filter(|entry| entry.is_conflict())
    }

    /// Directories that are empty in some layer and hold no file in the overlay.
    pub fn empty_dirs(&self) -> impl Iterator<Item = &RelativePath> {
        self.empty_dirs.iter()
    }

    /// Layers in the order they were applied.
    #[must_use]
    pub fn layers(&self) -> &[Arc<ModSource>] {
        &self.layers
    }

    /// Recoverable problems met while walking.
    #[must_use]
    pub fn failures(&self) -> &[ExportFailure] {
        &self.failures
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, path: RelativePath, source_file: PathBuf, source: &Arc<ModSource>) {
        match self.entries.entry(path) {
            Entry::Vacant(slot) => {
                let path = slot.key().clone();
                slot.insert(OverlayEntry {
                    path,
                    source_file,
                    winner: Arc::clone(source),
                    shadowed: Vec::new(),
                });
            }
            Entry::Occupied(mut slot) => {
                let entry = slot.get_mut();
                if Arc::ptr_eq(&entry.winner, source) {
                    warn!(
                        reason = LogReason::Overlay.as_str(),
                        path = %entry.path,
                        source = source.display_name(),
                        "path differs only in case within one source, keeping the first"
                    );
                    let cause = format!(
                        "differs only in case from '{}' in the same source, not exported",
                        entry.source_file.display()
                    );
                    self.failures
                        .push(ExportFailure::file_io(source_file.display().to_string(), cause));
                    return;
                }
                let previous = std::mem::replace(&mut entry.winner, Arc::clone(source));
                entry.shadowed.push(previous);
                entry.source_file = source_file;
            }
        }
    }
}

/// Orders sources into overlay layers, lowest first.
///
/// Inactive sources and separators never contribute files. The Overwrite
/// layer is kept only when `include_overwrite` is set and always goes last.
#[must_use]
pub fn overlay_layers(sources: &[Arc<ModSource>], include_overwrite: bool) -> Vec<Arc<ModSource>> {
    let mut layers: Vec<Arc<ModSource>> = sources
        .iter()
        .filter(|s| s.is_active() && !s.is_separator())
        .filter(|s| include_overwrite || !s.is_overwrite())
        .cloned()
        .collect();
    // Stable: equal priorities keep list order
    layers.sort_by_key(|s| (s.is_overwrite(), s.priority()));
    layers
}

/// Builds an [`OverlayIndex`] from an ordered stack of sources.
#[derive(Debug, Clone)]
pub struct OverlayResolver {
    walk: WalkOptions,
}

impl Default for OverlayResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayResolver {
    /// Resolver that walks mod folders (root `meta.ini` excluded).
    #[must_use]
    pub fn new() -> Self {
        Self {
            walk: WalkOptions::for_mod_folder(),
        }
    }

    #[must_use]
    pub fn with_walk_options(mut self, walk: WalkOptions) -> Self {
        self.walk = walk;
        self
    }

    #[must_use]
    pub const fn walk_options(&self) -> &WalkOptions {
        &self.walk
    }

    /// Resolves the overlay.
    ///
    /// Never fails as a whole: an unreadable source is recorded in
    /// [`OverlayIndex::failures`] and skipped, a missing root is empty.
    #[must_use]
    pub fn resolve(&self, sources: &[Arc<ModSource>], include_overwrite: bool) -> OverlayIndex {
        let layers = overlay_layers(sources, include_overwrite);
        let _span = info_span!("resolve", layers = layers.len()).entered();

        let mut index = OverlayIndex::default();
        for source in &layers {
            self.apply_layer(&mut index, source);
        }

        index
            .empty_dirs
            .retain(|dir| !index.entries.contains_key(dir));
        index.layers = layers;

        info!(
            reason = LogReason::Overlay.as_str(),
            files = index.len(),
            conflicts = index.conflicts().count(),
            failures = index.failures.len(),
            "overlay resolved"
        );
        index
    }

    fn apply_layer(&self, index: &mut OverlayIndex, source: &Arc<ModSource>) {
        let tree = match walk_source(source.root(), &self.walk) {
            Ok(tree) => tree,
            Err(e) => {
                warn!(
                    reason = LogReason::Overlay.as_str(),
                    source = source.display_name(),
                    error = %e,
                    "cannot read source, skipping"
                );
                index.failures.push(ExportFailure::source_access(
                    source.root().display().to_string(),
                    e,
                ));
                return;
            }
        };
        debug!(
            source = source.display_name(),
            priority = source.priority(),
            files = tree.files().len(),
            "applying layer"
        );

        for (path, message) in tree.errors() {
            index.failures.push(ExportFailure::source_access(
                source.root().join(path).display().to_string(),
                message,
            ));
        }

        for file in tree.files() {
            match RelativePath::from_path(&file.relative) {
                Ok(path) => index.insert(path, file.absolute.clone(), source),
                Err(rejection) => index.failures.push(ExportFailure::file_io(
                    file.absolute.display().to_string(),
                    rejection,
                )),
            }
        }

        for dir in tree.empty_dirs() {
            if let Ok(path) = RelativePath::from_path(dir) {
                index.empty_dirs.insert(path);
            }
        }
    }
}

#[cfg(test)]
mod tests;
