// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only snapshot of one mod as supplied by the host.
//!
//! ```text
//! host (modlist.txt + meta.ini)
//!        |
//!        v
//! ModSource { id, name, version, root, priority, kind }
//!        |  Arc<ModSource>, shared by every OverlayEntry
//!        v
//! OverlayResolver / Materializer
//! ```
//!
//! Snapshots are taken once at export start. The engine never reaches
//! back into host state while an export runs.

use bon::Builder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What kind of layer a source represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Regular installed mod.
    #[default]
    Mod,
    /// Separator pseudo-mod. Groups mods in the host UI, carries no files.
    Separator,
    /// The runtime write layer. Always wins when included.
    Overwrite,
}

/// Immutable view of one mod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct ModSource {
    #[builder(into, setters(name = with_id))]
    id: String,
    #[builder(into, setters(name = with_display_name))]
    display_name: String,
    #[builder(into, setters(name = with_version), default)]
    version: String,
    #[builder(into, setters(name = with_root))]
    root: PathBuf,
    /// Higher wins.
    #[builder(setters(name = with_priority), default)]
    priority: i64,
    #[builder(setters(name = with_active), default = true)]
    active: bool,
    #[builder(setters(name = with_kind), default)]
    kind: SourceKind,
    #[builder(into, setters(name = with_url))]
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[builder(into, setters(name = with_installed_time))]
    #[serde(skip_serializing_if = "Option::is_none")]
    installed_time: Option<String>,
}

/// Identifier used for the Overwrite layer.
pub const OVERWRITE_ID: &str = "overwrite";

impl ModSource {
    /// Creates the Overwrite layer rooted at `root`.
    pub fn overwrite(root: impl Into<PathBuf>) -> Self {
        Self::builder()
            .with_id(OVERWRITE_ID)
            .with_display_name("Overwrite")
            .with_root(root)
            .with_priority(i64::MAX)
            .with_kind(SourceKind::Overwrite)
            .build()
    }

    /// Host identifier (Nexus id or folder name).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Directory holding the mod's files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn priority(&self) -> i64 {
        self.priority
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn kind(&self) -> SourceKind {
        self.kind
    }

    #[must_use]
    pub const fn is_overwrite(&self) -> bool {
        matches!(self.kind, SourceKind::Overwrite)
    }

    #[must_use]
    pub const fn is_separator(&self) -> bool {
        matches!(self.kind, SourceKind::Separator)
    }

    /// Mod page URL, if the host knows one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[must_use]
    pub fn installed_time(&self) -> Option<&str> {
        self.installed_time.as_deref()
    }

    /// Numeric Nexus id, when `id` is one.
    #[must_use]
    pub fn nexus_id(&self) -> Option<u64> {
        self.id.parse::<u64>().ok().filter(|id| *id != 0)
    }
}
