// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod Organizer 2 instance reader.
//!
//! ```text
//! <instance>/
//! ├── mods/<folder>/meta.ini       --> version, modid, url
//! ├── overwrite/                   --> Overwrite layer
//! └── profiles/<profile>/modlist.txt
//!        first line = highest priority
//!        |
//!        v
//! Vec<ModSource>  lowest priority first, last line = priority 0
//! ```
//!
//! The mod list is read once; the returned snapshots do not refer back
//! to the instance.

pub mod meta;
pub mod modlist;

use bon::Builder;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ExportError;
use crate::logging::LogReason;
use crate::source::{ModSource, SourceKind};
use crate::utility::encoding::read_text;

pub use meta::{ModMeta, parse_meta_ini, read_meta_ini};
pub use modlist::{ListState, ModListEntry, parse_modlist};

/// Where and what to read.
#[derive(Debug, Clone, Builder)]
pub struct HostOptions {
    #[builder(into, setters(name = with_instance))]
    instance: PathBuf,
    #[builder(into, setters(name = with_profile), default = "Default".to_string())]
    profile: String,
    #[builder(into, setters(name = with_mods_dir))]
    mods_dir: Option<PathBuf>,
    #[builder(into, setters(name = with_overwrite_dir))]
    overwrite_dir: Option<PathBuf>,
    #[builder(into, setters(name = with_profiles_dir))]
    profiles_dir: Option<PathBuf>,
    /// Return separators as well (they never carry files).
    #[builder(setters(name = with_include_separators), default)]
    include_separators: bool,
}

impl HostOptions {
    #[must_use]
    pub fn instance(&self) -> &Path {
        &self.instance
    }

    #[must_use]
    pub fn profile(&self) -> &str {
        &self.profile
    }

    #[must_use]
    pub const fn include_separators(&self) -> bool {
        self.include_separators
    }
}

/// Paths of one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mo2Instance {
    pub root: PathBuf,
    pub mods_dir: PathBuf,
    pub overwrite_dir: PathBuf,
    pub profiles_dir: PathBuf,
}

impl Mo2Instance {
    /// Standard layout below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            mods_dir: root.join("mods"),
            overwrite_dir: root.join("overwrite"),
            profiles_dir: root.join("profiles"),
            root,
        }
    }

    /// Standard layout with the overrides from `options` applied.
    #[must_use]
    pub fn from_options(options: &HostOptions) -> Self {
        let mut instance = Self::new(&options.instance);
        if let Some(mods) = &options.mods_dir {
            instance.mods_dir.clone_from(mods);
        }
        if let Some(overwrite) = &options.overwrite_dir {
            instance.overwrite_dir.clone_from(overwrite);
        }
        if let Some(profiles) = &options.profiles_dir {
            instance.profiles_dir.clone_from(profiles);
        }
        instance
    }

    #[must_use]
    pub fn mod_path(&self, folder: &str) -> PathBuf {
        self.mods_dir.join(folder)
    }

    #[must_use]
    pub fn modlist_path(&self, profile: &str) -> PathBuf {
        self.profiles_dir.join(profile).join("modlist.txt")
    }

    /// Snapshots the active mods of `profile`, lowest priority first.
    ///
    /// Inactive and unmanaged entries are skipped. Separators are returned
    /// only with `include_separators`, whatever their prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Host`] when `modlist.txt` cannot be read.
    pub fn load_sources(
        &self,
        profile: &str,
        include_separators: bool,
    ) -> Result<Vec<ModSource>, ExportError> {
        let path = self.modlist_path(profile);
        let content = read_text(&path).map_err(|e| ExportError::Host {
            message: format!("{}: {e}", path.display()),
        })?;
        let entries = parse_modlist(&content);

        let top = i64::try_from(entries.len()).unwrap_or(i64::MAX);
        let mut sources: Vec<ModSource> = entries
            .iter()
            .zip((0..top).rev())
            .filter(|(entry, _)| {
                if entry.is_separator() {
                    include_separators
                } else {
                    entry.state == ListState::Active
                }
            })
            .map(|(entry, priority)| self.snapshot(entry, priority))
            .collect();
        sources.reverse();

        info!(
            reason = LogReason::Host.as_str(),
            profile,
            listed = entries.len(),
            exported = sources.len(),
            "mod list loaded"
        );
        Ok(sources)
    }

    /// The Overwrite layer of this instance.
    #[must_use]
    pub fn overwrite_source(&self) -> ModSource {
        ModSource::overwrite(&self.overwrite_dir)
    }

    fn snapshot(&self, entry: &ModListEntry, priority: i64) -> ModSource {
        let root = self.mod_path(&entry.name);
        let meta = read_meta_ini(&root.join("meta.ini"));
        debug!(name = %entry.name, priority, modid = ?meta.modid, "mod snapshot");

        let id = meta
            .modid
            .map_or_else(|| entry.name.clone(), |modid| modid.to_string());
        let kind = if entry.is_separator() {
            SourceKind::Separator
        } else {
            SourceKind::Mod
        };
        ModSource::builder()
            .with_id(id)
            .with_display_name(entry.display_name())
            .with_version(meta.version.unwrap_or_default())
            .with_root(root)
            .with_priority(priority)
            .with_kind(kind)
            .maybe_with_url(meta.url)
            .maybe_with_installed_time(meta.installed_time)
            .build()
    }
}

/// Loads the mods selected by `options`.
///
/// # Errors
///
/// Returns [`ExportError::Host`] when `modlist.txt` cannot be read.
pub fn load_sources(options: &HostOptions) -> Result<Vec<ModSource>, ExportError> {
    Mo2Instance::from_options(options).load_sources(options.profile(), options.include_separators())
}

/// The Overwrite layer selected by `options`.
#[must_use]
pub fn overwrite_source(options: &HostOptions) -> ModSource {
    Mo2Instance::from_options(options).overwrite_source()
}
