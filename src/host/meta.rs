// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Minimal reader for the `[General]` section of a mod's `meta.ini`.

use std::io;
use std::path::Path;
use tracing::debug;

use crate::utility::encoding::read_text;

/// The few `meta.ini` values a snapshot needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModMeta {
    /// Nexus id, `None` when absent or 0.
    pub modid: Option<u64>,
    pub version: Option<String>,
    pub url: Option<String>,
    pub installed_time: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Parses `meta.ini` content. Unknown keys and other sections are ignored.
#[must_use]
pub fn parse_meta_ini(content: &str) -> ModMeta {
    let mut meta = ModMeta::default();
    let mut in_general = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_general = section.eq_ignore_ascii_case("General");
            continue;
        }
        if !in_general {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"');
        match key.trim() {
            "modid" => meta.modid = value.parse::<u64>().ok().filter(|id| *id != 0),
            "version" => meta.version = non_empty(value),
            "url" => meta.url = non_empty(value),
            "installedTime" | "installDate" => meta.installed_time = non_empty(value),
            _ => {}
        }
    }
    meta
}

/// Reads `meta.ini` at `path`. A missing or unreadable file yields defaults.
#[must_use]
pub fn read_meta_ini(path: &Path) -> ModMeta {
    match read_text(path) {
        Ok(content) => parse_meta_ini(&content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => ModMeta::default(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot read meta.ini, using defaults");
            ModMeta::default()
        }
    }
}
