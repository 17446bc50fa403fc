// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-mod `meta.ini`.
//!
//! A mod's own file is copied byte for byte. Sources without one
//! (separators created outside the host, the Overwrite layer) get a
//! synthesized file in the host's layout, so an exported folder set can be
//! dropped into another instance's `mods/` directory:
//!
//! ```text
//! [General]
//! modid=1234
//! name=Armor Pack
//! version=1.2.0
//! priority=5
//! installedTime=2024-01-01T12:00:00
//! url=https://...
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::source::ModSource;

/// File name of the host's per-mod metadata file.
pub const META_FILE_NAME: &str = "meta.ini";

/// The host's metadata file at the top of `root`, matched case-insensitively.
#[must_use]
pub fn find_meta_file(root: &Path) -> Option<PathBuf> {
    std::fs::read_dir(root)
        .ok()?
        .filter_map(Result::ok)
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.eq_ignore_ascii_case(META_FILE_NAME))
        })
        .map(|entry| entry.path())
        .find(|path| path.is_file())
}

const LINE_END: &str = "\r\n";

/// Values are single-line in the host format.
fn flatten(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// Renders the metadata file for `source`.
///
/// `modid` is the numeric Nexus id, `0` when the mod has none.
#[must_use]
pub fn render_meta_ini(source: &ModSource) -> String {
    let mut out = String::new();
    let mut line = |key: &str, value: &str| {
        let _ = write!(out, "{key}={}{LINE_END}", flatten(value));
    };

    let modid = source.nexus_id().unwrap_or(0).to_string();
    line("modid", &modid);
    line("name", source.display_name());
    line("version", source.version());
    line("priority", &source.priority().to_string());
    line("installedTime", source.installed_time().unwrap_or_default());
    if let Some(url) = source.url() {
        line("url", url);
    }

    format!("[General]{LINE_END}{out}")
}
