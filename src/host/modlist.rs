// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `modlist.txt` parsing.
//!
//! ```text
//! # This file was automatically generated by Mod Organizer.
//! +Armor Pack             <-- active, highest priority
//! -Old Textures           <-- inactive
//! +Gameplay_separator     <-- separator
//! *DLC: Dawnguard         <-- unmanaged (game content)
//! +Base Fixes             <-- active, lowest priority
//! ```

/// Suffix marking separator pseudo-mods.
pub const SEPARATOR_SUFFIX: &str = "_separator";

/// State prefix of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Active,
    Inactive,
    Unmanaged,
}

/// One mod line, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModListEntry {
    /// Folder name below `mods/`.
    pub name: String,
    pub state: ListState,
}

impl ModListEntry {
    #[must_use]
    pub fn is_separator(&self) -> bool {
        self.name.ends_with(SEPARATOR_SUFFIX)
    }

    /// Name shown to the user: separators lose their suffix.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .strip_suffix(SEPARATOR_SUFFIX)
            .unwrap_or(&self.name)
    }
}

/// Parses `modlist.txt` content. The first entry has the highest priority.
///
/// Comments, blank lines and lines without a known prefix are skipped.
#[must_use]
pub fn parse_modlist(content: &str) -> Vec<ModListEntry> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim_end_matches('\r');
            let mut chars = line.chars();
            let state = match chars.next()? {
                '+' => ListState::Active,
                '-' => ListState::Inactive,
                '*' => ListState::Unmanaged,
                _ => return None,
            };
            let name = chars.as_str().trim();
            (!name.is_empty()).then(|| ModListEntry {
                name: name.to_string(),
                state,
            })
        })
        .collect()
}
