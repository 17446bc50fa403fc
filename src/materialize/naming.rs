// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-mod folder names for separate-folders mode.
//!
//! ```text
//! "Armor: Pack?"  --> "Armor_ Pack_"
//! "Armor Pack"    --> "Armor Pack"
//! "armor pack"    --> "armor pack_1234"      (collides, id appended)
//! "armor pack"    --> "armor pack_1234_2"    (still collides)
//! ```

use std::collections::HashSet;

use crate::overlay::path::fold_case;
use crate::source::ModSource;

const RESERVED: &[&str] = &[
    "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8",
    "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Makes `name` usable as a single folder name on every platform.
///
/// Returns an empty string when nothing usable is left.
#[must_use]
pub fn sanitize_folder_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = replaced.trim().trim_end_matches(['.', ' ']);
    if trimmed.chars().all(|c| c == '.') {
        return String::new();
    }

    let stem = trimmed.split('.').next().unwrap_or(trimmed);
    if RESERVED.contains(&fold_case(stem).as_str()) {
        format!("{trimmed}_")
    } else {
        trimmed.to_string()
    }
}

/// A folder assigned to one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderName {
    pub name: String,
    /// Set when the sanitized display name was already taken.
    pub collided_with: Option<String>,
}

/// Hands out unique, case-insensitively distinct folder names.
#[derive(Debug, Default)]
pub struct FolderNamer {
    taken: HashSet<String>,
}

impl FolderNamer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a folder for `source`, appending its id on collision.
    pub fn assign(&mut self, source: &ModSource) -> FolderName {
        let mut base = sanitize_folder_name(source.display_name());
        if base.is_empty() {
            base = sanitize_folder_name(source.id());
        }
        if base.is_empty() {
            base = "mod".to_string();
        }

        if self.try_take(&base) {
            return FolderName {
                name: base,
                collided_with: None,
            };
        }

        let id = sanitize_folder_name(source.id());
        let with_id = if id.is_empty() {
            base.clone()
        } else {
            format!("{base}_{id}")
        };
        let mut candidate = with_id.clone();
        let mut counter = 2_usize;
        while !self.try_take(&candidate) {
            candidate = format!("{with_id}_{counter}");
            counter += 1;
        }
        FolderName {
            name: candidate,
            collided_with: Some(base),
        }
    }

    fn try_take(&mut self, name: &str) -> bool {
        self.taken.insert(fold_case(name))
    }
}
