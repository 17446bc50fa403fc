// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Markdown mod list.
//!
//! ```text
//! - [Armor Pack](https://nexusmods.com/skyrimspecialedition/mods/1234) v1.2.0
//! - Base Fixes v3
//! - Unversioned
//! ```

use std::io::{self, Write};

use crate::source::ModSource;

/// Nexus page of a mod.
#[must_use]
pub fn nexus_mod_url(game_nexus_name: &str, mod_id: u64) -> String {
    format!("https://nexusmods.com/{game_nexus_name}/mods/{mod_id}")
}

/// One line for `source`, without line terminator.
///
/// The URL comes from the mod itself, else from its Nexus id when a game
/// name is known. Without URL the name is written bare.
#[must_use]
pub fn markdown_line(source: &ModSource, game_nexus_name: Option<&str>) -> String {
    let url = source.url().map(str::to_string).or_else(|| {
        let game = game_nexus_name.filter(|g| !g.is_empty())?;
        source.nexus_id().map(|id| nexus_mod_url(game, id))
    });

    let mut line = match url {
        Some(url) => format!("- [{}]({url})", source.display_name()),
        None => format!("- {}", source.display_name()),
    };
    if !source.version().is_empty() {
        line.push_str(" v");
        line.push_str(source.version());
    }
    line
}

/// Lines for every active, non-separator mod, in the order given.
#[must_use]
pub fn markdown_lines(sources: &[ModSource], game_nexus_name: Option<&str>) -> Vec<String> {
    sources
        .iter()
        .filter(|s| s.is_active() && !s.is_separator() && !s.is_overwrite())
        .map(|s| markdown_line(s, game_nexus_name))
        .collect()
}

/// Writes the list, one line per mod. Returns the number of lines.
///
/// # Errors
///
/// Returns the I/O error of `out`.
pub fn write_markdown<W: Write>(
    out: &mut W,
    sources: &[ModSource],
    game_nexus_name: Option<&str>,
) -> io::Result<usize> {
    let lines = markdown_lines(sources, game_nexus_name);
    for line in &lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(lines.len())
}

#[cfg(test)]
mod tests;
