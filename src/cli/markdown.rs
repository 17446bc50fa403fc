// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Markdown command arguments.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `markdown` command.
#[derive(Debug, Clone, Default, Args)]
pub struct MarkdownArgs {
    /// Writes the list to FILE instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Copies the list to the system clipboard instead of stdout.
    #[arg(short = 'c', long = "clipboard", conflicts_with = "output")]
    pub clipboard: bool,

    /// Nexus game segment used for mod links, overrides host.game_nexus_name.
    #[arg(long = "game", value_name = "NAME")]
    pub game: Option<String>,
}
