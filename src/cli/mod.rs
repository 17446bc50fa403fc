// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for mox using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! mox [global options] <command>
//! export [flags] <DESTINATION>
//! markdown [--output FILE]
//! options
//! inis
//! version
//! ```

pub mod export;
pub mod global;
pub mod markdown;

#[cfg(test)]
mod tests;

use crate::cli::export::ExportArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::markdown::MarkdownArgs;
use clap::{Parser, Subcommand};

/// `ModOrganizer` Active Mod Exporter
///
/// Flattens the active mods of a Mod Organizer 2 profile into one folder or archive.
#[derive(Debug, Parser)]
#[command(
    name = "mox",
    author,
    version,
    about = "ModOrganizer Active Mod Exporter",
    long_about = "mox Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Exports the active mods of a Mod Organizer 2 profile.\n\n\
                  `mox -m path/to/instance export out/` writes the merged data\n\
                  tree the game would see. `--mode separate` keeps one folder per\n\
                  mod instead, `--zip` writes an archive. See\n\
                  `mox <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  mox reads `mox.toml` from the current directory when it exists.\n\
                  Additional files can be given with --ini; later files override\n\
                  earlier ones. MOX_SECTION__KEY environment variables override\n\
                  the files, and command-line flags override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files used by mox.
    Inis,

    /// Exports the active mods.
    Export(ExportArgs),

    /// Prints the active mods as a Markdown list.
    Markdown(MarkdownArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
