// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Markdown command implementation for mox.

use anyhow::Context;
use std::fs::File;
use std::io::{self, BufWriter};

use crate::cli::markdown::MarkdownArgs;
use crate::config::Config;
use crate::error::Result;
use crate::host;
use crate::markdown::write_markdown;

/// Main handler for markdown command.
///
/// # Errors
///
/// Returns an error if the mod list cannot be read or the output cannot be written.
pub fn run_markdown_command(args: &MarkdownArgs, config: &Config) -> Result<()> {
    let options = config.host_options()?;
    let sources = host::load_sources(&options)?;
    let game = args
        .game
        .as_deref()
        .or(config.host.game_nexus_name.as_deref());

    let count = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            let count = write_markdown(&mut out, &sources, game)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), mods = count, "markdown list written");
            count
        }
        None if args.clipboard => {
            let mut text = Vec::new();
            let count = write_markdown(&mut text, &sources, game)?;
            copy_to_clipboard(String::from_utf8_lossy(&text).into_owned())?;
            tracing::info!(mods = count, "markdown list copied to the clipboard");
            count
        }
        None => write_markdown(&mut io::stdout().lock(), &sources, game)
            .context("failed to write to stdout")?,
    };

    if count == 0 {
        tracing::warn!(profile = options.profile(), "no active mods in the profile");
    }
    Ok(())
}

fn copy_to_clipboard(text: String) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("failed to copy to clipboard")
}
