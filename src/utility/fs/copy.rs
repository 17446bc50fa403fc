// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io;
use std::path::Path;

/// How a file ended up at its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// Bytes duplicated.
    Copied,
    /// Destination shares the source's data.
    Linked,
}

/// Copies `src` to `dst`, replacing nothing.
///
/// The caller removes any existing `dst` first: copying onto an existing
/// hardlink would write through into the file it shares data with.
///
/// # Errors
///
/// Returns the I/O error from opening, reading or writing either side.
pub fn copy_file(src: &Path, dst: &Path) -> io::Result<Transfer> {
    std::fs::copy(src, dst)?;
    Ok(Transfer::Copied)
}

/// Hardlinks `dst` to `src`, copying when linking is impossible.
///
/// Returns the transfer that happened and, on fallback, why the link failed
/// (different volume, unsupported filesystem, ...).
///
/// # Errors
///
/// Returns an error only when the fallback copy fails too.
pub fn link_or_copy(src: &Path, dst: &Path) -> io::Result<(Transfer, Option<io::Error>)> {
    match std::fs::hard_link(src, dst) {
        Ok(()) => Ok((Transfer::Linked, None)),
        Err(link_error) => {
            copy_file(src, dst)?;
            Ok((Transfer::Copied, Some(link_error)))
        }
    }
}

/// Removes `path` if it is a file or link. Returns whether something was removed.
///
/// # Errors
///
/// Fails when `path` is a directory or cannot be removed.
pub fn remove_existing(path: &Path) -> io::Result<bool> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("a directory is in the way: {}", path.display()),
        )),
        Ok(_) => std::fs::remove_file(path).map(|()| true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
