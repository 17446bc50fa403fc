// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   decode_text()  BOM / UTF-8 / CP1252 --> UTF-8
//!   read_text()
//! fs
//!   walk:  walk_source(), WalkOptions, SourceTree
//!   copy:  copy_file(), link_or_copy(), remove_existing()
//! ```

pub mod encoding;
pub mod fs;
