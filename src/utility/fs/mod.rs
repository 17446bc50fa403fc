// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities for reading source trees and writing exports.
//!
//! ```text
//! walk:  walk_source()   ignore::WalkParallel (multi-core), no filters,
//!                        links kept only inside the root
//!        WalkOptions     threads, root-level files to skip
//! copy:  copy_file()     plain byte copy
//!        link_or_copy()  hardlink, copy on failure
//!        remove_existing()
//! ```

pub mod copy;
pub mod walk;
