// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          export / markdown / options
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+-----------------+------'
//!                 |                 |
//!                 v                 v
//!               host             export
//!        modlist.txt, meta.ini   ExportJob -> ExportPlanner -> ExportResult
//!                 |                 |
//!                 v        +--------+---------+
//!              source      v        v         v
//!            ModSource  overlay   filter   materialize
//!                       resolve   globs    directory / zip sinks
//!
//!   +------------------------------------------------+
//!   |  markdown   mod list serializer                |
//!   +------------------------------------------------+
//!   |  foundation   error, logging, utility (fs, enc)|
//!   +------------------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod host;
pub mod logging;
pub mod markdown;
pub mod materialize;
pub mod overlay;
pub mod source;
pub mod utility;
