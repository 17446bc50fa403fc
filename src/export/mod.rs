// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export orchestration.
//!
//! ```text
//! ExportPlanner::plan(sources, job)
//!   1. job.validate()            --> ConfigError, nothing touched yet
//!   2. sink.open()               --> DestinationFatal
//!   3. combined:  OverlayResolver::resolve() --> Materializer::materialize()
//!      separate:  Materializer::materialize_separate()
//!   4. cancelled? sink.abort()   else sink.finalize()
//!   5. ExportResult
//! ```

pub mod job;
pub mod planner;
pub mod result;

pub use job::{ExportJob, ExportMode, ExportTarget, WriteStrategy, ZipCompression};
pub use planner::ExportPlanner;
pub use result::{ExportFailure, ExportNote, ExportResult, FailureKind, NoteKind};
