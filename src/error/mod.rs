// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            MoxError (~24 bytes)
//!                   |
//!   +-------+-------+-------+-------+
//!   |       |       |       |       |
//!   v       v       v       v       v
//! Bail    Cfg    Export    Io    Other
//!         Box     Box      Box   Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config  ParseError, MissingKey, InvalidValue, InvalidPattern,
//!           MissingDestination, IncompatibleOptions
//!   Export  Configuration, DestinationFatal, Host
//!
//! Recoverable per-file problems are NOT errors: they are
//! recorded as `ExportFailure` values inside `ExportResult`.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`MoxError`].
pub type MoxResult<T> = std::result::Result<T, MoxError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum MoxError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Export aborted.
    #[error("export error: {0}")]
    Export(#[from] Box<ExportError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`MoxError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> MoxError {
    MoxError::Bailed(message.into().into_boxed_str())
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for MoxError {
                fn from(err: $error) -> Self {
                    MoxError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ExportError => Export,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
///
/// Everything here is detected before the first file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),

    /// Exclusion pattern failed to compile.
    #[error("invalid exclusion pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Export destination is empty.
    #[error("export destination must not be empty")]
    MissingDestination,

    /// Job options contradict each other.
    #[error("incompatible export options: {0}")]
    IncompatibleOptions(String),
}

// --- Export Errors ---

/// Fatal export errors.
///
/// An export either fails with one of these before any output exists,
/// or completes with an `ExportResult`.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The job was rejected during validation.
    #[error("invalid export job: {0}")]
    Configuration(#[from] ConfigError),

    /// Destination root or archive stream could not be created.
    #[error("cannot prepare destination '{path}': {source}")]
    DestinationFatal {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The host mod list could not be read.
    #[error("cannot read mod list: {message}")]
    Host { message: String },
}

impl ExportError {
    /// Builds a [`ExportError::DestinationFatal`] for `path`.
    pub fn destination(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::DestinationFatal {
            path: path.display().to_string(),
            source,
        }
    }

    /// Returns true when the error was raised before any I/O.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
