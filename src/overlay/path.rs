// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Normalized relative paths.
//!
//! ```text
//! "C:\\Data\\Textures\\\\Sky.DDS"
//!     strip drive / root, split on '/' and '\\', drop "" and "."
//!     --> display "Data/Textures/Sky.DDS"
//!     --> key     "data/textures/sky.dds"   (equality, hashing, ordering)
//! ```
//!
//! The host's virtual filesystem is case-insensitive, so two paths that only
//! differ in case are the same overlay entry. The casing of the first
//! spelling seen is kept for display and output.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Component, Path, PathBuf};

/// Why a path could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathRejection {
    /// Nothing left after normalization.
    Empty,
    /// Contains a `..` segment.
    ParentSegment,
    /// Not valid Unicode.
    NotUnicode,
}

impl fmt::Display for PathRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty path"),
            Self::ParentSegment => write!(f, "path escapes its root via '..'"),
            Self::NotUnicode => write!(f, "path is not valid Unicode"),
        }
    }
}

/// A forward-slash separated path relative to an overlay root.
#[derive(Debug, Clone)]
pub struct RelativePath {
    display: String,
    key: String,
}

impl RelativePath {
    /// Normalizes a textual path.
    ///
    /// # Errors
    ///
    /// Returns a [`PathRejection`] for empty paths and paths with `..`.
    pub fn normalize(raw: &str) -> Result<Self, PathRejection> {
        let unprefixed = strip_drive(raw);
        let mut segments = Vec::new();
        for segment in unprefixed.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => return Err(PathRejection::ParentSegment),
                other => segments.push(other),
            }
        }
        if segments.is_empty() {
            return Err(PathRejection::Empty);
        }
        let display = segments.join("/");
        let key = fold_case(&display);
        Ok(Self { display, key })
    }

    /// Normalizes a filesystem path relative to some root.
    ///
    /// # Errors
    ///
    /// Returns a [`PathRejection`] when the path is not Unicode, empty, or
    /// climbs out of its root.
    pub fn from_path(path: &Path) -> Result<Self, PathRejection> {
        let mut parts = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => {
                    parts.push(part.to_str().ok_or(PathRejection::NotUnicode)?);
                }
                Component::ParentDir => return Err(PathRejection::ParentSegment),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
        Self::normalize(&parts.join("/"))
    }

    /// Path as written, forward slashes.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Case-folded comparison key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Segments of the path.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.display.split('/')
    }

    /// Last segment.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.display.rsplit('/').next().unwrap_or(&self.display)
    }

    /// Parent path, `None` at the top level.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (display, _) = self.display.rsplit_once('/')?;
        let (key, _) = self.key.rsplit_once('/')?;
        Some(Self {
            display: display.to_string(),
            key: key.to_string(),
        })
    }

    /// Prefixes this path with another one.
    #[must_use]
    pub fn prefixed(&self, prefix: &Self) -> Self {
        Self {
            display: format!("{}/{}", prefix.display, self.display),
            key: format!("{}/{}", prefix.key, self.key),
        }
    }

    /// Native path below `root`.
    #[must_use]
    pub fn to_native(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(self.segments());
        path
    }

    /// True when `self` is `other` or lies below it.
    #[must_use]
    pub fn starts_with(&self, other: &Self) -> bool {
        self.key == other.key
            || (self.key.starts_with(&other.key)
                && self.key.as_bytes().get(other.key.len()) == Some(&b'/'))
    }
}

/// Drops `C:`, `\\?\C:` and UNC-style prefixes.
fn strip_drive(raw: &str) -> &str {
    let raw = raw
        .strip_prefix(r"\\?\")
        .or_else(|| raw.strip_prefix("//?/"))
        .unwrap_or(raw);
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        &raw[2..]
    } else {
        raw
    }
}

/// Case folding used for every overlay comparison.
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

impl PartialEq for RelativePath {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for RelativePath {}

impl Hash for RelativePath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for RelativePath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RelativePath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl Serialize for RelativePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.display)
    }
}
