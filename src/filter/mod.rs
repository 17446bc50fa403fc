// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exclusion rules.
//!
//! ```text
//! ["*.txt", "**/*.bak", "docs/**"]
//!     |  trim, drop blank lines
//!     |  prefix "(?i)", wax::Glob::new()   <-- fails fast: InvalidPattern
//!     v
//! ExclusionFilter::is_excluded("Docs/readme.md") --> true
//! ```
//!
//! `*` and `?` stay inside one segment, `**` spans segments. Rules are
//! matched against the normalized relative path, never the absolute one.

use wax::{Glob, Program as _};

use crate::error::ConfigError;
use crate::overlay::RelativePath;

/// One compiled pattern.
#[derive(Debug, Clone)]
pub struct ExclusionRule {
    pattern: String,
    glob: Glob<'static>,
}

impl ExclusionRule {
    /// Compiles a single pattern, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if wax rejects the pattern.
    pub fn compile(pattern: &str) -> Result<Self, ConfigError> {
        let normalized = pattern.replace('\\', "/");
        let text = format!("(?i){normalized}");
        let glob = Glob::new(&text)
            .map(Glob::into_owned)
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            glob,
        })
    }

    /// Pattern as given by the user.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.glob.is_match(path)
    }
}

/// A set of rules; a path is excluded if ANY rule matches.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    rules: Vec<ExclusionRule>,
}

impl ExclusionFilter {
    /// Compiles all patterns. Blank entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidPattern`] encountered.
    pub fn compile<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .filter_map(|p| {
                let trimmed = p.as_ref().trim();
                (!trimmed.is_empty()).then(|| ExclusionRule::compile(trimmed))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Filter that excludes nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    #[must_use]
    pub fn is_excluded(&self, path: &RelativePath) -> bool {
        self.matching_rule(path.as_str()).is_some()
    }

    /// First rule matching `path`, if any.
    #[must_use]
    pub fn matching_rule(&self, path: &str) -> Option<&ExclusionRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    #[must_use]
    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests;
