// mox: `ModOrganizer` Active Mod Exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::ExclusionFilter;
use crate::error::ConfigError;
use crate::overlay::RelativePath;

fn path(raw: &str) -> RelativePath {
    RelativePath::normalize(raw).unwrap()
}

#[test]
fn test_star_stays_in_segment() {
    let filter = ExclusionFilter::compile(["*.txt"]).unwrap();
    assert!(filter.is_excluded(&path("x.txt")));
    assert!(!filter.is_excluded(&path("docs/x.txt")));
}

#[test]
fn test_double_star_spans_segments() {
    let filter = ExclusionFilter::compile(["**/*.bak"]).unwrap();
    assert!(filter.is_excluded(&path("a.bak")));
    assert!(filter.is_excluded(&path("deep/er/a.bak")));
    assert!(!filter.is_excluded(&path("deep/a.bak.esp")));
}

#[test]
fn test_question_mark_matches_one_character() {
    let filter = ExclusionFilter::compile(["save?.ess"]).unwrap();
    assert!(filter.is_excluded(&path("save1.ess")));
    assert!(!filter.is_excluded(&path("save12.ess")));
}

#[test]
fn test_matching_is_case_insensitive() {
    let filter = ExclusionFilter::compile(["docs/**", "*.TXT"]).unwrap();
    assert!(filter.is_excluded(&path("Docs/ReadMe.md")));
    assert!(filter.is_excluded(&path("notes.txt")));
}

#[test]
fn test_any_rule_excludes() {
    let filter = ExclusionFilter::compile(["*.log", "fomod/**"]).unwrap();
    assert_eq!(
        filter.matching_rule("fomod/info.xml").map(super::ExclusionRule::pattern),
        Some("fomod/**")
    );
    assert!(filter.matching_rule("plugin.esp").is_none());
}

#[test]
fn test_blank_patterns_are_ignored() {
    let filter = ExclusionFilter::compile(["", "   ", "*.log"]).unwrap();
    assert_eq!(filter.rules().len(), 1);
}

#[test]
fn test_malformed_pattern_fails_fast() {
    let err = ExclusionFilter::compile(["*.txt", "a**b"]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "a**b"));
}

#[test]
fn test_empty_filter_excludes_nothing() {
    let filter = ExclusionFilter::empty();
    assert!(filter.is_empty());
    assert!(!filter.is_excluded(&path("anything")));
}
