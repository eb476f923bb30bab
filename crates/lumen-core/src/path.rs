// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validated child paths into the database's hierarchical key space.
//!
//! Paths are slash-delimited (`players/testUser`). Surrounding slashes are
//! ignored; empty segments and characters the hosted database forbids in keys
//! are rejected before any request goes out.

use std::fmt;
use std::str::FromStr;

use crate::error::LumenError;

/// Characters the hosted database does not allow inside a key.
const FORBIDDEN_KEY_CHARS: &[char] = &['.', '$', '#', '[', ']'];

/// A normalized, non-empty, slash-delimited database path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DbPath {
    segments: Vec<String>,
}

impl DbPath {
    /// Parses and validates a child path.
    pub fn parse(raw: &str) -> Result<Self, LumenError> {
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            return Err(LumenError::invalid_path(raw, "path must not be empty"));
        }

        let mut segments = Vec::new();
        for segment in trimmed.split('/') {
            validate_segment(raw, segment)?;
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    /// Returns a new path with `child` appended.
    pub fn join(&self, child: &str) -> Result<Self, LumenError> {
        let child = Self::parse(child)?;
        let mut segments = self.segments.clone();
        segments.extend(child.segments);
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment (the key of the addressed node).
    pub fn key(&self) -> &str {
        // Construction guarantees at least one segment.
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

fn validate_segment(raw: &str, segment: &str) -> Result<(), LumenError> {
    if segment.is_empty() {
        return Err(LumenError::invalid_path(raw, "path contains an empty segment"));
    }
    if let Some(c) = segment
        .chars()
        .find(|c| FORBIDDEN_KEY_CHARS.contains(c) || c.is_ascii_control())
    {
        return Err(LumenError::invalid_path(
            raw,
            format!("segment `{segment}` contains forbidden character {c:?}"),
        ));
    }
    Ok(())
}

impl fmt::Display for DbPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl FromStr for DbPath {
    type Err = LumenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_nested_path() {
        let path = DbPath::parse("players/testUser").unwrap();
        assert_eq!(path.segments(), &["players", "testUser"]);
        assert_eq!(path.key(), "testUser");
        assert_eq!(path.to_string(), "players/testUser");
    }

    #[test]
    fn surrounding_slashes_are_ignored() {
        let path = DbPath::parse("/players/testUser/").unwrap();
        assert_eq!(path.to_string(), "players/testUser");
    }

    #[test]
    fn empty_path_is_rejected() {
        for raw in ["", "/", "///"] {
            let err = DbPath::parse(raw).unwrap_err();
            assert!(
                matches!(err, LumenError::InvalidPath { ref reason, .. } if reason.contains("empty")),
                "{raw:?} gave {err}"
            );
        }
    }

    #[test]
    fn empty_segment_is_rejected() {
        let err = DbPath::parse("players//testUser").unwrap_err();
        assert!(err.to_string().contains("empty segment"));
    }

    #[test]
    fn forbidden_characters_are_rejected() {
        for raw in ["players/a.b", "scores/$top", "x/#1", "a[0]", "tab\there"] {
            assert!(DbPath::parse(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn join_appends_segments() {
        let players = DbPath::parse("players").unwrap();
        let user = players.join("testUser/stats").unwrap();
        assert_eq!(user.to_string(), "players/testUser/stats");
        assert!(players.join("").is_err());
    }

    proptest! {
        #[test]
        fn valid_segments_always_parse(segments in prop::collection::vec("[A-Za-z0-9_-]{1,12}", 1..6)) {
            let raw = segments.join("/");
            let path = DbPath::parse(&raw).unwrap();
            prop_assert_eq!(path.segments(), segments.as_slice());
            prop_assert_eq!(path.to_string(), raw);
        }
    }
}
