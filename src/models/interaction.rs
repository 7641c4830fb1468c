// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::platform::Platform;

/// Interaction kinds recognized by the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    ViewStart,
    Like,
    Share,
    Comment,
    Vote,
}

impl InteractionKind {
    /// Parse a raw type tag; anything unrecognized falls back to `ViewStart`.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "view_start" => Self::ViewStart,
            "like" => Self::Like,
            "share" => Self::Share,
            "comment" => Self::Comment,
            "vote" => Self::Vote,
            _ => Self::ViewStart,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewStart => "view_start",
            Self::Like => "like",
            Self::Share => "share",
            Self::Comment => "comment",
            Self::Vote => "vote",
        }
    }
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalized user/content interaction.
///
/// Construction performs every coercion the raw export needs: a timestamp
/// that fails to parse maps to the sentinel minimum, an unknown type tag
/// becomes `view_start`, and a duration that is not a plain digit string
/// becomes 0. The record is immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Interaction {
    id: u64,
    user_id: i64,
    content_id: i64,
    timestamp: NaiveDateTime,
    kind: InteractionKind,
    watch_duration_secs: u64,
    comment_text: String,
    platform: Option<Platform>,
}

impl Interaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        user_id: i64,
        content_id: i64,
        raw_timestamp: &str,
        raw_kind: &str,
        raw_duration: &str,
        comment_text: &str,
        platform: Option<Platform>,
    ) -> Self {
        Self {
            id,
            user_id,
            content_id,
            timestamp: parse_timestamp(raw_timestamp),
            kind: InteractionKind::parse_or_default(raw_kind),
            watch_duration_secs: parse_watch_duration(raw_duration),
            comment_text: comment_text.trim().to_string(),
            platform,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn content_id(&self) -> i64 {
        self.content_id
    }

    /// Timestamp of the interaction; `NaiveDateTime::MIN` when the raw value
    /// did not parse.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn kind(&self) -> InteractionKind {
        self.kind
    }

    pub fn watch_duration_secs(&self) -> u64 {
        self.watch_duration_secs
    }

    pub fn comment_text(&self) -> &str {
        &self.comment_text
    }

    pub fn platform(&self) -> Option<&Platform> {
        self.platform.as_ref()
    }
}

/// Parse an ISO-8601 date-time, accepting a space separator or a bare date.
/// Unparseable input maps to the sentinel minimum.
fn parse_timestamp(raw: &str) -> NaiveDateTime {
    let raw = raw.trim();
    if let Ok(ts) = raw.parse::<NaiveDateTime>() {
        return ts;
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return ts;
    }
    if let Ok(date) = raw.parse::<NaiveDate>() {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return ts;
        }
    }
    NaiveDateTime::MIN
}

/// Durations must be plain digit strings; anything else (signs, decimals,
/// words, empty input) coerces to 0.
fn parse_watch_duration(raw: &str) -> u64 {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        trimmed.parse().unwrap_or(0)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interaction(raw_kind: &str, raw_duration: &str, raw_timestamp: &str) -> Interaction {
        Interaction::new(1, 10, 20, raw_timestamp, raw_kind, raw_duration, "", None)
    }

    #[test]
    fn test_unknown_kind_defaults_to_view_start() {
        assert_eq!(interaction("superlike", "0", "").kind(), InteractionKind::ViewStart);
        assert_eq!(interaction("", "0", "").kind(), InteractionKind::ViewStart);
        // recognized tags survive
        assert_eq!(interaction("vote", "0", "").kind(), InteractionKind::Vote);
    }

    #[test]
    fn test_duration_coercion() {
        assert_eq!(interaction("like", "120", "").watch_duration_secs(), 120);
        assert_eq!(interaction("like", " 120 ", "").watch_duration_secs(), 120);
        assert_eq!(interaction("like", "-5", "").watch_duration_secs(), 0);
        assert_eq!(interaction("like", "12.5", "").watch_duration_secs(), 0);
        assert_eq!(interaction("like", "abc", "").watch_duration_secs(), 0);
        assert_eq!(interaction("like", "", "").watch_duration_secs(), 0);
    }

    #[test]
    fn test_timestamp_parsing() {
        let t = interaction("like", "0", "2024-05-01T10:30:00");
        assert_eq!(t.timestamp().to_string(), "2024-05-01 10:30:00");

        let space = interaction("like", "0", "2024-05-01 10:30:00");
        assert_eq!(space.timestamp(), t.timestamp());

        let date_only = interaction("like", "0", "2024-05-01");
        assert_eq!(date_only.timestamp().to_string(), "2024-05-01 00:00:00");
    }

    #[test]
    fn test_invalid_timestamp_maps_to_sentinel() {
        assert_eq!(interaction("like", "0", "not a date").timestamp(), NaiveDateTime::MIN);
        assert_eq!(interaction("like", "0", "").timestamp(), NaiveDateTime::MIN);
    }

    #[test]
    fn test_comment_is_trimmed() {
        let i = Interaction::new(1, 10, 20, "", "comment", "0", "  nice one  ", None);
        assert_eq!(i.comment_text(), "nice one");
    }
}
