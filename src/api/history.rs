use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::fetch::{ApiRequest, FetchPolicy};

/// A past question and the assistant's answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub id: Option<i64>,
    pub prompt: String,
    pub response: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HistoryEntry {
    /// Accepts RFC 3339 or the naive `YYYY-MM-DD HH:MM:SS` form SQLite emits.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.as_deref()?.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }

    pub fn recorded_at_text(&self) -> String {
        match (self.recorded_at(), &self.timestamp) {
            (Some(dt), _) => dt.format("%Y-%m-%d %H:%M").to_string(),
            (None, Some(raw)) => raw.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Newest first; entries without a parseable time keep their relative
/// order at the end.
pub fn newest_first(mut entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    entries.sort_by(|a, b| b.recorded_at().cmp(&a.recorded_at()));
    entries
}

/// `GET /api/history`
pub struct HistoryPolicy;

impl FetchPolicy for HistoryPolicy {
    type Input = ();
    type Output = Vec<HistoryEntry>;

    fn label(&self) -> &'static str {
        "history"
    }

    fn validate(&self, _: &()) -> Result<(), String> {
        Ok(())
    }

    fn build_request(&self, _: &()) -> ApiRequest {
        ApiRequest::get("/api/history")
    }

    fn fallback_message(&self) -> &'static str {
        "Error fetching history."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(prompt: &str, timestamp: Option<&str>) -> HistoryEntry {
        HistoryEntry {
            id: None,
            prompt: prompt.to_string(),
            response: String::new(),
            timestamp: timestamp.map(str::to_string),
        }
    }

    #[test]
    fn parses_both_timestamp_forms() {
        assert!(entry("a", Some("2024-05-01T10:00:00Z")).recorded_at().is_some());
        assert!(entry("b", Some("2024-05-01 10:00:00")).recorded_at().is_some());
        assert!(entry("c", Some("yesterday")).recorded_at().is_none());
    }

    #[test]
    fn unparseable_timestamp_is_shown_raw() {
        assert_eq!(entry("c", Some("yesterday")).recorded_at_text(), "yesterday");
        assert_eq!(
            entry("a", Some("2024-05-01T10:00:00Z")).recorded_at_text(),
            "2024-05-01 10:00"
        );
    }

    #[test]
    fn sorts_newest_first() {
        let sorted = newest_first(vec![
            entry("old", Some("2024-01-01 08:00:00")),
            entry("undated", None),
            entry("new", Some("2024-06-01T08:00:00Z")),
        ]);
        let prompts: Vec<_> = sorted.iter().map(|e| e.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["new", "old", "undated"]);
    }

    #[test]
    fn history_is_fetched_with_get() {
        assert_eq!(HistoryPolicy.build_request(&()).path, "/api/history");
    }
}
