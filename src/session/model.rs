use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Title every session starts with, until its first query names it
pub const UNTITLED: &str = "Untitled";

/// Stored form of a separator entry
pub const SEPARATOR: &str = "-----";

/// Prefix of a stored user query
pub const QUERY_MARKER: &str = "> ";

/// Prefix of a stored error entry
pub const WARNING_MARKER: &str = "⚠ ";

/// Number of query characters kept in a derived title
pub const TITLE_SNIPPET_CHARS: usize = 30;

/// One line of a session transcript.
///
/// Stored as a plain string: queries carry the `> ` marker, separators are
/// `-----`, errors start with `⚠ ` and anything else is a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TranscriptEntry {
    /// Text the user submitted
    Query(String),

    /// Divider placed before every query but the first
    Separator,

    /// Raw text returned by the decision service
    Response(String),

    /// Failure surfaced to the user in place of a response
    Error(String),
}

impl From<String> for TranscriptEntry {
    fn from(stored: String) -> Self {
        if stored == SEPARATOR {
            TranscriptEntry::Separator
        } else if let Some(query) = stored.strip_prefix(QUERY_MARKER) {
            TranscriptEntry::Query(query.to_string())
        } else if let Some(message) = stored.strip_prefix(WARNING_MARKER) {
            TranscriptEntry::Error(message.to_string())
        } else {
            TranscriptEntry::Response(stored)
        }
    }
}

impl From<TranscriptEntry> for String {
    fn from(entry: TranscriptEntry) -> Self {
        entry.to_string()
    }
}

impl fmt::Display for TranscriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptEntry::Query(text) => write!(f, "{}{}", QUERY_MARKER, text),
            TranscriptEntry::Separator => f.write_str(SEPARATOR),
            TranscriptEntry::Response(text) => f.write_str(text),
            TranscriptEntry::Error(message) => write!(f, "{}{}", WARNING_MARKER, message),
        }
    }
}

/// One conversation thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default = "untitled")]
    title: String,

    #[serde(rename = "messages", default)]
    entries: Vec<TranscriptEntry>,

    /// Creation time, used for display ordering. Sessions written without
    /// one load as the Unix epoch.
    #[serde(default)]
    created_at: DateTime<Utc>,
}

fn untitled() -> String {
    UNTITLED.to_string()
}

impl Session {
    pub(crate) fn new() -> Self {
        Self {
            title: UNTITLED.to_string(),
            entries: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn has_messages(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Whether the title has moved off the untitled sentinel
    pub fn is_titled(&self) -> bool {
        self.title != UNTITLED
    }

    pub(crate) fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }
}

/// Title derived from a session's first query: the leading characters,
/// ellipsis-suffixed when cut, in double quotes
pub fn derive_title(query: &str) -> String {
    let snippet = if query.chars().count() > TITLE_SNIPPET_CHARS {
        let head: String = query.chars().take(TITLE_SNIPPET_CHARS).collect();
        format!("{}...", head.trim())
    } else {
        query.to_string()
    };
    format!("\"{}\"", snippet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_string_forms() {
        assert_eq!(TranscriptEntry::Query("hi".into()).to_string(), "> hi");
        assert_eq!(TranscriptEntry::Separator.to_string(), "-----");
        assert_eq!(TranscriptEntry::Error("down".into()).to_string(), "⚠ down");
        assert_eq!(TranscriptEntry::Response("ok".into()).to_string(), "ok");
    }

    #[test]
    fn test_entry_from_stored_string() {
        assert_eq!(
            TranscriptEntry::from("> what now?".to_string()),
            TranscriptEntry::Query("what now?".into())
        );
        assert_eq!(TranscriptEntry::from("-----".to_string()), TranscriptEntry::Separator);
        assert_eq!(
            TranscriptEntry::from("FAIV Consensus: go".to_string()),
            TranscriptEntry::Response("FAIV Consensus: go".into())
        );
    }

    #[test]
    fn test_session_loads_without_timestamp() {
        let session: Session =
            serde_json::from_str(r#"{"title":"\"hello\"","messages":["> hello","reply"]}"#)
                .unwrap();
        assert_eq!(session.title(), "\"hello\"");
        assert_eq!(session.entries().len(), 2);
        assert_eq!(session.created_at().timestamp(), 0);
    }

    #[test]
    fn test_session_loads_without_title() {
        let session: Session = serde_json::from_str(r#"{"messages":["> hi"]}"#).unwrap();
        assert_eq!(session.title(), UNTITLED);
        assert!(!session.is_titled());
        assert_eq!(session.entries(), &[TranscriptEntry::Query("hi".into())]);
    }

    #[test]
    fn test_derive_title_short_query() {
        assert_eq!(derive_title("Hire now?"), "\"Hire now?\"");
    }

    #[test]
    fn test_derive_title_truncates_long_query() {
        assert_eq!(
            derive_title(
                "Should we expand into new markets this quarter given current capital constraints and risk appetite?"
            ),
            "\"Should we expand into new mark...\""
        );
    }

    #[test]
    fn test_derive_title_counts_characters_not_bytes() {
        let query = "é".repeat(31);
        assert_eq!(derive_title(&query), format!("\"{}...\"", "é".repeat(30)));
    }

    #[test]
    fn test_derive_title_trims_cut_snippet() {
        // 29 chars followed by a space at position 30
        let query = format!("{} tail of the question", "a".repeat(29));
        assert_eq!(derive_title(&query), format!("\"{}...\"", "a".repeat(29)));
    }
}
