use crate::parser::{looks_structured, parse_response, FieldRecord};
use crate::session::TranscriptEntry;
use crate::text::normalize;
use std::fmt;

const DIVIDER_WIDTH: usize = 40;

/// A transcript entry prepared for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedLine {
    Divider,
    Text(String),
    Field(FieldRecord),
}

impl fmt::Display for RenderedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedLine::Divider => f.write_str(&"─".repeat(DIVIDER_WIDTH)),
            RenderedLine::Text(text) => f.write_str(text),
            RenderedLine::Field(record) => write!(f, "{}", record),
        }
    }
}

/// Render one entry. Queries and errors are shown as typed; responses are
/// normalized and, when they carry decision fields, parsed line by line.
pub fn render_entry(entry: &TranscriptEntry) -> Vec<RenderedLine> {
    match entry {
        TranscriptEntry::Separator => vec![RenderedLine::Divider],
        TranscriptEntry::Query(_) => vec![RenderedLine::Text(entry.to_string())],
        TranscriptEntry::Response(text) => {
            let normalized = normalize(text);
            if looks_structured(&normalized) {
                parse_response(Some(&normalized))
                    .into_iter()
                    .map(RenderedLine::Field)
                    .collect()
            } else {
                vec![RenderedLine::Text(normalized)]
            }
        }
        TranscriptEntry::Error(_) => vec![RenderedLine::Text(entry.to_string())],
    }
}

pub fn render_transcript(entries: &[TranscriptEntry]) -> Vec<RenderedLine> {
    entries.iter().flat_map(render_entry).collect()
}
