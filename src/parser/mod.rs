//! Structured output parsing
//!
//! Turns a raw decision-service response into one `FieldRecord` per line:
//! - `rules` holds the ordered classification rules
//! - `summary` is the lighter bold-marker extractor for the three headline
//!   fields

mod fields;
pub mod rules;
mod summary;

pub use fields::FieldRecord;
pub use rules::{classify_line, clean};
pub use summary::{extract_summary, DecisionSummary};

use crate::text::{collapse_line_whitespace, strip_zero_width};
use tracing::debug;

/// Content of the record returned for a missing or empty response
pub const NO_VALID_RESPONSE: &str = "⚠ No valid response received.";

/// Parse a response into field records, one per line.
///
/// `None` and the empty string yield a single sentinel record. Any other
/// input, including prose with no recognizable fields, parses line by line.
pub fn parse_response(response: Option<&str>) -> Vec<FieldRecord> {
    let response = match response {
        Some(text) if !text.is_empty() => text,
        _ => {
            debug!("No response text to parse");
            return vec![FieldRecord::Plain {
                content: NO_VALID_RESPONSE.to_string(),
            }];
        }
    };

    let cleaned = collapse_line_whitespace(&strip_zero_width(response));

    cleaned
        .split('\n')
        .map(|raw_line| classify_line(raw_line.trim()))
        .collect()
}

/// Whether a response carries structured fields worth parsing for display
pub fn looks_structured(response: &str) -> bool {
    response.contains("FAIV Consensus:") || response.contains("Confidence Score:")
}
