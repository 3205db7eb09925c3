use serde::{Deserialize, Serialize};
use std::fmt;

/// One classified line of a decision-service response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldRecord {
    /// Any label ending in "Consensus:" (e.g. "Wisdom Council's Consensus:")
    Consensus { label: String, content: String },

    /// "Confidence Score:" value, kept verbatim (e.g. "85%")
    Confidence { value: String },

    Justification { content: String },

    /// "Differing Opinion -" line
    DifferingOpinion { content: String },

    Reason { content: String },

    /// Unstructured line
    Plain { content: String },
}

impl FieldRecord {
    /// Label shown before the content, if the record has one
    pub fn label(&self) -> Option<&str> {
        match self {
            FieldRecord::Consensus { label, .. } => Some(label),
            FieldRecord::Confidence { .. } => Some("Confidence Score:"),
            FieldRecord::Justification { .. } => Some("Justification:"),
            FieldRecord::DifferingOpinion { .. } => Some("Differing Opinion -"),
            FieldRecord::Reason { .. } => Some("Reason:"),
            FieldRecord::Plain { .. } => None,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            FieldRecord::Consensus { content, .. }
            | FieldRecord::Justification { content }
            | FieldRecord::DifferingOpinion { content }
            | FieldRecord::Reason { content }
            | FieldRecord::Plain { content } => content,
            FieldRecord::Confidence { value } => value,
        }
    }
}

impl fmt::Display for FieldRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) if self.content().is_empty() => write!(f, "{}", label),
            Some(label) => write!(f, "{} {}", label, self.content()),
            None => write!(f, "{}", self.content()),
        }
    }
}
