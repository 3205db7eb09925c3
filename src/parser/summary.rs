use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CONSENSUS_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\*\*[^*\n]*Consensus:\*\*[ \t]*([^\n]+)").expect("invalid consensus regex")
});

static CONFIDENCE_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\*\*Confidence Score:\*\*[ \t]*(\d+)%").expect("invalid confidence regex")
});

static JUSTIFICATION_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\*\*Justification:\*\*[ \t]*([^\n]+)").expect("invalid justification regex")
});

/// The three headline fields of a bold-marked decision summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub consensus: Option<String>,

    /// Whole-number percentage, digits only
    pub confidence: Option<String>,

    pub justification: Option<String>,
}

impl DecisionSummary {
    pub fn is_empty(&self) -> bool {
        self.consensus.is_none() && self.confidence.is_none() && self.justification.is_none()
    }

    /// Rebuild the summary as bold-marked lines, always in
    /// consensus/confidence/justification order. Absent fields are omitted.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(3);
        if let Some(consensus) = &self.consensus {
            lines.push(format!("**FAIV Consensus:** {}", consensus));
        }
        if let Some(confidence) = &self.confidence {
            lines.push(format!("**Confidence Score:** {}%", confidence));
        }
        if let Some(justification) = &self.justification {
            lines.push(format!("**Justification:** {}", justification));
        }
        lines.join("\n")
    }
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Pull consensus, confidence and justification out of text that marks
/// its labels with `**...:**`. Any field may be missing.
pub fn extract_summary(text: &str) -> DecisionSummary {
    DecisionSummary {
        consensus: capture(&CONSENSUS_FIELD, text),
        confidence: capture(&CONFIDENCE_FIELD, text),
        justification: capture(&JUSTIFICATION_FIELD, text),
    }
}
