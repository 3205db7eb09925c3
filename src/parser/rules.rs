use super::fields::FieldRecord;
use once_cell::sync::Lazy;
use regex::Regex;

/// Bracket/asterisk debris left when markdown bold collides with
/// bracketed labels, e.g. `]:**` or `**`
static MARKUP_DEBRIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\]*:?\*+").expect("invalid markup regex"));

static CONSENSUS_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)consensus:").expect("invalid consensus regex"));

const CONSENSUS: &str = "Consensus:";
const CONFIDENCE_PREFIX: &str = "Confidence Score:";
const JUSTIFICATION_PREFIX: &str = "Justification:";
const DIFFERING_OPINION_PREFIX: &str = "Differing Opinion -";
const REASON_PREFIX: &str = "Reason:";

/// A single classification rule: the first rule whose predicate accepts a
/// line produces that line's record
pub struct Rule {
    pub name: &'static str,
    matches: fn(&str) -> bool,
    extract: fn(&str) -> FieldRecord,
}

impl Rule {
    pub fn matches(&self, line: &str) -> bool {
        (self.matches)(line)
    }

    pub fn extract(&self, line: &str) -> FieldRecord {
        (self.extract)(line)
    }
}

/// Rules in priority order. Lines no rule accepts become `Plain`.
pub static RULES: &[Rule] = &[
    Rule {
        name: "consensus",
        matches: has_consensus_token,
        extract: extract_consensus,
    },
    Rule {
        name: "confidence",
        matches: is_confidence,
        extract: extract_confidence,
    },
    Rule {
        name: "justification",
        matches: is_justification,
        extract: extract_justification,
    },
    Rule {
        name: "differing_opinion",
        matches: is_differing_opinion,
        extract: extract_differing_opinion,
    },
    Rule {
        name: "reason",
        matches: is_reason,
        extract: extract_reason,
    },
];

/// Remove markup debris and trim
pub fn clean(fragment: &str) -> String {
    MARKUP_DEBRIS.replace_all(fragment, "").trim().to_string()
}

/// Classify a single (already trimmed) line
pub fn classify_line(line: &str) -> FieldRecord {
    RULES
        .iter()
        .find(|rule| rule.matches(line))
        .map(|rule| rule.extract(line))
        .unwrap_or_else(|| FieldRecord::Plain {
            content: clean(line),
        })
}

fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

/// Text after a prefix already known to match
fn after_prefix<'a>(line: &'a str, prefix: &str) -> &'a str {
    &line[prefix.len()..]
}

fn has_consensus_token(line: &str) -> bool {
    CONSENSUS_TOKEN.is_match(line)
}

fn extract_consensus(line: &str) -> FieldRecord {
    match CONSENSUS_TOKEN.find(line) {
        Some(token) => FieldRecord::Consensus {
            label: clean(&format!("{}{}", &line[..token.start()], CONSENSUS)),
            content: clean(&line[token.end()..]),
        },
        None => FieldRecord::Plain {
            content: clean(line),
        },
    }
}

fn is_confidence(line: &str) -> bool {
    starts_with_ignore_case(line, CONFIDENCE_PREFIX)
}

fn extract_confidence(line: &str) -> FieldRecord {
    FieldRecord::Confidence {
        value: clean(after_prefix(line, CONFIDENCE_PREFIX)),
    }
}

fn is_justification(line: &str) -> bool {
    starts_with_ignore_case(line, JUSTIFICATION_PREFIX)
}

fn extract_justification(line: &str) -> FieldRecord {
    FieldRecord::Justification {
        content: clean(after_prefix(line, JUSTIFICATION_PREFIX)),
    }
}

fn is_differing_opinion(line: &str) -> bool {
    starts_with_ignore_case(line, DIFFERING_OPINION_PREFIX)
}

fn extract_differing_opinion(line: &str) -> FieldRecord {
    FieldRecord::DifferingOpinion {
        content: clean(after_prefix(line, DIFFERING_OPINION_PREFIX)),
    }
}

fn is_reason(line: &str) -> bool {
    starts_with_ignore_case(line, REASON_PREFIX)
}

fn extract_reason(line: &str) -> FieldRecord {
    FieldRecord::Reason {
        content: clean(after_prefix(line, REASON_PREFIX)),
    }
}
