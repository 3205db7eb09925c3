// Integration tests for response parsing
//
// These tests verify that decision-service responses are classified into
// labeled fields line by line, and that normalization feeds the parser.

use faiv_console::normalize;
use faiv_console::parser::{parse_response, FieldRecord, NO_VALID_RESPONSE};

fn consensus(label: &str, content: &str) -> FieldRecord {
    FieldRecord::Consensus {
        label: label.to_string(),
        content: content.to_string(),
    }
}

#[test]
fn test_full_decision_response() {
    let response = "FAIV Consensus: **We should proceed.**\n\
                    Confidence Score: 85%\n\
                    Justification: Demand is strong.\n\
                    Differing Opinion - Finance urges delay.\n\
                    Reason: Cash runway is short.\n\
                    Further notes follow.";

    let records = parse_response(Some(response));

    assert_eq!(
        records,
        vec![
            consensus("FAIV Consensus:", "We should proceed."),
            FieldRecord::Confidence {
                value: "85%".to_string()
            },
            FieldRecord::Justification {
                content: "Demand is strong.".to_string()
            },
            FieldRecord::DifferingOpinion {
                content: "Finance urges delay.".to_string()
            },
            FieldRecord::Reason {
                content: "Cash runway is short.".to_string()
            },
            FieldRecord::Plain {
                content: "Further notes follow.".to_string()
            },
        ]
    );
}

#[test]
fn test_consensus_label_variants() {
    for label in [
        "FAIV Consensus:",
        "Wisdom Council's Consensus:",
        "Expansion Council's Consensus:",
    ] {
        let records = parse_response(Some(&format!("{} X", label)));
        assert_eq!(records, vec![consensus(label, "X")]);
    }
}

#[test]
fn test_bracketed_bold_labels_are_cleaned() {
    let records = parse_response(Some("[FAIV Consensus]:** Launch in May**"));
    // The token only matches "Consensus:", so the bracketed form stays plain
    assert_eq!(
        records,
        vec![FieldRecord::Plain {
            content: "[FAIV Consensus Launch in May".to_string()
        }]
    );

    let records = parse_response(Some("**FAIV Consensus:** Launch in May"));
    assert_eq!(records, vec![consensus("FAIV Consensus:", "Launch in May")]);
}

#[test]
fn test_consensus_splits_at_first_token() {
    let records = parse_response(Some("Board consensus: yes, Consensus: reached"));
    assert_eq!(
        records,
        vec![consensus("Board Consensus:", "yes, Consensus: reached")]
    );
}

#[test]
fn test_one_record_per_line() {
    let response = "line one\n\n   \nline two  \r\n  line three\u{200B}";
    let records = parse_response(Some(response));
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].content(), "line three");
}

#[test]
fn test_plain_prose_is_preserved() {
    let records = parse_response(Some("I could not reach a decision on this."));
    assert_eq!(
        records,
        vec![FieldRecord::Plain {
            content: "I could not reach a decision on this.".to_string()
        }]
    );
}

#[test]
fn test_missing_response_yields_sentinel() {
    let sentinel = vec![FieldRecord::Plain {
        content: NO_VALID_RESPONSE.to_string(),
    }];
    assert_eq!(parse_response(None), sentinel);
    assert_eq!(parse_response(Some("")), sentinel);
}

#[test]
fn test_whitespace_only_response_yields_one_blank_line() {
    assert_eq!(
        parse_response(Some("  \n  ")),
        vec![FieldRecord::Plain {
            content: String::new()
        }]
    );
}

#[test]
fn test_normalized_stylized_response() {
    let raw = "🔥 𝗙𝗔𝗜𝗩 Consensus: ɥsᴉnbɐ\n𝗖𝗼𝗻𝗳𝗶𝗱𝗲𝗻𝗰𝗲 Score: 70%";
    let records = parse_response(Some(&normalize(raw)));
    assert_eq!(
        records,
        vec![
            consensus("FAIV Consensus:", "hsinba"),
            FieldRecord::Confidence {
                value: "70%".to_string()
            },
        ]
    );
}

#[test]
fn test_display_of_records() {
    let records = parse_response(Some("Wisdom Council's Consensus: wait\nReason:"));
    let shown: Vec<String> = records.iter().map(|r| r.to_string()).collect();
    assert_eq!(shown, vec!["Wisdom Council's Consensus: wait", "Reason:"]);
}
