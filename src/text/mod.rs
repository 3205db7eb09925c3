//! Text normalization
//!
//! Canonicalizes stylized or adversarial Unicode before keyword matching
//! and display:
//! - zero-width characters and incidental line wrapping
//! - emoji and pictographs
//! - "fancy" mathematical alphanumeric letters
//! - upside-down glyph substitution
//!
//! Every function here is pure and total. Characters that no table knows
//! about pass through unchanged.

pub mod tables;

use once_cell::sync::Lazy;
use regex::Regex;

use tables::{EMOJI_RANGES, STYLED_LETTERS, UPSIDE_DOWN};

static LINE_BREAK_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\n\s*").expect("invalid line-break regex"));

/// Remove zero-width space/non-joiner/joiner and byte-order marks
pub fn strip_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}'))
        .collect()
}

/// Collapse whitespace runs around newlines into a single newline and trim
/// the whole string
pub fn collapse_line_whitespace(text: &str) -> String {
    LINE_BREAK_WHITESPACE
        .replace_all(text, "\n")
        .trim()
        .to_string()
}

fn is_emoji(c: char) -> bool {
    let code = c as u32;
    EMOJI_RANGES.iter().any(|range| range.contains(&code))
}

pub fn remove_emojis(text: &str) -> String {
    text.chars().filter(|&c| !is_emoji(c)).collect()
}

/// Replace styled alphabet letters (bold, italic, sans-serif, ...) with
/// their plain ASCII counterparts
pub fn fold_styled_letters(text: &str) -> String {
    text.chars()
        .map(|c| STYLED_LETTERS.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Replace rotated glyphs with the upright characters they stand in for
pub fn unflip_upside_down(text: &str) -> String {
    text.chars()
        .map(|c| UPSIDE_DOWN.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Full normalization pipeline.
///
/// Order is fixed: emoji removal, then styled-letter folding, then
/// unflipping (the rotation table is keyed for plain letters).
pub fn normalize(text: &str) -> String {
    let text = remove_emojis(text);
    let text = fold_styled_letters(&text);
    unflip_upside_down(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_zero_width() {
        assert_eq!(strip_zero_width("a\u{200B}b\u{200C}c\u{200D}d\u{FEFF}"), "abcd");
        assert_eq!(strip_zero_width("plain"), "plain");
    }

    #[test]
    fn test_collapse_line_whitespace() {
        assert_eq!(collapse_line_whitespace("  one  \n   two\r\n\n three  "), "one\ntwo\nthree");
        assert_eq!(collapse_line_whitespace("a  b"), "a  b");
        assert_eq!(collapse_line_whitespace("   "), "");
    }

    #[test]
    fn test_remove_emojis() {
        assert_eq!(remove_emojis("Go 🚀 now 😀!"), "Go  now !");
        assert_eq!(remove_emojis("❤\u{FE0F} ok"), " ok");
        assert_eq!(remove_emojis("café ünïcode"), "café ünïcode");
    }

    #[test]
    fn test_fold_styled_letters() {
        // sans-serif bold and sans-serif italic
        assert_eq!(fold_styled_letters("𝗛𝗲𝗹𝗹𝗼 𝘸𝘰𝘳𝘭𝘥"), "Hello world");
        assert_eq!(fold_styled_letters("𝐁𝐨𝐥𝐝 and 𝚖𝚘𝚗𝚘"), "Bold and mono");
        assert_eq!(fold_styled_letters("日本語"), "日本語");
    }

    #[test]
    fn test_unflip_upside_down() {
        assert_eq!(unflip_upside_down("ʇǝʞɹɐɯ"), "tekram");
        assert_eq!(unflip_upside_down("ǝsɐǝɹɔuᴉ"), "esaercni");
        assert_eq!(unflip_upside_down("∀⊥∩Λ"), "ATUV");
        assert_eq!(unflip_upside_down("¡ʎɐʍ sᴉɥʇ"), "!yaw siht");
    }

    #[test]
    fn test_unflip_leaves_plain_text_alone() {
        let plain = "Should we build 69 boxes? quod sub don";
        assert_eq!(unflip_upside_down(plain), plain);
    }

    #[test]
    fn test_unflip_placeholder_glyphs() {
        assert_eq!(unflip_upside_down("⑴ǝʌǝ⑴"), "level");
    }

    #[test]
    fn test_normalize_pipeline() {
        assert_eq!(normalize("🔥 𝗙𝗔𝗜𝗩 ʎɐs"), " FAIV yas");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "plain ascii text",
            "🚀 Launch 𝘁𝗵𝗲 plan ¡ʍou ⑴ 69 qpbd",
            "mixed\u{200B}zero width ❤\u{FE0F}",
            "𝔉𝔯𝔞𝔨𝔱𝔲𝔯 and 𝕯𝖔𝖚𝖇𝖑𝖊 ∀ꓭƆ",
            "日本語 ✓ ✎ ⚠ warning",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_fold_covers_letterlike_symbols() {
        assert_eq!(fold_styled_letters("𝑇ℎ𝑒 ℛ𝒾𝓈𝓀 ℤ𝕠𝕟𝕖"), "The Risk Zone");
    }
}
