use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Code-point blocks treated as emoji/pictographs
pub const EMOJI_RANGES: &[RangeInclusive<u32>] = &[
    0x1F600..=0x1F64F, // Emoticons
    0x1F300..=0x1F5FF, // Misc symbols and pictographs
    0x1F680..=0x1F6FF, // Transport and map
    0x1F700..=0x1F77F, // Alchemical symbols
    0x1F780..=0x1F7FF, // Geometric shapes extended
    0x1F800..=0x1F8FF, // Supplemental arrows-C
    0x1F900..=0x1F9FF, // Supplemental symbols and pictographs
    0x1FA00..=0x1FA6F, // Chess symbols
    0x1FA70..=0x1FAFF, // Symbols and pictographs extended-A
    0x1F1E6..=0x1F1FF, // Regional indicators (flags)
    0x2600..=0x26FF,   // Misc symbols
    0x2700..=0x27BF,   // Dingbats
    0xFE00..=0xFE0F,   // Variation selectors
];

/// First code point (capital A) of each styled alphabet in the
/// Mathematical Alphanumeric Symbols block. Each block is 26 capitals
/// followed by 26 small letters.
const STYLED_ALPHABET_BASES: &[u32] = &[
    0x1D400, // bold
    0x1D434, // italic
    0x1D468, // bold italic
    0x1D49C, // script
    0x1D4D0, // bold script
    0x1D504, // fraktur
    0x1D538, // double-struck
    0x1D56C, // bold fraktur
    0x1D5A0, // sans-serif
    0x1D5D4, // sans-serif bold
    0x1D608, // sans-serif italic
    0x1D63C, // sans-serif bold italic
    0x1D670, // monospace
];

/// Unassigned slots in the styled alphabets, paired with the Letterlike
/// Symbols glyph that stands in for that letter
const LETTERLIKE_HOLES: &[(u32, char)] = &[
    (0x1D455, '\u{210E}'), // italic h
    (0x1D49D, '\u{212C}'), // script B
    (0x1D4A0, '\u{2130}'), // script E
    (0x1D4A1, '\u{2131}'), // script F
    (0x1D4A3, '\u{210B}'), // script H
    (0x1D4A4, '\u{2110}'), // script I
    (0x1D4A7, '\u{2112}'), // script L
    (0x1D4A8, '\u{2133}'), // script M
    (0x1D4AD, '\u{211B}'), // script R
    (0x1D4BA, '\u{212F}'), // script e
    (0x1D4BC, '\u{210A}'), // script g
    (0x1D4C4, '\u{2134}'), // script o
    (0x1D506, '\u{212D}'), // fraktur C
    (0x1D50B, '\u{210C}'), // fraktur H
    (0x1D50C, '\u{2111}'), // fraktur I
    (0x1D515, '\u{211C}'), // fraktur R
    (0x1D51D, '\u{2128}'), // fraktur Z
    (0x1D53A, '\u{2102}'), // double-struck C
    (0x1D53F, '\u{210D}'), // double-struck H
    (0x1D545, '\u{2115}'), // double-struck N
    (0x1D547, '\u{2119}'), // double-struck P
    (0x1D548, '\u{211A}'), // double-struck Q
    (0x1D549, '\u{211D}'), // double-struck R
    (0x1D551, '\u{2124}'), // double-struck Z
];

/// Upright characters, in the same order as `FLIPPED_ALPHABET`.
pub const UPRIGHT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.!?\"&_;";

/// Rotated glyphs, position-for-position with `UPRIGHT_ALPHABET`.
pub const FLIPPED_ALPHABET: &str =
    "ɐqɔpǝɟƃɥᴉɾʞןɯuodbɹsʇnʌʍxʎz∀ꓭƆᗡƎℲ⅁HIſꓘ˥WNOԀΌᴚS⊥∩ΛMX⅄Z0ƖᄅƐㄣϛ9ㄥ86˙¡¿„⅋‾؛";

/// Glyphs used as stand-ins when a letter has no clean rotation.
const PLACEHOLDER_GLYPHS: &[(char, char)] = &[('⑴', 'l'), ('⒥', 'j'), ('⒦', 'k')];

pub static STYLED_LETTERS: Lazy<HashMap<char, char>> = Lazy::new(|| {
    let mut table = HashMap::with_capacity(STYLED_ALPHABET_BASES.len() * 52);
    for &base in STYLED_ALPHABET_BASES {
        for offset in 0..26u8 {
            let upper = char::from_u32(base + offset as u32);
            let lower = char::from_u32(base + 26 + offset as u32);
            if let Some(upper) = upper {
                table.insert(upper, (b'A' + offset) as char);
            }
            if let Some(lower) = lower {
                table.insert(lower, (b'a' + offset) as char);
            }
        }
    }
    for &(hole, glyph) in LETTERLIKE_HOLES {
        if let Some(letter) = char::from_u32(hole).and_then(|hole| table.remove(&hole)) {
            table.insert(glyph, letter);
        }
    }
    table
});

/// Reverse lookup from rotated glyph to upright character.
///
/// Pairs whose rotated form is itself ASCII (`o`, `s`, `b`/`q`, `6`/`9`, ...)
/// are left out: they are indistinguishable from ordinary text and mapping
/// them would rewrite plain input.
pub static UPSIDE_DOWN: Lazy<HashMap<char, char>> = Lazy::new(|| {
    let mut table: HashMap<char, char> = UPRIGHT_ALPHABET
        .chars()
        .zip(FLIPPED_ALPHABET.chars())
        .filter(|(_, flipped)| !flipped.is_ascii())
        .map(|(upright, flipped)| (flipped, upright))
        .collect();
    table.extend(PLACEHOLDER_GLYPHS.iter().copied());
    table
});
