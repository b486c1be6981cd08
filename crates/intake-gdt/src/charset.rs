//! Text → wire bytes.
//!
//! Every character maps through a fixed chain: printable ASCII, then (in
//! CP437 mode) the codepage itself, then [`SUBSTITUTIONS`], then
//! [`DIACRITIC_FOLDS`], then `?`. Both tables are public so the mapping can
//! be enumerated and tested.

use intake_core::config::Charset;

/// Fixed replacements for characters with a conventional ASCII spelling.
pub const SUBSTITUTIONS: &[(char, &str)] = &[
    ('ä', "ae"),
    ('ö', "oe"),
    ('ü', "ue"),
    ('Ä', "Ae"),
    ('Ö', "Oe"),
    ('Ü', "Ue"),
    ('ß', "ss"),
    ('ẞ', "SS"),
    // Single quotes and primes
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201A}', "'"),
    ('\u{201B}', "'"),
    ('\u{2039}', "'"),
    ('\u{203A}', "'"),
    ('\u{2032}', "'"),
    ('\u{00B4}', "'"),
    // Double quotes and guillemets
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{201E}', "\""),
    ('\u{201F}', "\""),
    ('\u{2033}', "\""),
    ('«', "\""),
    ('»', "\""),
    // Dashes
    ('\u{2010}', "-"),
    ('\u{2011}', "-"),
    ('\u{2012}', "-"),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{2015}', "-"),
    ('\u{2212}', "-"),
    ('\u{2026}', "..."),
    ('\u{2022}', "*"),
    ('\u{00B7}', "."),
    ('\u{00A0}', " "),
    ('€', "EUR"),
    ('£', "GBP"),
    ('¥', "JPY"),
    ('¢', "c"),
    ('°', "deg"),
    ('±', "+/-"),
    ('×', "x"),
    ('÷', "/"),
    ('½', "1/2"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('¹', "1"),
    ('²', "2"),
    ('³', "3"),
    ('µ', "u"),
    ('§', "S"),
    ('¶', "P"),
    ('©', "(c)"),
    ('®', "(R)"),
    ('™', "TM"),
    ('¿', "?"),
    ('¡', "!"),
    ('ª', "a"),
    ('º', "o"),
    ('¬', "-"),
];

/// Latin letters with diacritics and the base letters they fold to.
pub const DIACRITIC_FOLDS: &[(&str, &str)] = &[
    ("ÀÁÂÃÅĀĂĄ", "A"),
    ("àáâãåāăą", "a"),
    ("Æ", "AE"),
    ("æ", "ae"),
    ("ÇĆĈĊČ", "C"),
    ("çćĉċč", "c"),
    ("ĎĐÐ", "D"),
    ("ďđð", "d"),
    ("ÈÉÊËĒĔĖĘĚ", "E"),
    ("èéêëēĕėęě", "e"),
    ("ĜĞĠĢ", "G"),
    ("ĝğġģ", "g"),
    ("ĤĦ", "H"),
    ("ĥħ", "h"),
    ("ÌÍÎÏĨĪĬĮİ", "I"),
    ("ìíîïĩīĭįı", "i"),
    ("Ĵ", "J"),
    ("ĵ", "j"),
    ("Ķ", "K"),
    ("ķ", "k"),
    ("ĹĻĽĿŁ", "L"),
    ("ĺļľŀł", "l"),
    ("ÑŃŅŇ", "N"),
    ("ñńņň", "n"),
    ("ÒÓÔÕØŌŎŐ", "O"),
    ("òóôõøōŏő", "o"),
    ("Œ", "OE"),
    ("œ", "oe"),
    ("ŔŖŘ", "R"),
    ("ŕŗř", "r"),
    ("ŚŜŞŠ", "S"),
    ("śŝşš", "s"),
    ("ŢŤŦ", "T"),
    ("ţťŧ", "t"),
    ("ÙÚÛŨŪŬŮŰŲ", "U"),
    ("ùúûũūŭůűų", "u"),
    ("Ŵ", "W"),
    ("ŵ", "w"),
    ("ÝŸŶ", "Y"),
    ("ýÿŷ", "y"),
    ("ŹŻŽ", "Z"),
    ("źżž", "z"),
    ("Þ", "Th"),
    ("þ", "th"),
];

/// Upper half of IBM codepage 437, indexed by `byte - 0x80`.
const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', //
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ', //
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»', //
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐', //
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧', //
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀', //
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩', //
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}', //
];

/// Collapse every whitespace run to one space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`collapse_whitespace`], then cut to at most `max_chars` characters.
pub fn clean_text(text: &str, max_chars: usize) -> String {
    collapse_whitespace(text).chars().take(max_chars).collect()
}

/// Encode free text for the wire: whitespace is collapsed and trimmed,
/// then every character is mapped into the alphabet of `charset`.
pub fn transliterate(text: &str, charset: Charset) -> Vec<u8> {
    transliterate_fragment(&collapse_whitespace(text), charset)
}

/// Map characters one by one without touching whitespace layout.
///
/// Encoding is per character, so the encoding of a concatenation equals
/// the concatenation of the encodings.
pub fn transliterate_fragment(text: &str, charset: Charset) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        push_char(&mut out, ch, charset);
    }
    out
}

fn push_char(out: &mut Vec<u8>, ch: char, charset: Charset) {
    if (' '..='~').contains(&ch) {
        out.push(ch as u8);
        return;
    }
    if charset == Charset::Cp437
        && let Some(byte) = cp437_byte(ch)
    {
        out.push(byte);
        return;
    }
    if let Some(replacement) = substitution(ch).or_else(|| fold_diacritic(ch)) {
        out.extend_from_slice(replacement.as_bytes());
        return;
    }
    out.push(b'?');
}

/// The fixed-table replacement for `ch`, if any.
pub fn substitution(ch: char) -> Option<&'static str> {
    SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == ch)
        .map(|(_, to)| *to)
}

/// The base letters `ch` folds to, if it is a known accented letter.
pub fn fold_diacritic(ch: char) -> Option<&'static str> {
    DIACRITIC_FOLDS
        .iter()
        .find(|(group, _)| group.contains(ch))
        .map(|(_, base)| *base)
}

/// CP437 byte for `ch` within the printable upper range 0x80–0xFE.
pub fn cp437_byte(ch: char) -> Option<u8> {
    let index = CP437_HIGH.iter().position(|&c| c == ch)?;
    let byte = 0x80 + index as u8;
    (byte != 0xFF).then_some(byte)
}

/// Read wire bytes back as text. ASCII passes through; the upper half is
/// interpreted as CP437.
pub fn decode_cp437(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b < 0x80 {
                b as char
            } else {
                CP437_HIGH[(b - 0x80) as usize]
            }
        })
        .collect()
}
