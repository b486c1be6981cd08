use intake_core::config::Charset;
use intake_gdt::wrap::wrap;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn strings(lines: Vec<Vec<u8>>) -> Vec<String> {
    lines
        .into_iter()
        .map(|l| String::from_utf8(l).unwrap())
        .collect()
}

#[test]
fn short_text_is_one_prefixed_line() {
    let lines = wrap("Husten", 70, "- ", "  ", Charset::Ascii);
    assert_eq!(strings(lines), vec!["- Husten"]);
}

#[test]
fn empty_text_yields_the_prefix() {
    assert_eq!(strings(wrap("", 70, "- ", "  ", Charset::Ascii)), vec!["- "]);
    assert_eq!(strings(wrap("  ", 70, "", "", Charset::Ascii)), vec![""]);
}

#[test]
fn continuation_lines_use_their_own_prefix() {
    let lines = wrap("alpha beta gamma delta", 12, "- ", "  ", Charset::Ascii);
    assert_eq!(strings(lines), vec!["- alpha beta", "  gamma", "  delta"]);
}

#[test]
fn overlong_word_is_cut_to_budget() {
    let lines = wrap("abcdefghijklmnop", 10, "- ", "  ", Charset::Ascii);
    assert_eq!(strings(lines), vec!["- abcdefgh"]);
}

#[test]
fn overlong_word_after_other_words_is_cut_too() {
    let lines = wrap("hi abcdefghijklmnop yo", 8, "", "", Charset::Ascii);
    assert_eq!(strings(lines), vec!["hi", "abcdefgh", "yo"]);
}

#[test]
fn budget_is_measured_after_transliteration() {
    // "Grüße" is 7 bytes in ASCII but 5 in CP437
    let ascii = wrap("Grüße", 6, "", "", Charset::Ascii);
    assert_eq!(strings(ascii), vec!["Gruess"]);
    let cp437 = wrap("Grüße", 6, "", "", Charset::Cp437);
    assert_eq!(cp437, vec![b"Gr\x81\xE1e".to_vec()]);
}

#[test]
fn whitespace_in_input_is_collapsed() {
    let lines = wrap("a\n\n b\tc", 70, "", "", Charset::Ascii);
    assert_eq!(strings(lines), vec!["a b c"]);
}

proptest! {
    #[test]
    fn lines_never_exceed_budget(
        words in prop::collection::vec("[a-zäöüß]{1,25}", 0..30),
        max_bytes in 4usize..80,
    ) {
        let text = words.join(" ");
        for charset in [Charset::Ascii, Charset::Cp437] {
            let lines = wrap(&text, max_bytes, "- ", "  ", charset);
            prop_assert!(!lines.is_empty());
            for line in &lines {
                prop_assert!(line.len() <= max_bytes);
            }
        }
    }

    #[test]
    fn wrapping_is_deterministic(text in "[a-z ]{0,120}", max_bytes in 3usize..40) {
        prop_assert_eq!(
            wrap(&text, max_bytes, "- ", "  ", Charset::Cp437),
            wrap(&text, max_bytes, "- ", "  ", Charset::Cp437)
        );
    }

    #[test]
    fn no_words_are_lost_when_they_fit(
        words in prop::collection::vec("[a-z]{1,8}", 1..20),
    ) {
        let text = words.join(" ");
        let lines = strings(wrap(&text, 20, "- ", "  ", Charset::Ascii));
        let rejoined: Vec<String> = lines
            .iter()
            .flat_map(|l| l[2..].split(' ').map(str::to_string).collect::<Vec<_>>())
            .collect();
        prop_assert_eq!(rejoined, words);
    }
}
