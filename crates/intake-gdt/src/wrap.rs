//! Greedy word wrap measured in encoded bytes.

use intake_core::config::Charset;

use crate::charset::{collapse_whitespace, transliterate_fragment};

/// Wrap `text` into encoded lines of at most `max_bytes`.
///
/// The first line starts with `first_prefix`, every later line with
/// `cont_prefix`. Prefixes are encoded as given, so indentation survives.
/// A word that cannot fit even on a line of its own is cut to exactly
/// `max_bytes`.
pub fn wrap(
    text: &str,
    max_bytes: usize,
    first_prefix: &str,
    cont_prefix: &str,
    charset: Charset,
) -> Vec<Vec<u8>> {
    let body = collapse_whitespace(text);
    let first = transliterate_fragment(first_prefix, charset);
    let cont = transliterate_fragment(cont_prefix, charset);

    let whole = join(&first, &transliterate_fragment(&body, charset));
    if whole.len() <= max_bytes {
        return vec![whole];
    }
    if body.is_empty() {
        return vec![truncated(whole, max_bytes)];
    }

    let mut lines: Vec<Vec<u8>> = Vec::new();
    let mut current: Vec<u8> = Vec::new();

    for word in body.split(' ') {
        let word = transliterate_fragment(word, charset);
        let prefix = if lines.is_empty() { &first } else { &cont };

        let separator = usize::from(!current.is_empty());
        if prefix.len() + current.len() + separator + word.len() <= max_bytes {
            if !current.is_empty() {
                current.push(b' ');
            }
            current.extend_from_slice(&word);
            continue;
        }

        if !current.is_empty() {
            lines.push(join(prefix, &current));
            current.clear();
        }

        let prefix = if lines.is_empty() { &first } else { &cont };
        if prefix.len() + word.len() <= max_bytes {
            current = word;
        } else {
            lines.push(truncated(join(prefix, &word), max_bytes));
        }
    }

    if !current.is_empty() {
        let prefix = if lines.is_empty() { &first } else { &cont };
        lines.push(join(prefix, &current));
    }
    lines
}

fn join(prefix: &[u8], body: &[u8]) -> Vec<u8> {
    let mut line = Vec::with_capacity(prefix.len() + body.len());
    line.extend_from_slice(prefix);
    line.extend_from_slice(body);
    line
}

fn truncated(mut line: Vec<u8>, max_bytes: usize) -> Vec<u8> {
    line.truncate(max_bytes);
    line
}
