//! Re-wrap running text into short ground-truth lines.
//!
//! OCR renders work best with short lines, so the raw corpus is
//! re-flowed into lines of at most a handful of words before anything
//! gets rendered.

/// Split `text` on whitespace and pack it greedily into lines of at most
/// `words_per_line` words.
///
/// The final line keeps whatever words are left over, so it may be
/// shorter.  A `words_per_line` of zero is treated as one word per line.
pub fn wrap_words(text: &str, words_per_line: usize) -> Vec<String> {
    let words_per_line = words_per_line.max(1);
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(words_per_line)
        .map(|chunk| chunk.join(" "))
        .collect()
}

#[test]
fn wraps_to_at_most_n_words() {
    let lines = wrap_words("one two three four five six seven eight", 3);
    assert_eq!(lines, vec!["one two three", "four five six", "seven eight"]);
}

#[test]
fn collapses_whitespace_and_blank_lines() {
    let lines = wrap_words("  one \n\n two\tthree ", 7);
    assert_eq!(lines, vec!["one two three"]);
}

#[test]
fn empty_input_produces_no_lines() {
    assert!(wrap_words("", 7).is_empty());
}
