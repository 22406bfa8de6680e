use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Maximal runs of word characters; everything else is a delimiter.
    static ref RE: Regex = Regex::new(r"\w+").expect("valid regex");
}

/// Split text into terms: maximal runs of Unicode word characters
/// (letters, marks, digits, connector punctuation such as `_`).
///
/// No case folding, stemming or stop-word removal is applied. Delimiters at
/// the start or end of the text never produce zero-length terms. The
/// returned iterator is lazy; calling `tokenize` again on the same text
/// yields the same sequence.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> + '_ {
    RE.find_iter(text).map(|m| m.as_str())
}

/// Number of terms `tokenize` would yield for `text`.
pub fn token_count(text: &str) -> usize {
    RE.find_iter(text).count()
}
