use lazy_static::lazy_static;
use regex::{Matches, Regex};

/// Words shorter than this are never indexed.
pub const MIN_WORD_LEN: usize = 3;

lazy_static! {
    // An HTML tag (possibly unterminated) or a run of ASCII letters.
    static ref RE: Regex = Regex::new(r"<[^>]*>?|[A-Za-z]+").expect("valid regex");
}

/// Lowercase a raw word for indexing, or reject it when it is too short.
pub fn normalize_word(raw: &str) -> Option<String> {
    if raw.len() < MIN_WORD_LEN {
        return None;
    }
    Some(raw.to_ascii_lowercase())
}

/// Lazy sequence of raw words in HTML content. Tag contents are skipped.
pub struct Words<'a> {
    inner: Matches<'static, 'a>,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner
            .by_ref()
            .map(|m| m.as_str())
            .find(|s| !s.starts_with('<'))
    }
}

pub fn words(html: &str) -> Words<'_> {
    let re: &'static Regex = &RE;
    Words { inner: re.find_iter(html) }
}

/// Normalized, index-eligible words of `html`, in document order.
pub fn index_words(html: &str) -> impl Iterator<Item = String> + '_ {
    words(html).filter_map(normalize_word)
}
