use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

pub(crate) static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag regex"));
static NAME_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Name=.*?Comment").expect("name/comment regex"));

/// Substrings left behind by earlier bad scrapes
pub const DEFAULT_CONTAMINATION: &[&str] = &["Name=", "Comment", "usa. kgm", "kumbinsihin"];

/// Strips markup and known junk from translation strings
#[derive(Debug, Clone)]
pub struct Sanitizer {
    contamination: Vec<String>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAMINATION.iter().map(|s| s.to_string()).collect())
    }
}

impl Sanitizer {
    pub fn new(contamination: Vec<String>) -> Self {
        let contamination = contamination.into_iter().filter(|s| !s.is_empty()).collect();
        Self { contamination }
    }

    /// Clean a translation string. Repeats until the text stops changing,
    /// so the result is a fixed point.
    pub fn sanitize(&self, text: &str) -> String {
        let mut current = self.step(text);
        loop {
            let next = self.step(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn step(&self, text: &str) -> String {
        let mut text: String = text.nfc().collect();

        text = TAG_RE.replace_all(&text, "").into_owned();
        text = NAME_COMMENT_RE.replace_all(&text, "").into_owned();

        for junk in &self.contamination {
            text = text.replace(junk.as_str(), "");
        }

        collapse_whitespace(&text)
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn has_markup(text: &str) -> bool {
    TAG_RE.is_match(text)
}
