use std::ops::RangeInclusive;

/// Default share of letters that must belong to the target script
pub const DEFAULT_MIN_SCRIPT_RATIO: f32 = 0.5;

/// Script detection for a target language
pub trait ScriptProfile: Send + Sync {
    /// Language identifier (ISO 639-1 code: "th", "ja", ...)
    fn language_code(&self) -> &str;

    /// Whether a character belongs to the target script
    fn is_target_char(&self, c: char) -> bool;

    /// Share of letters that are target-script letters.
    ///
    /// Whitespace, digits and punctuation are ignored. Text without any
    /// letters scores 0.0.
    fn dominance(&self, text: &str) -> f32 {
        let mut target = 0usize;
        let mut letters = 0usize;
        for c in text.chars() {
            if self.is_target_char(c) {
                target += 1;
                letters += 1;
            } else if c.is_alphabetic() {
                letters += 1;
            }
        }

        if letters == 0 {
            0.0
        } else {
            target as f32 / letters as f32
        }
    }

    /// Whether the text is written primarily in the target script
    fn is_dominant(&self, text: &str, min_ratio: f32) -> bool {
        self.dominance(text) >= min_ratio
    }
}

/// Script profile backed by a set of Unicode ranges
#[derive(Debug, Clone)]
pub struct ScriptRange {
    code: String,
    ranges: Vec<RangeInclusive<char>>,
}

impl ScriptRange {
    pub fn new(code: impl Into<String>, ranges: Vec<RangeInclusive<char>>) -> Self {
        Self {
            code: code.into(),
            ranges,
        }
    }
}

impl ScriptProfile for ScriptRange {
    fn language_code(&self) -> &str {
        &self.code
    }

    fn is_target_char(&self, c: char) -> bool {
        self.ranges.iter().any(|r| r.contains(&c))
    }
}

pub fn has_letters(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}

#[cfg(test)]
pub(crate) fn thai() -> ScriptRange {
    ScriptRange::new("th", vec!['\u{0E00}'..='\u{0E7F}'])
}
