use std::sync::Arc;

use crate::sanitize::Sanitizer;
use crate::script::ScriptProfile;

pub const DEFAULT_TRUNCATE_OVER: usize = 80;

const CLAUSE_SEPARATORS: &[char] = &['/', ',', ';', '.'];

/// Light cleanup for translations that already pass quality checks
pub struct CosmeticCleaner {
    sanitizer: Sanitizer,
    script: Arc<dyn ScriptProfile>,
    truncate_over: usize,
}

impl CosmeticCleaner {
    pub fn new(sanitizer: Sanitizer, script: Arc<dyn ScriptProfile>, truncate_over: usize) -> Self {
        Self {
            sanitizer,
            script,
            truncate_over,
        }
    }

    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    pub fn clean(&self, text: &str) -> String {
        let text = self.sanitizer.sanitize(text);
        let text = self.trim_romanization(&text);

        if text.chars().count() > self.truncate_over {
            if let Some(first) = text
                .split(CLAUSE_SEPARATORS)
                .map(str::trim)
                .find(|part| !part.is_empty())
            {
                return first.to_string();
            }
        }

        text.trim().to_string()
    }

    /// Drop a romanized transcription that trails target-script text,
    /// e.g. "ข้อเท้า k̄ĥx thêā" -> "ข้อเท้า"
    pub fn trim_romanization<'a>(&self, text: &'a str) -> &'a str {
        let mut seen_target = false;
        let mut gap_start: Option<usize> = None;

        for (idx, c) in text.char_indices() {
            if c.is_whitespace() {
                if seen_target && gap_start.is_none() {
                    gap_start = Some(idx);
                }
                continue;
            }

            if let Some(start) = gap_start {
                if is_lower_latin(c) {
                    return text[..start].trim_end();
                }
                gap_start = None;
            }

            if self.script.is_target_char(c) {
                seen_target = true;
            } else {
                seen_target = false;
            }
        }

        text
    }
}

fn is_lower_latin(c: char) -> bool {
    c.is_ascii_lowercase() || (('\u{00C0}'..='\u{024F}').contains(&c) && c.is_lowercase())
}
