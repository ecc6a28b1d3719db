use vocab_core::ScriptProfile;

/// Thai block, U+0E00..U+0E7F
#[derive(Debug, Clone, Copy, Default)]
pub struct ThaiScript;

impl ScriptProfile for ThaiScript {
    fn language_code(&self) -> &str {
        "th"
    }

    fn is_target_char(&self, c: char) -> bool {
        ('\u{0E00}'..='\u{0E7F}').contains(&c)
    }
}
