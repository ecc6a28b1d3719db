use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

fn default_max_examples() -> usize {
    3
}

fn default_max_example_len() -> usize {
    100
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_max_examples")]
    pub max_examples: usize,
    /// Examples must be strictly shorter than this many characters
    #[serde(default = "default_max_example_len")]
    pub max_example_len: usize,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            max_examples: default_max_examples(),
            max_example_len: default_max_example_len(),
        }
    }
}
