use serde::{Deserialize, Serialize};

fn default_js_path() -> String {
    "data.js".to_string()
}

fn default_js_const() -> String {
    "OXFORD_DATA".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct OutputConfig {
    #[serde(default = "default_js_path")]
    pub js_path: String,
    /// Constant name the front end reads the dataset from
    #[serde(default = "default_js_const")]
    pub js_const: String,
    #[serde(default)]
    pub checkpoint_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            js_path: default_js_path(),
            js_const: default_js_const(),
            checkpoint_path: None,
        }
    }
}
