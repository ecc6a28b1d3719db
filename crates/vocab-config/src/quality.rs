use serde::{Deserialize, Serialize};

fn default_max_length() -> usize {
    100
}

fn default_min_script_ratio() -> f32 {
    0.5
}

fn default_truncate_over() -> usize {
    80
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct QualityConfig {
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Share of letters that must be in the target script
    #[serde(default = "default_min_script_ratio")]
    pub min_script_ratio: f32,
    /// Cosmetic pass cuts at the first clause separator above this length
    #[serde(default = "default_truncate_over")]
    pub truncate_over: usize,
    /// Junk substrings stripped in addition to the built-in list
    #[serde(default)]
    pub extra_contamination: Vec<String>,
    /// JSON object file of manual overrides, replaces the built-in table
    #[serde(default)]
    pub overrides_path: Option<String>,
    /// JSON array file of denylisted words, replaces the built-in list
    #[serde(default)]
    pub denylist_path: Option<String>,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            min_script_ratio: default_min_script_ratio(),
            truncate_over: default_truncate_over(),
            extra_contamination: vec![],
            overrides_path: None,
            denylist_path: None,
        }
    }
}
