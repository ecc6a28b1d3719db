use std::fmt;
use std::sync::Arc;

use crate::sanitize::has_markup;
use crate::script::{DEFAULT_MIN_SCRIPT_RATIO, ScriptProfile, has_letters};
use crate::tables::Denylist;

pub const DEFAULT_MAX_LENGTH: usize = 100;

/// Why a translation needs repair, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepairReason {
    TagPollution,
    ForeignScriptDominant,
    ExcessiveLength,
    DenylistedWord,
    Empty,
}

impl RepairReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepairReason::TagPollution => "tag-pollution",
            RepairReason::ForeignScriptDominant => "foreign-script-dominant",
            RepairReason::ExcessiveLength => "excessive-length",
            RepairReason::DenylistedWord => "denylisted-word",
            RepairReason::Empty => "empty",
        }
    }
}

impl fmt::Display for RepairReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QualityPolicy {
    pub max_length: usize,
    pub min_script_ratio: f32,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            min_script_ratio: DEFAULT_MIN_SCRIPT_RATIO,
        }
    }
}

/// Result of classifying one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    /// First failing rule, `None` when the value is acceptable
    pub reason: Option<RepairReason>,
    /// Word is on the denylist, regardless of which rule fired first
    pub denylisted: bool,
}

impl Assessment {
    pub fn needs_repair(&self) -> bool {
        self.reason.is_some()
    }
}

pub struct QualityClassifier {
    policy: QualityPolicy,
    script: Arc<dyn ScriptProfile>,
    denylist: Arc<Denylist>,
}

impl QualityClassifier {
    pub fn new(policy: QualityPolicy, script: Arc<dyn ScriptProfile>, denylist: Arc<Denylist>) -> Self {
        Self {
            policy,
            script,
            denylist,
        }
    }

    pub fn policy(&self) -> QualityPolicy {
        self.policy
    }

    pub fn script(&self) -> &dyn ScriptProfile {
        self.script.as_ref()
    }

    pub fn is_denylisted(&self, word: &str) -> bool {
        self.denylist.contains(word)
    }

    /// Classify a record's current translation
    pub fn assess(&self, word: &str, translate: Option<&str>) -> Assessment {
        let text = translate.unwrap_or("").trim();
        let denylisted = self.is_denylisted(word);

        let reason = match self.content_issue(text) {
            Some(RepairReason::Empty) if denylisted => Some(RepairReason::DenylistedWord),
            Some(reason) => Some(reason),
            None if denylisted => Some(RepairReason::DenylistedWord),
            None => None,
        };

        Assessment { reason, denylisted }
    }

    /// Checks on the value alone, ignoring the denylist
    pub fn content_issue(&self, text: &str) -> Option<RepairReason> {
        let text = text.trim();

        if has_markup(text) {
            return Some(RepairReason::TagPollution);
        }
        if has_letters(text) && !self.is_primarily_target(text) {
            return Some(RepairReason::ForeignScriptDominant);
        }
        if text.chars().count() > self.policy.max_length {
            return Some(RepairReason::ExcessiveLength);
        }
        if is_placeholder(text) {
            return Some(RepairReason::Empty);
        }
        None
    }

    pub fn passes_content(&self, text: &str) -> bool {
        self.content_issue(text).is_none()
    }

    pub fn is_primarily_target(&self, text: &str) -> bool {
        self.script.is_dominant(text, self.policy.min_script_ratio)
    }
}

/// Empty, "-", or anything without a single letter
fn is_placeholder(text: &str) -> bool {
    text.is_empty() || !has_letters(text)
}
