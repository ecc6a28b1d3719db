pub mod cleanup;
pub mod error;
pub mod normalize;
pub mod quality;
pub mod record;
pub mod sanitize;
pub mod script;
pub mod store;
pub mod tables;

pub use error::{FetchError, StoreError, TableError};
pub use quality::{Assessment, QualityClassifier, QualityPolicy, RepairReason};
pub use record::VocabularyRecord;
pub use sanitize::Sanitizer;
pub use script::{ScriptProfile, ScriptRange};
pub use tables::{Denylist, OverrideTable};
