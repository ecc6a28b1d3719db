pub mod script;
pub mod tables;
pub mod translator;

pub use script::ThaiScript;
pub use tables::{default_denylist, default_overrides};
pub use translator::GoogleTranslator;
