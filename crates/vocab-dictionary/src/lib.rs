mod client;
mod types;

pub use client::FreeDictionaryClient;
pub use types::{ApiEntry, Dictionary, DictionaryEntry, ExampleLimits, extract_entry};
pub use vocab_core::FetchError;
