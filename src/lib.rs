pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

// ValidationUtils 與設定驗證共用同一模組
pub use utils::validation;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileStore, LocalDownloads, MemoryDownloads, MemoryHistory, MemoryStore};
pub use config::toml_config::HelperConfig;
pub use crate::core::storage::JsonStorage;
pub use crate::core::timing::{debounce, throttle, Debounced, Throttled};
pub use utils::error::{HelperError, Result};
