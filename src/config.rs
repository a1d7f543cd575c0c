//! Curator settings loaded from the workspace.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use types::{
    CONFIG_FILE_NAME,
    ConfigError,
    CuratorSettings,
    LanguageEntry,
    ValidationError,
};
