//! SlabKit Settings Crate
//!
//! Handles application configuration and autosave persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{default_config_path, AutosaveSettings, Config, EditorSettings, OverlaySettings};
pub use error::{ConfigError, PersistenceError, SettingsError, SettingsResult};
pub use persistence::{default_autosave_path, AutosaveOutcome, AutosaveStore, Autosaver, Debouncer};
