//! tracker-config
//!
//! Persistent user preferences for the expense tracker.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, DATA_ROOT_ENV, MAX_WINDOW_MONTHS};
