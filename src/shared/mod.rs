/// Shared modules used across the application
pub mod config;
pub mod i18n;

// Re-export commonly used items
pub use config::{Config, Language};
pub use i18n::I18n;
