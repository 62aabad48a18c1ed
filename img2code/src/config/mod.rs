//! Configuration management: defaults, validation, loading from file + environment.

pub mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::AppConfig;
pub use defaults::{DEFAULT_SETTINGS, SettingDef};
pub use validation::validate_setting;
