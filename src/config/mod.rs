//! Configuration management

mod settings;

pub use settings::{AppConfig, ConfigStore, CONFIG_VERSION};
