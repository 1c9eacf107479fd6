//! Configuration management for `Surround`
//!
//! This module provides the `ConfigManager` for loading and saving the
//! settings and state files in TOML format.

mod manager;
pub mod settings;

pub use manager::ConfigManager;
pub use settings::{SurroundSettings, SurroundState};
