//! Configuration module for Pensum.
//!
//! Handles loading and saving application settings.

mod settings;

pub use settings::{GeneralSettings, ServerSettings, Settings, StoreSettings};
