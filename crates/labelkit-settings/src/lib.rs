//! # LabelKit Settings
//!
//! Designer configuration: placement defaults, text and barcode defaults,
//! layout presets and interaction tuning (handle size, nudge step).

pub mod config;
pub mod error;

pub use config::{
    BarcodeDefaults, DesignerSettings, InteractionSettings, LayoutPreset, LayoutSettings,
    PlacementDefaults, TextDefaults,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
