//! Designer configuration for LabelKit
//!
//! Supports JSON and TOML files; the format is picked from the file extension.
//! The default location is `<platform config dir>/labelkit/designer.toml`.
//!
//! Sections:
//! - Interaction tuning (resize handle size, nudge step)
//! - Default placement of each element kind
//! - Text, barcode and QR defaults
//! - Layout presets offered when a label has no layout yet

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use labelkit_core::Point;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Pointer interaction tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Side of each square resize anchor; also the minimum width/height after a resize
    pub handle_size: f64,
    /// Distance moved by one arrow-key press
    pub nudge_step: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            handle_size: 10.0,
            nudge_step: 1.0,
        }
    }
}

/// Where newly added elements are placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementDefaults {
    pub text: Point,
    pub image: Point,
    pub barcode: Point,
    pub qr_code: Point,
}

impl Default for PlacementDefaults {
    fn default() -> Self {
        Self {
            text: Point::new(50.0, 50.0),
            image: Point::new(100.0, 100.0),
            barcode: Point::new(200.0, 50.0),
            qr_code: Point::new(120.0, 120.0),
        }
    }
}

/// Defaults for new text elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
    pub color: String,
    /// Smallest accepted font size (inclusive)
    pub min_font_size: f64,
    /// Largest accepted font size (inclusive)
    pub max_font_size: f64,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            content: "New text".to_string(),
            font_family: "Segoe UI".to_string(),
            font_size: 14.0,
            color: "Black".to_string(),
            min_font_size: 1.0,
            max_font_size: 1000.0,
        }
    }
}

/// Defaults for new barcode and QR elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarcodeDefaults {
    pub ean_data: String,
    pub code39_data: String,
    pub qr_data: String,
    pub barcode_width: f64,
    pub barcode_height: f64,
    pub qr_size: f64,
}

impl Default for BarcodeDefaults {
    fn default() -> Self {
        Self {
            ean_data: "1234567890128".to_string(),
            code39_data: "HELLOCODE39".to_string(),
            qr_data: "HelloWorld".to_string(),
            barcode_width: 200.0,
            barcode_height: 80.0,
            qr_size: 100.0,
        }
    }
}

/// A named label size offered when creating the layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPreset {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

impl LayoutPreset {
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }
}

/// Layout (label background) settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub corner_radius: f64,
    pub presets: Vec<LayoutPreset>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            corner_radius: 20.0,
            presets: vec![
                LayoutPreset::new("SILVER LABEL 110×75", 300.0, 350.0),
                LayoutPreset::new("SILVER LABEL 80×46", 400.0, 450.0),
                LayoutPreset::new("CUSTOM LABEL 150×100", 500.0, 550.0),
                LayoutPreset::new("PC LABEL 210×59", 600.0, 650.0),
                LayoutPreset::new("WIFI LABEL 90×37", 700.0, 770.0),
            ],
        }
    }
}

/// Complete designer configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerSettings {
    pub interaction: InteractionSettings,
    pub placement: PlacementDefaults,
    pub text: TextDefaults,
    pub barcode: BarcodeDefaults,
    pub layout: LayoutSettings,
}

enum FileFormat {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<FileFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(FileFormat::Json),
        Some("toml") => Ok(FileFormat::Toml),
        Some(other) => Err(ConfigError::UnsupportedFormat(other.to_string())),
        None => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
}

fn positive(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

impl DesignerSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("labelkit").join("designer.toml"))
            .ok_or_else(|| SettingsError::ConfigDirectory("no platform config dir".to_string()))
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let settings: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Load from the default location, falling back to defaults when absent or invalid
    pub fn load_or_default() -> Self {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Using default designer settings: {}", e);
                return Self::default();
            }
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from_file(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    "Ignoring designer settings at {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        tracing::debug!("Designer settings written to {}", path.display());
        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        positive("interaction.handle_size", self.interaction.handle_size)?;
        positive("interaction.nudge_step", self.interaction.nudge_step)?;
        positive("text.font_size", self.text.font_size)?;
        positive("text.min_font_size", self.text.min_font_size)?;

        if self.text.max_font_size < self.text.min_font_size {
            return Err(ConfigError::ValueOutOfRange {
                key: "text.max_font_size".to_string(),
                value: self.text.max_font_size.to_string(),
            });
        }
        if !self.font_size_in_range(self.text.font_size) {
            return Err(ConfigError::ValueOutOfRange {
                key: "text.font_size".to_string(),
                value: self.text.font_size.to_string(),
            });
        }

        positive("barcode.barcode_width", self.barcode.barcode_width)?;
        positive("barcode.barcode_height", self.barcode.barcode_height)?;
        positive("barcode.qr_size", self.barcode.qr_size)?;

        if self.layout.corner_radius < 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "layout.corner_radius".to_string(),
                value: self.layout.corner_radius.to_string(),
            });
        }
        if self.layout.presets.is_empty() {
            return Err(ConfigError::Empty("layout.presets".to_string()));
        }
        for preset in &self.layout.presets {
            positive(&format!("layout.presets[{}].width", preset.name), preset.width)?;
            positive(&format!("layout.presets[{}].height", preset.name), preset.height)?;
        }

        Ok(())
    }

    /// Whether `size` lies within the configured font-size bounds
    pub fn font_size_in_range(&self, size: f64) -> bool {
        size >= self.text.min_font_size && size <= self.text.max_font_size
    }
}
