//! Per-kind element records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use labelkit_core::ElementError;

/// Fields every placeable element carries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementBase {
    /// Unique within the element's kind
    pub id: u32,
    /// Z-order; higher paints later
    pub layer: i32,
    pub location_x: f64,
    pub location_y: f64,
    pub width: f64,
    pub height: f64,
    /// Suppresses drag and resize
    #[serde(default)]
    pub locked: bool,
}

macro_rules! lenient_tag {
    ($name:ident, $default:ident, $other:ident) => {
        impl $name {
            /// Parse a tag as stored in documents.
            pub fn parse(tag: &str) -> Option<Self> {
                match tag {
                    t if t.eq_ignore_ascii_case(stringify!($default)) => Some(Self::$default),
                    t if t.eq_ignore_ascii_case(stringify!($other)) => Some(Self::$other),
                    _ => None,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    Self::$default => stringify!($default),
                    Self::$other => stringify!($other),
                }
            }
        }

        impl From<String> for $name {
            fn from(tag: String) -> Self {
                Self::parse(&tag).unwrap_or_else(|| {
                    tracing::warn!(
                        "Unknown {} '{}', using {}",
                        stringify!($name),
                        tag,
                        stringify!($default)
                    );
                    Self::$default
                })
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Font slant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

lenient_tag!(FontStyle, Normal, Italic);

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

lenient_tag!(FontWeight, Normal, Bold);

/// Text element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    #[serde(flatten)]
    pub(crate) base: ElementBase,
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default)]
    pub font_weight: FontWeight,
    /// Color name or `#RRGGBB`
    pub color: String,
}

impl TextElement {
    pub fn new(text: impl Into<String>, font_family: impl Into<String>, font_size: f64) -> Self {
        Self {
            base: ElementBase::default(),
            text: text.into(),
            font_family: font_family.into(),
            font_size,
            font_style: FontStyle::Normal,
            font_weight: FontWeight::Normal,
            color: "Black".to_string(),
        }
    }

    pub fn base(&self) -> &ElementBase {
        &self.base
    }
}

/// Where an image's pixels come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ImageSource {
    /// Reference to a file on disk
    Path(PathBuf),
    /// Encoded image bytes stored in the document (base64 on disk)
    Embedded(#[serde(with = "base64_bytes")] Vec<u8>),
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

/// Image element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    #[serde(flatten)]
    pub(crate) base: ElementBase,
    pub source: ImageSource,
    opacity: f64,
    #[serde(default)]
    pub title: String,
}

impl ImageElement {
    pub fn new(source: ImageSource, title: impl Into<String>) -> Self {
        Self {
            base: ElementBase::default(),
            source,
            opacity: 1.0,
            title: title.into(),
        }
    }

    pub fn base(&self) -> &ElementBase {
        &self.base
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Opacity must lie in 0.0..=1.0; out-of-range values are rejected unchanged.
    pub fn set_opacity(&mut self, opacity: f64) -> Result<(), ElementError> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(ElementError::OpacityOutOfRange { opacity });
        }
        self.opacity = opacity;
        Ok(())
    }
}

/// Linear barcode symbologies the designer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbology {
    Ean13,
    Code39,
}

impl Symbology {
    /// Parse the tag stored on a barcode element ("EAN", "Code39").
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "EAN" | "EAN13" | "EAN-13" => Some(Self::Ean13),
            "CODE39" | "CODE-39" => Some(Self::Code39),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Ean13 => "EAN",
            Self::Code39 => "Code39",
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Linear barcode element
///
/// The type is stored as a free-form tag so documents with unknown
/// symbologies still load; rendering reports them instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarcodeElement {
    #[serde(flatten)]
    pub(crate) base: ElementBase,
    pub data: String,
    pub barcode_type: String,
}

impl BarcodeElement {
    pub fn new(data: impl Into<String>, symbology: Symbology) -> Self {
        Self {
            base: ElementBase::default(),
            data: data.into(),
            barcode_type: symbology.tag().to_string(),
        }
    }

    pub fn base(&self) -> &ElementBase {
        &self.base
    }

    pub fn symbology(&self) -> Result<Symbology, ElementError> {
        Symbology::parse(&self.barcode_type).ok_or_else(|| ElementError::UnsupportedBarcodeType {
            symbology: self.barcode_type.clone(),
        })
    }
}

/// QR code element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrCodeElement {
    #[serde(flatten)]
    pub(crate) base: ElementBase,
    pub data: String,
}

impl QrCodeElement {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            base: ElementBase::default(),
            data: data.into(),
        }
    }

    pub fn base(&self) -> &ElementBase {
        &self.base
    }
}

/// Label background. Its location is always (0, 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutElement {
    #[serde(flatten)]
    pub(crate) base: ElementBase,
    pub corner_radius: f64,
}

impl LayoutElement {
    pub fn new(width: f64, height: f64, corner_radius: f64) -> Self {
        Self {
            base: ElementBase {
                width,
                height,
                locked: true,
                ..ElementBase::default()
            },
            corner_radius,
        }
    }

    pub fn base(&self) -> &ElementBase {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_style_lenient_parse() {
        let style: FontStyle = serde_json::from_str("\"Italic\"").unwrap();
        assert_eq!(style, FontStyle::Italic);

        let style: FontStyle = serde_json::from_str("\"Oblique\"").unwrap();
        assert_eq!(style, FontStyle::Normal);

        let weight: FontWeight = serde_json::from_str("\"bold\"").unwrap();
        assert_eq!(weight, FontWeight::Bold);
        assert_eq!(serde_json::to_string(&weight).unwrap(), "\"Bold\"");
    }

    #[test]
    fn test_opacity_validation() {
        let mut image = ImageElement::new(ImageSource::Path("a.png".into()), "a");
        assert!(image.set_opacity(0.5).is_ok());
        assert_eq!(image.opacity(), 0.5);

        assert_eq!(
            image.set_opacity(1.2),
            Err(ElementError::OpacityOutOfRange { opacity: 1.2 })
        );
        assert_eq!(image.opacity(), 0.5);
    }

    #[test]
    fn test_symbology_tags() {
        assert_eq!(Symbology::parse("EAN"), Some(Symbology::Ean13));
        assert_eq!(Symbology::parse("code39"), Some(Symbology::Code39));
        assert_eq!(Symbology::parse("QR"), None);

        let mut barcode = BarcodeElement::new("123", Symbology::Code39);
        assert_eq!(barcode.barcode_type, "Code39");
        barcode.barcode_type = "PDF417".to_string();
        assert!(matches!(
            barcode.symbology(),
            Err(ElementError::UnsupportedBarcodeType { .. })
        ));
    }

    #[test]
    fn test_embedded_image_is_base64_on_disk() {
        let source = ImageSource::Embedded(vec![1, 2, 3]);
        let json = serde_json::to_string(&source).unwrap();
        assert_eq!(json, r#"{"type":"embedded","value":"AQID"}"#);

        let back: ImageSource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, source);
    }

    #[test]
    fn test_layout_defaults_locked() {
        let layout = LayoutElement::new(300.0, 350.0, 20.0);
        assert!(layout.base().locked);
        assert_eq!(layout.base().location_x, 0.0);
    }
}
