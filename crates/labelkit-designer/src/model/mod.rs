//! Element model: the serializable source of truth for everything on a label.
//!
//! [`LabelElement`] is a tagged union over the five element kinds. Geometry is
//! read and written through its accessors, which is where the layout pin lives:
//! a layout's location always reads back as (0, 0) and writes to it are dropped.

mod color;
mod elements;
mod metadata;

pub use color::Color;
pub use elements::{
    BarcodeElement, ElementBase, FontStyle, FontWeight, ImageElement, ImageSource,
    LayoutElement, QrCodeElement, Symbology, TextElement,
};
pub use metadata::DocumentMetadata;

use labelkit_core::{ElementKind, Rect};
use serde::{Deserialize, Serialize};

/// One placeable element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum LabelElement {
    Layout(LayoutElement),
    Text(TextElement),
    Image(ImageElement),
    Barcode(BarcodeElement),
    QrCode(QrCodeElement),
}

impl LabelElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Layout(_) => ElementKind::Layout,
            Self::Text(_) => ElementKind::Text,
            Self::Image(_) => ElementKind::Image,
            Self::Barcode(_) => ElementKind::Barcode,
            Self::QrCode(_) => ElementKind::QrCode,
        }
    }

    pub fn base(&self) -> &ElementBase {
        match self {
            Self::Layout(e) => &e.base,
            Self::Text(e) => &e.base,
            Self::Image(e) => &e.base,
            Self::Barcode(e) => &e.base,
            Self::QrCode(e) => &e.base,
        }
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        match self {
            Self::Layout(e) => &mut e.base,
            Self::Text(e) => &mut e.base,
            Self::Image(e) => &mut e.base,
            Self::Barcode(e) => &mut e.base,
            Self::QrCode(e) => &mut e.base,
        }
    }

    pub fn is_layout(&self) -> bool {
        matches!(self, Self::Layout(_))
    }

    pub fn id(&self) -> u32 {
        self.base().id
    }

    pub fn set_id(&mut self, id: u32) {
        self.base_mut().id = id;
    }

    pub fn layer(&self) -> i32 {
        self.base().layer
    }

    pub fn set_layer(&mut self, layer: i32) {
        self.base_mut().layer = layer;
    }

    pub fn location_x(&self) -> f64 {
        if self.is_layout() {
            0.0
        } else {
            self.base().location_x
        }
    }

    /// Ignored for layouts.
    pub fn set_location_x(&mut self, x: f64) {
        if !self.is_layout() {
            self.base_mut().location_x = x;
        }
    }

    pub fn location_y(&self) -> f64 {
        if self.is_layout() {
            0.0
        } else {
            self.base().location_y
        }
    }

    /// Ignored for layouts.
    pub fn set_location_y(&mut self, y: f64) {
        if !self.is_layout() {
            self.base_mut().location_y = y;
        }
    }

    pub fn width(&self) -> f64 {
        self.base().width
    }

    /// Negative widths are stored as zero.
    pub fn set_width(&mut self, width: f64) {
        self.base_mut().width = width.max(0.0);
    }

    pub fn height(&self) -> f64 {
        self.base().height
    }

    /// Negative heights are stored as zero.
    pub fn set_height(&mut self, height: f64) {
        self.base_mut().height = height.max(0.0);
    }

    pub fn locked(&self) -> bool {
        self.base().locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.base_mut().locked = locked;
    }

    /// Current bounding box on the canvas
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.location_x(),
            self.location_y(),
            self.width(),
            self.height(),
        )
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.set_id(id);
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.set_layer(layer);
        self
    }

    pub fn with_location(mut self, x: f64, y: f64) -> Self {
        self.set_location_x(x);
        self.set_location_y(y);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.set_width(width);
        self.set_height(height);
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.set_locked(locked);
        self
    }

    /// Repair values a hand-edited or older document may carry.
    ///
    /// Layout locations are zeroed, negative sizes become zero and image
    /// opacity is clamped into range.
    pub fn normalize(&mut self) {
        if let Self::Layout(layout) = self {
            if layout.base.location_x != 0.0 || layout.base.location_y != 0.0 {
                tracing::warn!(
                    "Layout [{}] stored at ({}, {}), pinning to origin",
                    layout.base.id,
                    layout.base.location_x,
                    layout.base.location_y
                );
                layout.base.location_x = 0.0;
                layout.base.location_y = 0.0;
            }
        }
        if let Self::Image(image) = self {
            let opacity = image.opacity();
            if image.set_opacity(opacity.clamp(0.0, 1.0)).is_err() {
                // NaN
                let _ = image.set_opacity(1.0);
            }
        }
        let base = self.base_mut();
        base.width = base.width.max(0.0);
        base.height = base.height.max(0.0);
    }
}

impl From<LayoutElement> for LabelElement {
    fn from(e: LayoutElement) -> Self {
        Self::Layout(e)
    }
}

impl From<TextElement> for LabelElement {
    fn from(e: TextElement) -> Self {
        Self::Text(e)
    }
}

impl From<ImageElement> for LabelElement {
    fn from(e: ImageElement) -> Self {
        Self::Image(e)
    }
}

impl From<BarcodeElement> for LabelElement {
    fn from(e: BarcodeElement) -> Self {
        Self::Barcode(e)
    }
}

impl From<QrCodeElement> for LabelElement {
    fn from(e: QrCodeElement) -> Self {
        Self::QrCode(e)
    }
}
