//! Geometry and identity types shared across the workspace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A canvas-relative point in device-independent units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - origin`.
    pub fn delta_from(&self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Square of side `size` centred on `center`.
    pub fn centered_square(center: Point, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    /// Same size, new top-left corner.
    pub fn moved_to(&self, left: f64, top: f64) -> Self {
        Self::new(left, top, self.width, self.height)
    }
}

/// Identity of a scene node on the canvas.
///
/// Node ids are allocated by the document coordinator and never reused within
/// a session. They are distinct from element ids, which are per-kind and persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SceneNodeId(pub u64);

impl fmt::Display for SceneNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// The five kinds of placeable label elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementKind {
    Layout,
    Text,
    Image,
    Barcode,
    QrCode,
}

impl ElementKind {
    /// All kinds in tree-view order.
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Layout,
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Barcode,
        ElementKind::QrCode,
    ];

    /// Heading of the tree-view group holding this kind.
    pub fn group_name(&self) -> &'static str {
        match self {
            Self::Layout => "Layout",
            Self::Text => "Texts",
            Self::Image => "Images",
            Self::Barcode => "Barcodes",
            Self::QrCode => "QR Codes",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout => write!(f, "Layout"),
            Self::Text => write!(f, "Text"),
            Self::Image => write!(f, "Image"),
            Self::Barcode => write!(f, "Barcode"),
            Self::QrCode => write!(f, "QR Code"),
        }
    }
}
