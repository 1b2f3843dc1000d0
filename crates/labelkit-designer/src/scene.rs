//! Scene nodes: the transient visual layer derived from element models.
//!
//! A node is never persisted. It is rebuilt wholesale from its model by the
//! element factory and owned by exactly one view model.

use image::RgbaImage;
use labelkit_core::{Point, Rect, SceneNodeId};

use crate::model::{Color, FontStyle, FontWeight};

/// What a node paints
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// Text run
    TextBlock {
        text: String,
        font_family: String,
        font_size: f64,
        font_style: FontStyle,
        font_weight: FontWeight,
        color: Color,
    },
    /// Decoded picture; `None` when the source could not be read
    Bitmap { raster: Option<RgbaImage> },
    /// Barcode or QR symbol; `None` when no symbol could be rendered
    Symbol { raster: Option<RgbaImage> },
    /// Rounded label outline
    Border { corner_radius: f64 },
}

impl Visual {
    /// Raster backing an image or symbol node.
    pub fn raster(&self) -> Option<&RgbaImage> {
        match self {
            Visual::Bitmap { raster } | Visual::Symbol { raster } => raster.as_ref(),
            _ => None,
        }
    }
}

/// One visual object on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    id: SceneNodeId,
    pub visual: Visual,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: i32,
    pub opacity: f64,
    /// Set while the node is a child of the canvas
    attached: bool,
    /// Set while a gesture holds pointer capture on this node
    captured: bool,
}

impl SceneNode {
    pub fn new(id: SceneNodeId, visual: Visual, bounds: Rect, z_index: i32) -> Self {
        Self {
            id,
            visual,
            left: bounds.left,
            top: bounds.top,
            width: bounds.width,
            height: bounds.height,
            z_index,
            opacity: 1.0,
            attached: false,
            captured: false,
        }
    }

    pub fn id(&self) -> SceneNodeId {
        self.id
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.left = bounds.left;
        self.top = bounds.top;
        self.width = bounds.width;
        self.height = bounds.height;
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Whether the node currently has a canvas parent
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn attach(&mut self) {
        self.attached = true;
    }

    pub(crate) fn detach(&mut self) {
        self.attached = false;
        self.captured = false;
    }

    pub fn has_capture(&self) -> bool {
        self.captured
    }

    pub(crate) fn capture_pointer(&mut self) {
        self.captured = true;
    }

    pub(crate) fn release_pointer(&mut self) {
        self.captured = false;
    }
}
