//! Element factory: turns element models into renderable scene nodes.
//!
//! Factories are pure with respect to the designer: they read a model and
//! return a fresh node, never touching selection or gesture state. Problems
//! that leave a node without pixels (unreadable image, unknown symbology)
//! are reported alongside the node instead of failing the build.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use labelkit_core::{ElementError, Rect, SceneNodeId};
use qrcode::QrCode;

use crate::model::{
    BarcodeElement, Color, ImageElement, ImageSource, LabelElement, LayoutElement,
    QrCodeElement, Symbology, TextElement,
};
use crate::scene::{SceneNode, Visual};

const AVERAGE_GLYPH_WIDTH: f64 = 0.6;
const LINE_HEIGHT: f64 = 1.33;
const TEXT_PADDING: f64 = 5.0;
const QR_QUIET_ZONE: u32 = 2;
const MAX_RASTER_EXTENT: f64 = 4096.0;

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A freshly built node plus any recoverable problem met while building it
#[derive(Debug, Clone)]
pub struct NodeBuild {
    pub node: SceneNode,
    pub notice: Option<ElementError>,
}

impl NodeBuild {
    fn ok(node: SceneNode) -> Self {
        Self { node, notice: None }
    }
}

/// Encodes data for a linear symbology into bar modules (`true` = dark).
pub trait LinearEncoder: Send + Sync {
    fn encode(&self, symbology: Symbology, data: &str) -> Result<Vec<bool>, ElementError>;
}

/// Builds scene nodes for element models
pub trait ElementFactory: Send + Sync {
    /// Dispatch on the element kind and stamp the model's layer as z-index.
    fn create_scene_node(&self, id: SceneNodeId, model: &LabelElement) -> NodeBuild {
        let mut build = match model {
            LabelElement::Layout(layout) => self.create_layout_node(id, layout),
            LabelElement::Text(text) => self.create_text_node(id, text),
            LabelElement::Image(image) => self.create_image_node(id, image),
            LabelElement::Barcode(barcode) => self.create_barcode_node(id, barcode),
            LabelElement::QrCode(qr) => self.create_qr_node(id, qr),
        };
        build.node.z_index = model.layer();
        build
    }

    fn create_text_node(&self, id: SceneNodeId, text: &TextElement) -> NodeBuild;

    fn create_image_node(&self, id: SceneNodeId, image: &ImageElement) -> NodeBuild;

    fn create_barcode_node(&self, id: SceneNodeId, barcode: &BarcodeElement) -> NodeBuild;

    fn create_qr_node(&self, id: SceneNodeId, qr: &QrCodeElement) -> NodeBuild;

    fn create_layout_node(&self, id: SceneNodeId, layout: &LayoutElement) -> NodeBuild;
}

/// Default factory: QR symbols via `qrcode`, pictures via `image`, linear
/// barcodes through an optional [`LinearEncoder`].
#[derive(Clone, Default)]
pub struct RasterFactory {
    encoder: Option<Arc<dyn LinearEncoder>>,
}

impl std::fmt::Debug for RasterFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterFactory")
            .field("encoder", &self.encoder.is_some())
            .finish()
    }
}

impl RasterFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoder(encoder: Arc<dyn LinearEncoder>) -> Self {
        Self {
            encoder: Some(encoder),
        }
    }

    /// Approximate rendered size of a text element, padding included.
    pub fn measure_text(text: &TextElement) -> (f64, f64) {
        let lines = text.text.lines().count().max(1);
        let longest = text
            .text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let width = longest as f64 * text.font_size * AVERAGE_GLYPH_WIDTH + TEXT_PADDING * 2.0;
        let height = lines as f64 * text.font_size * LINE_HEIGHT + TEXT_PADDING * 2.0;
        (width.ceil(), height.ceil())
    }

    fn decode_image(source: &ImageSource) -> Result<RgbaImage, ElementError> {
        let decoded = match source {
            ImageSource::Path(path) => image::open(path),
            ImageSource::Embedded(bytes) => image::load_from_memory(bytes),
        };
        decoded
            .map(|img| img.to_rgba8())
            .map_err(|e| ElementError::Render {
                reason: e.to_string(),
            })
    }

    fn render_qr(data: &str, width: f64, height: f64) -> Result<RgbaImage, ElementError> {
        let code = QrCode::new(data.as_bytes()).map_err(|e| ElementError::Render {
            reason: format!("QR code: {}", e),
        })?;
        let modules = code.width() as u32;
        let colors = code.to_colors();

        let (w, h) = (pixel_extent(width), pixel_extent(height));
        let side = w.min(h);
        let total = modules + QR_QUIET_ZONE * 2;

        Ok(RgbaImage::from_fn(w, h, |x, y| {
            if x >= side || y >= side {
                return LIGHT;
            }
            let mx = (x * total / side).checked_sub(QR_QUIET_ZONE);
            let my = (y * total / side).checked_sub(QR_QUIET_ZONE);
            match (mx, my) {
                (Some(mx), Some(my)) if mx < modules && my < modules => {
                    if colors[(my * modules + mx) as usize] == qrcode::Color::Dark {
                        DARK
                    } else {
                        LIGHT
                    }
                }
                _ => LIGHT,
            }
        }))
    }

    fn render_bars(modules: &[bool], width: f64, height: f64) -> RgbaImage {
        let (w, h) = (pixel_extent(width), pixel_extent(height));
        let count = modules.len().max(1);
        RgbaImage::from_fn(w, h, |x, _| {
            let index = x as usize * count / w as usize;
            if modules.get(index).copied().unwrap_or(false) {
                DARK
            } else {
                LIGHT
            }
        })
    }
}

fn pixel_extent(value: f64) -> u32 {
    if value.is_finite() {
        value.round().clamp(1.0, MAX_RASTER_EXTENT) as u32
    } else {
        1
    }
}

fn base_bounds(base: &crate::model::ElementBase) -> Rect {
    Rect::new(base.location_x, base.location_y, base.width, base.height)
}

impl ElementFactory for RasterFactory {
    fn create_text_node(&self, id: SceneNodeId, text: &TextElement) -> NodeBuild {
        let mut bounds = base_bounds(text.base());
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            let (width, height) = Self::measure_text(text);
            bounds.width = width;
            bounds.height = height;
        }

        let visual = Visual::TextBlock {
            text: text.text.clone(),
            font_family: text.font_family.clone(),
            font_size: text.font_size,
            font_style: text.font_style,
            font_weight: text.font_weight,
            color: Color::parse_or_black(&text.color),
        };
        NodeBuild::ok(SceneNode::new(id, visual, bounds, 0))
    }

    fn create_image_node(&self, id: SceneNodeId, image: &ImageElement) -> NodeBuild {
        let mut bounds = base_bounds(image.base());
        let (raster, notice) = match Self::decode_image(&image.source) {
            Ok(raster) => (Some(raster), None),
            Err(e) => {
                tracing::warn!("Image [{}] could not be decoded: {}", image.base().id, e);
                (None, Some(e))
            }
        };

        if let Some(raster) = &raster {
            if bounds.width <= 0.0 || bounds.height <= 0.0 {
                bounds.width = raster.width() as f64;
                bounds.height = raster.height() as f64;
            }
        }

        let mut node = SceneNode::new(id, Visual::Bitmap { raster }, bounds, 0);
        node.opacity = image.opacity();
        NodeBuild { node, notice }
    }

    fn create_barcode_node(&self, id: SceneNodeId, barcode: &BarcodeElement) -> NodeBuild {
        let bounds = base_bounds(barcode.base());
        let rendered = barcode.symbology().and_then(|symbology| match &self.encoder {
            Some(encoder) => encoder
                .encode(symbology, &barcode.data)
                .map(|modules| Some(Self::render_bars(&modules, bounds.width, bounds.height))),
            None => {
                tracing::debug!("No linear encoder configured, {} left blank", symbology);
                Ok(None)
            }
        });

        let (raster, notice) = match rendered {
            Ok(raster) => (raster, None),
            Err(e) => {
                tracing::warn!("Barcode [{}]: {}", barcode.base().id, e);
                (None, Some(e))
            }
        };
        NodeBuild {
            node: SceneNode::new(id, Visual::Symbol { raster }, bounds, 0),
            notice,
        }
    }

    fn create_qr_node(&self, id: SceneNodeId, qr: &QrCodeElement) -> NodeBuild {
        let bounds = base_bounds(qr.base());
        let (raster, notice) = match Self::render_qr(&qr.data, bounds.width, bounds.height) {
            Ok(raster) => (Some(raster), None),
            Err(e) => {
                tracing::warn!("QR code [{}]: {}", qr.base().id, e);
                (None, Some(e))
            }
        };
        NodeBuild {
            node: SceneNode::new(id, Visual::Symbol { raster }, bounds, 0),
            notice,
        }
    }

    fn create_layout_node(&self, id: SceneNodeId, layout: &LayoutElement) -> NodeBuild {
        let bounds = Rect::new(0.0, 0.0, layout.base().width, layout.base().height);
        let visual = Visual::Border {
            corner_radius: layout.corner_radius,
        };
        NodeBuild::ok(SceneNode::new(id, visual, bounds, 0))
    }
}
