//! Element view model: one element model paired with its scene node.
//!
//! Every setter writes the model and the node in the same call so the model
//! stays authoritative and the visual never drifts from it. Setters that can
//! reject input return `Err` and leave both sides untouched.

use std::sync::Arc;

use labelkit_core::{ElementError, ElementKind, Rect, SceneNodeId};

use crate::factory::ElementFactory;
use crate::model::{Color, FontStyle, FontWeight, LabelElement, Symbology};
use crate::scene::SceneNode;

/// Binds one [`LabelElement`] to one [`SceneNode`]
pub struct ElementViewModel {
    model: LabelElement,
    node: SceneNode,
    factory: Arc<dyn ElementFactory>,
    font_size_bounds: (f64, f64),
    /// Display-only name of the text color, refreshed by `set_color`
    color_name: Option<String>,
}

impl std::fmt::Debug for ElementViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementViewModel")
            .field("model", &self.model)
            .field("node", &self.node.id())
            .field("color_name", &self.color_name)
            .finish()
    }
}

impl ElementViewModel {
    pub fn new(
        model: LabelElement,
        node: SceneNode,
        factory: Arc<dyn ElementFactory>,
        font_size_bounds: (f64, f64),
    ) -> Self {
        let color_name = match &model {
            LabelElement::Text(text) => Some(Color::parse_or_black(&text.color).to_string()),
            _ => None,
        };
        Self {
            model,
            node,
            factory,
            font_size_bounds,
            color_name,
        }
    }

    pub fn model(&self) -> &LabelElement {
        &self.model
    }

    pub fn node(&self) -> &SceneNode {
        &self.node
    }

    pub(crate) fn node_mut(&mut self) -> &mut SceneNode {
        &mut self.node
    }

    pub fn node_id(&self) -> SceneNodeId {
        self.node.id()
    }

    pub fn kind(&self) -> ElementKind {
        self.model.kind()
    }

    pub fn id(&self) -> u32 {
        self.model.id()
    }

    pub fn layer(&self) -> i32 {
        self.model.layer()
    }

    pub fn locked(&self) -> bool {
        self.model.locked()
    }

    /// Callers outside the crate go through `LabelDesigner::set_locked`,
    /// which keeps the selection adorner in step.
    pub(crate) fn set_locked(&mut self, locked: bool) {
        self.model.set_locked(locked);
    }

    pub fn location_x(&self) -> f64 {
        self.model.location_x()
    }

    pub fn location_y(&self) -> f64 {
        self.model.location_y()
    }

    pub fn width(&self) -> f64 {
        self.model.width()
    }

    pub fn height(&self) -> f64 {
        self.model.height()
    }

    pub fn bounds(&self) -> Rect {
        self.model.bounds()
    }

    pub fn set_location_x(&mut self, x: f64) {
        self.model.set_location_x(x);
        self.node.left = self.model.location_x();
    }

    pub fn set_location_y(&mut self, y: f64) {
        self.model.set_location_y(y);
        self.node.top = self.model.location_y();
    }

    pub fn set_location(&mut self, x: f64, y: f64) {
        self.set_location_x(x);
        self.set_location_y(y);
    }

    /// Size change; barcode and QR symbols are re-rendered at the new size.
    ///
    /// Layouts refuse non-positive dimensions.
    pub fn set_size(
        &mut self,
        width: f64,
        height: f64,
    ) -> Result<Option<ElementError>, ElementError> {
        if self.model.is_layout() {
            if width <= 0.0 {
                return Err(ElementError::NonPositiveDimension {
                    field: "width".to_string(),
                    value: width,
                });
            }
            if height <= 0.0 {
                return Err(ElementError::NonPositiveDimension {
                    field: "height".to_string(),
                    value: height,
                });
            }
        }

        self.model.set_width(width);
        self.model.set_height(height);
        self.node.width = self.model.width();
        self.node.height = self.model.height();

        match self.model.kind() {
            ElementKind::Barcode | ElementKind::QrCode => Ok(self.refresh_visual()),
            _ => Ok(None),
        }
    }

    pub fn set_width(&mut self, width: f64) -> Result<Option<ElementError>, ElementError> {
        self.set_size(width, self.model.height())
    }

    pub fn set_height(&mut self, height: f64) -> Result<Option<ElementError>, ElementError> {
        self.set_size(self.model.width(), height)
    }

    /// Position and size in one step, as a resize gesture produces.
    pub fn set_bounds(&mut self, bounds: Rect) -> Option<ElementError> {
        self.set_location(bounds.left, bounds.top);
        match self.set_size(bounds.width, bounds.height) {
            Ok(notice) => notice,
            Err(e) => Some(e),
        }
    }

    /// Rebuild the node's visual from the model, keeping node geometry and attachment.
    pub fn refresh_visual(&mut self) -> Option<ElementError> {
        let build = self.factory.create_scene_node(self.node.id(), &self.model);
        self.node.visual = build.node.visual;
        self.node.opacity = build.node.opacity;
        build.notice
    }

    fn wrong_kind(&self, expected: ElementKind) -> ElementError {
        ElementError::WrongKind {
            expected: expected.to_string(),
            actual: self.model.kind().to_string(),
        }
    }

    pub fn set_text(&mut self, value: impl Into<String>) -> Result<(), ElementError> {
        match &mut self.model {
            LabelElement::Text(text) => text.text = value.into(),
            _ => return Err(self.wrong_kind(ElementKind::Text)),
        }
        self.refresh_visual();
        Ok(())
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) -> Result<(), ElementError> {
        match &mut self.model {
            LabelElement::Text(text) => text.font_family = family.into(),
            _ => return Err(self.wrong_kind(ElementKind::Text)),
        }
        self.refresh_visual();
        Ok(())
    }

    /// Sizes outside the configured bounds are rejected and the old size kept.
    pub fn set_font_size(&mut self, size: f64) -> Result<(), ElementError> {
        let (min, max) = self.font_size_bounds;
        let LabelElement::Text(text) = &mut self.model else {
            return Err(self.wrong_kind(ElementKind::Text));
        };
        if !(min..=max).contains(&size) {
            tracing::warn!(
                "Font size {} rejected for text [{}], keeping {}",
                size,
                text.base().id,
                text.font_size
            );
            return Err(ElementError::FontSizeOutOfRange { size, min, max });
        }
        text.font_size = size;
        self.refresh_visual();
        Ok(())
    }

    pub fn set_font_style(&mut self, style: FontStyle) -> Result<(), ElementError> {
        match &mut self.model {
            LabelElement::Text(text) => text.font_style = style,
            _ => return Err(self.wrong_kind(ElementKind::Text)),
        }
        self.refresh_visual();
        Ok(())
    }

    pub fn set_font_weight(&mut self, weight: FontWeight) -> Result<(), ElementError> {
        match &mut self.model {
            LabelElement::Text(text) => text.font_weight = weight,
            _ => return Err(self.wrong_kind(ElementKind::Text)),
        }
        self.refresh_visual();
        Ok(())
    }

    /// Unrecognised colors fall back to black.
    pub fn set_color(&mut self, value: &str) -> Result<(), ElementError> {
        let LabelElement::Text(text) = &mut self.model else {
            return Err(self.wrong_kind(ElementKind::Text));
        };
        let color = Color::parse_or_black(value);
        text.color = match color.name() {
            Some(name) => name.to_string(),
            None => color.to_hex(),
        };
        self.color_name = Some(color.to_string());
        self.refresh_visual();
        Ok(())
    }

    /// Name of the current text color for display, if this is a text element.
    pub fn color_name(&self) -> Option<&str> {
        self.color_name.as_deref()
    }

    pub fn set_opacity(&mut self, opacity: f64) -> Result<(), ElementError> {
        let LabelElement::Image(image) = &mut self.model else {
            return Err(self.wrong_kind(ElementKind::Image));
        };
        image.set_opacity(opacity)?;
        self.node.opacity = opacity;
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ElementError> {
        match &mut self.model {
            LabelElement::Image(image) => image.title = title.into(),
            _ => return Err(self.wrong_kind(ElementKind::Image)),
        }
        Ok(())
    }

    /// New payload for a barcode or QR code; the symbol is re-rendered.
    pub fn set_data(
        &mut self,
        data: impl Into<String>,
    ) -> Result<Option<ElementError>, ElementError> {
        match &mut self.model {
            LabelElement::Barcode(barcode) => barcode.data = data.into(),
            LabelElement::QrCode(qr) => qr.data = data.into(),
            _ => return Err(self.wrong_kind(ElementKind::Barcode)),
        }
        Ok(self.refresh_visual())
    }

    pub fn set_symbology(
        &mut self,
        symbology: Symbology,
    ) -> Result<Option<ElementError>, ElementError> {
        match &mut self.model {
            LabelElement::Barcode(barcode) => barcode.barcode_type = symbology.tag().to_string(),
            _ => return Err(self.wrong_kind(ElementKind::Barcode)),
        }
        Ok(self.refresh_visual())
    }

    pub fn set_corner_radius(&mut self, radius: f64) -> Result<(), ElementError> {
        match &mut self.model {
            LabelElement::Layout(layout) => layout.corner_radius = radius.max(0.0),
            _ => return Err(self.wrong_kind(ElementKind::Layout)),
        }
        self.refresh_visual();
        Ok(())
    }

    /// Label shown in the tree view
    pub fn display_name(&self) -> String {
        let id = self.model.id();
        match &self.model {
            LabelElement::Layout(_) => "Label".to_string(),
            LabelElement::Text(text) => format!("[{}] Text: {}", id, text.text),
            LabelElement::Image(image) => format!("[{}] Image: {}", id, image.title),
            LabelElement::Barcode(barcode) => {
                format!("[{}] Barcode ({}): {}", id, barcode.barcode_type, barcode.data)
            }
            LabelElement::QrCode(qr) => format!("[{}] QR: {}", id, qr.data),
        }
    }

    pub fn into_parts(self) -> (LabelElement, SceneNode) {
        (self.model, self.node)
    }
}
