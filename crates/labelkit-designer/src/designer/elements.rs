//! Adding, removing, selecting and nudging elements.

use std::path::Path;

use labelkit_core::{
    DesignerEvent, DocumentError, ElementError, ElementKind, Result, SceneNodeId,
};
use labelkit_settings::LayoutPreset;

use super::LabelDesigner;
use crate::model::{
    BarcodeElement, ImageElement, ImageSource, LabelElement, LayoutElement, QrCodeElement,
    Symbology, TextElement,
};
use crate::pointer::ArrowKey;
use crate::view_model::ElementViewModel;

impl LabelDesigner {
    /// Scene node of the layout, if the document has one.
    pub fn layout_node(&self) -> Option<SceneNodeId> {
        self.groups.group(ElementKind::Layout).items.first().copied()
    }

    /// Make sure a layout exists, asking the layout prompt for one if needed.
    pub fn ensure_layout_exists(&mut self) -> Result<SceneNodeId> {
        if let Some(node) = self.layout_node() {
            return Ok(node);
        }
        let preset = self
            .layout_prompt
            .choose_layout(&self.settings.layout.presets)
            .ok_or(DocumentError::LayoutRequired)?;
        self.add_layout(&preset)
    }

    /// Create the label layout from a preset. Refused if one already exists.
    pub fn add_layout(&mut self, preset: &LayoutPreset) -> Result<SceneNodeId> {
        let layout = LayoutElement::new(
            preset.width,
            preset.height,
            self.settings.layout.corner_radius,
        );
        if self.metadata.template_name.is_empty() {
            self.metadata.template_name = preset.name.clone();
        }
        tracing::info!(
            "Creating layout '{}' ({}x{})",
            preset.name,
            preset.width,
            preset.height
        );
        self.add_element(layout.into())
    }

    /// Place a new element on the canvas.
    ///
    /// The element gets the next id for its kind and the next z-order layer;
    /// layouts always sit on layer 0. Non-layout elements need a layout first,
    /// which is created through the layout prompt when missing. Elements with
    /// no size yet take the size of their rendered node.
    pub fn add_element(&mut self, element: LabelElement) -> Result<SceneNodeId> {
        let kind = element.kind();
        let layer = if kind == ElementKind::Layout {
            if self.layout_node().is_some() {
                return Err(DocumentError::LayoutExists.into());
            }
            0
        } else {
            self.ensure_layout_exists()?;
            let layer = self.next_layer;
            self.next_layer += 1;
            layer
        };

        let id = self.ids.next(kind);
        let node = self.insert_element(element.with_id(id).with_layer(layer));
        self.is_modified = true;
        Ok(node)
    }

    /// Build the view model for `model` and register it everywhere.
    pub(super) fn insert_element(&mut self, mut model: LabelElement) -> SceneNodeId {
        let node_id = self.allocate_node_id();
        let build = self.factory.create_scene_node(node_id, &model);
        let mut node = build.node;

        if model.width() <= 0.0 || model.height() <= 0.0 {
            model.set_width(node.width);
            model.set_height(node.height);
        }
        node.attach();

        if let Some(notice) = &build.notice {
            self.publish_notice(notice);
        }

        let (kind, id, layer) = (model.kind(), model.id(), model.layer());
        let bounds = (
            self.settings.text.min_font_size,
            self.settings.text.max_font_size,
        );
        let vm = ElementViewModel::new(model, node, self.factory.clone(), bounds);

        let position = self.canvas.partition_point(|n| {
            self.elements
                .get(n)
                .is_some_and(|existing| existing.layer() <= layer)
        });
        self.canvas.insert(position, node_id);
        self.groups.insert(kind, node_id);
        self.elements.insert(node_id, vm);

        tracing::debug!("Added {} [{}] on layer {} as {}", kind, id, layer, node_id);
        self.publish(DesignerEvent::ElementAdded {
            node: node_id,
            kind,
            id,
        });
        node_id
    }

    /// Add a text element with the configured defaults and select it.
    pub fn add_text(&mut self) -> Result<SceneNodeId> {
        let defaults = &self.settings.text;
        let at = self.settings.placement.text;
        let mut text = TextElement::new(
            defaults.content.clone(),
            defaults.font_family.clone(),
            defaults.font_size,
        );
        text.color = defaults.color.clone();

        let node = self.add_element(LabelElement::from(text).with_location(at.x, at.y))?;
        self.select_element(Some(node));
        Ok(node)
    }

    /// Add an image read from `path`. The bytes are embedded in the document
    /// and the file stem becomes the title.
    pub fn add_image_from_path(&mut self, path: impl AsRef<Path>) -> Result<SceneNodeId> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(DocumentError::Io)?;
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.add_image_bytes(bytes, title)
    }

    /// Add an image from encoded bytes and select it.
    ///
    /// Bytes that are not a decodable image are refused before anything is
    /// placed on the canvas.
    pub fn add_image_bytes(
        &mut self,
        bytes: Vec<u8>,
        title: impl Into<String>,
    ) -> Result<SceneNodeId> {
        let (width, height) = image_dimensions(&bytes)?;
        tracing::debug!("Adding {}x{} image", width, height);
        let at = self.settings.placement.image;
        let image = ImageElement::new(ImageSource::Embedded(bytes), title);
        let node = self.add_element(LabelElement::from(image).with_location(at.x, at.y))?;
        self.select_element(Some(node));
        Ok(node)
    }

    /// Add a linear barcode with the default data for its symbology and select it.
    pub fn add_barcode(&mut self, symbology: Symbology) -> Result<SceneNodeId> {
        let defaults = &self.settings.barcode;
        let data = match symbology {
            Symbology::Ean13 => defaults.ean_data.clone(),
            Symbology::Code39 => defaults.code39_data.clone(),
        };
        let (width, height) = (defaults.barcode_width, defaults.barcode_height);
        let at = self.settings.placement.barcode;

        let barcode = LabelElement::from(BarcodeElement::new(data, symbology))
            .with_location(at.x, at.y)
            .with_size(width, height);
        let node = self.add_element(barcode)?;
        self.select_element(Some(node));
        Ok(node)
    }

    /// Add a QR code with the default payload and select it.
    pub fn add_qr_code(&mut self) -> Result<SceneNodeId> {
        let data = self.settings.barcode.qr_data.clone();
        let size = self.settings.barcode.qr_size;
        let at = self.settings.placement.qr_code;

        let qr = LabelElement::from(QrCodeElement::new(data))
            .with_location(at.x, at.y)
            .with_size(size, size);
        let node = self.add_element(qr)?;
        self.select_element(Some(node));
        Ok(node)
    }

    /// Remove the selected element. No-op without a selection.
    pub fn delete_selected(&mut self) -> Option<LabelElement> {
        let node = self.selected?;
        self.remove_element(node)
    }

    /// Remove `node` from the canvas, the node map and its group.
    pub fn remove_element(&mut self, node: SceneNodeId) -> Option<LabelElement> {
        let vm = self.elements.remove(&node)?;
        self.canvas.retain(|n| *n != node);
        self.groups.remove(vm.kind(), node);

        if self.drag.dragged_node() == Some(node) {
            self.drag.end();
        }
        if self.resize.resized_node() == Some(node) {
            self.resize.end();
        }
        if self.selected == Some(node) || self.selection.selected() == Some(node) {
            self.clear_selection();
        }

        let (model, mut scene_node) = vm.into_parts();
        scene_node.detach();
        self.is_modified = true;

        tracing::debug!("Removed {} [{}] ({})", model.kind(), model.id(), node);
        self.publish(DesignerEvent::ElementRemoved {
            node,
            kind: model.kind(),
            id: model.id(),
        });
        Some(model)
    }

    /// Lock or unlock `node`. Returns whether the node exists.
    ///
    /// A selected node gets a fresh adorner so its resize anchors match the
    /// new lock state, and any gesture running on it is ended.
    pub fn set_locked(&mut self, node: SceneNodeId, locked: bool) -> bool {
        let Some(vm) = self.elements.get_mut(&node) else {
            return false;
        };
        if vm.locked() == locked {
            return true;
        }
        vm.set_locked(locked);
        self.is_modified = true;
        tracing::debug!("{} {}", if locked { "Locked" } else { "Unlocked" }, node);

        if locked && self.drag.dragged_node() == Some(node) {
            self.drag.end();
        }
        if locked && self.resize.resized_node() == Some(node) {
            self.resize.end();
        }
        if self.selected == Some(node) {
            self.select_element(Some(node));
        }
        true
    }

    /// Select the element with element id `id` of `kind`, as the tree view does.
    ///
    /// Returns whether such an element exists.
    pub fn select_by_id(&mut self, kind: ElementKind, id: u32) -> bool {
        let node = self
            .groups
            .group(kind)
            .items
            .iter()
            .copied()
            .find(|n| self.elements.get(n).is_some_and(|vm| vm.id() == id));
        if node.is_some() {
            self.select_element(node);
        }
        node.is_some()
    }

    /// Move the selected, unlocked element one nudge step. Returns whether it moved.
    pub fn nudge_selected(&mut self, key: ArrowKey) -> bool {
        let Some(node) = self.selected else {
            return false;
        };
        let step = self.settings.interaction.nudge_step;
        let (dx, dy) = key.direction();

        let Some(vm) = self.elements.get_mut(&node) else {
            return false;
        };
        if vm.locked() {
            return false;
        }
        vm.set_location(vm.location_x() + dx * step, vm.location_y() + dy * step);
        let (x, y) = (vm.location_x(), vm.location_y());

        self.selection
            .update_highlight_position(self.overlay.as_mut(), x, y);
        self.is_modified = true;
        self.publish(DesignerEvent::ElementMoved { node, x, y });
        true
    }
}

fn image_dimensions(bytes: &[u8]) -> std::result::Result<(u32, u32), ElementError> {
    let unreadable = |reason: String| ElementError::UnreadableImage { reason };
    image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| unreadable(e.to_string()))?
        .into_dimensions()
        .map_err(|e| unreadable(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::designer::LayoutPrompt;
    use labelkit_settings::DesignerSettings;

    struct CancelPrompt;

    impl LayoutPrompt for CancelPrompt {
        fn choose_layout(&mut self, _: &[LayoutPreset]) -> Option<LayoutPreset> {
            None
        }
    }

    #[test]
    fn test_first_add_creates_layout() {
        let mut designer = LabelDesigner::default();
        let text = designer.add_text().unwrap();

        let layout = designer.layout_node().expect("layout created");
        let layout_vm = designer.view_model(layout).unwrap();
        assert_eq!(layout_vm.layer(), 0);
        assert!(layout_vm.locked());
        assert_eq!((layout_vm.width(), layout_vm.height()), (300.0, 350.0));
        assert_eq!(designer.metadata.template_name, "SILVER LABEL 110×75");

        assert_eq!(designer.view_model(text).unwrap().layer(), 1);
        assert_eq!(designer.canvas(), &[layout, text]);
    }

    #[test]
    fn test_cancelled_layout_prompt_refuses_add() {
        let mut designer = LabelDesigner::new(DesignerSettings::default())
            .with_layout_prompt(Box::new(CancelPrompt));
        let err = designer.add_qr_code().unwrap_err();
        assert!(matches!(
            err,
            labelkit_core::Error::Document(DocumentError::LayoutRequired)
        ));
        assert_eq!(designer.element_count(), 0);
    }

    #[test]
    fn test_second_layout_refused() {
        let mut designer = LabelDesigner::default();
        designer.ensure_layout_exists().unwrap();
        let preset = designer.settings().layout.presets[1].clone();
        assert!(matches!(
            designer.add_layout(&preset),
            Err(labelkit_core::Error::Document(DocumentError::LayoutExists))
        ));
        assert_eq!(designer.groups().group(ElementKind::Layout).items.len(), 1);
    }

    #[test]
    fn test_defaults_per_kind() {
        let mut designer = LabelDesigner::default();
        let qr = designer.add_qr_code().unwrap();
        let ean = designer.add_barcode(Symbology::Ean13).unwrap();
        let code39 = designer.add_barcode(Symbology::Code39).unwrap();

        let qr = designer.view_model(qr).unwrap();
        assert_eq!((qr.location_x(), qr.location_y()), (120.0, 120.0));
        assert_eq!(qr.display_name(), "[1] QR: HelloWorld");

        assert_eq!(
            designer.view_model(ean).unwrap().display_name(),
            "[1] Barcode (EAN): 1234567890128"
        );
        assert_eq!(
            designer.view_model(code39).unwrap().display_name(),
            "[2] Barcode (Code39): HELLOCODE39"
        );
    }

    #[test]
    fn test_add_selects_new_element() {
        let mut designer = LabelDesigner::default();
        let first = designer.add_text().unwrap();
        assert_eq!(designer.selected(), Some(first));

        let second = designer.add_text().unwrap();
        assert_eq!(designer.selected(), Some(second));
        assert_eq!(designer.overlay().adorner_count(), 1);
        assert_eq!(designer.view_model(second).unwrap().id(), 2);
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let mut designer = LabelDesigner::default();
        designer.add_text().unwrap();
        designer.clear_selection();
        assert!(designer.delete_selected().is_none());
        assert_eq!(designer.element_count(), 2);
    }

    #[test]
    fn test_select_by_id() {
        let mut designer = LabelDesigner::default();
        let first = designer.add_text().unwrap();
        designer.add_text().unwrap();

        assert!(designer.select_by_id(ElementKind::Text, 1));
        assert_eq!(designer.selected(), Some(first));
        assert!(!designer.select_by_id(ElementKind::Image, 1));
        assert_eq!(designer.selected(), Some(first));
    }

    #[test]
    fn test_nudge_moves_selection_and_highlight() {
        let mut designer = LabelDesigner::default();
        let node = designer.add_text().unwrap();

        assert!(designer.nudge_selected(ArrowKey::Right));
        assert!(designer.nudge_selected(ArrowKey::Up));

        let vm = designer.view_model(node).unwrap();
        assert_eq!((vm.location_x(), vm.location_y()), (51.0, 49.0));
        let adorner = designer.overlay().adorner(node).unwrap();
        assert_eq!((adorner.bounds().left, adorner.bounds().top), (51.0, 49.0));
    }

    #[test]
    fn test_lock_toggle_rebuilds_adorner() {
        let mut designer = LabelDesigner::default();
        let node = designer.add_qr_code().unwrap();
        assert_eq!(designer.overlay().adorner(node).unwrap().anchors().len(), 8);

        assert!(designer.set_locked(node, true));
        assert!(designer.view_model(node).unwrap().locked());
        assert_eq!(designer.selected(), Some(node));
        assert!(designer.overlay().adorner(node).unwrap().anchors().is_empty());

        assert!(designer.set_locked(node, false));
        assert_eq!(designer.overlay().adorner(node).unwrap().anchors().len(), 8);
        assert_eq!(designer.overlay().adorner_count(), 1);
    }

    #[test]
    fn test_lock_unselected_leaves_selection_alone() {
        let mut designer = LabelDesigner::default();
        let first = designer.add_text().unwrap();
        let second = designer.add_qr_code().unwrap();

        assert!(designer.set_locked(first, true));
        assert_eq!(designer.selected(), Some(second));
        assert!(designer.overlay().adorner(first).is_none());
        assert!(!designer.set_locked(SceneNodeId(9999), true));
    }

    #[test]
    fn test_add_image_bytes() {
        let img = image::RgbaImage::from_pixel(12, 7, image::Rgba([0, 0, 0, 255]));
        let mut png = std::io::Cursor::new(Vec::new());
        img.write_to(&mut png, image::ImageFormat::Png).unwrap();

        let mut designer = LabelDesigner::default();
        let node = designer.add_image_bytes(png.into_inner(), "logo").unwrap();
        let vm = designer.view_model(node).unwrap();
        assert_eq!((vm.width(), vm.height()), (12.0, 7.0));
        assert_eq!(designer.selected(), Some(node));
    }

    #[test]
    fn test_unreadable_image_is_refused() {
        let mut designer = LabelDesigner::default();
        designer.ensure_layout_exists().unwrap();

        let err = designer
            .add_image_bytes(b"not an image".to_vec(), "junk")
            .unwrap_err();
        assert!(matches!(
            err,
            labelkit_core::Error::Element(ElementError::UnreadableImage { .. })
        ));
        assert_eq!(designer.element_count(), 1);
        assert!(designer.groups().group(ElementKind::Image).items.is_empty());
        assert_eq!(designer.selected(), None);
    }

    #[test]
    fn test_nudge_ignores_locked_layout() {
        let mut designer = LabelDesigner::default();
        let layout = designer.ensure_layout_exists().unwrap();
        designer.select_element(Some(layout));
        assert!(!designer.nudge_selected(ArrowKey::Left));
    }
}
