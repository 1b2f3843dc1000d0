//! File I/O operations (save, load, new) for the label designer.

use std::path::Path;

use labelkit_core::{DesignerEvent, ElementKind};

use super::LabelDesigner;
use crate::model::{DocumentMetadata, LabelElement};
use crate::serialization::LabelDocumentFile;

impl LabelDesigner {
    /// Snapshot of the current document, elements in paint order.
    pub fn document(&self) -> LabelDocumentFile {
        let elements = self.view_models().map(|vm| vm.model().clone()).collect();
        LabelDocumentFile::new(self.metadata.clone(), elements)
    }

    /// Save the document through the layout manager.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let mut document = self.document();
        document.metadata.touch();
        self.layout_manager.save(&document, path)?;

        self.metadata = document.metadata;
        self.current_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        tracing::info!(
            "Saved {} elements to {}",
            document.elements.len(),
            path.display()
        );
        self.publish(DesignerEvent::DocumentSaved {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    /// Load a document, replacing everything on the canvas.
    ///
    /// If the file cannot be read or is invalid, the current canvas is left
    /// untouched and the error is returned.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<usize> {
        let path = path.as_ref();
        let document = self.layout_manager.load(path)?;
        let count = self.load_document(document)?;

        self.current_file_path = Some(path.to_path_buf());
        tracing::info!("Loaded {} elements from {}", count, path.display());
        self.publish(DesignerEvent::DocumentLoaded {
            path: Some(path.to_path_buf()),
            element_count: count,
        });
        Ok(count)
    }

    /// Rebuild the canvas from an in-memory document.
    ///
    /// Every view model and scene node is recreated, ordered by ascending
    /// layer, and the id allocator is reseeded from the ids found.
    pub fn load_document(
        &mut self,
        mut document: LabelDocumentFile,
    ) -> labelkit_core::Result<usize> {
        document.validate()?;

        self.teardown();

        let mut elements: Vec<LabelElement> = document.elements;
        elements.sort_by_key(|e| e.layer());

        self.ids.reseed(elements.iter().map(|e| (e.kind(), e.id())));
        self.next_layer = elements
            .iter()
            .filter(|e| e.kind() != ElementKind::Layout)
            .map(|e| e.layer() + 1)
            .max()
            .unwrap_or(1)
            .max(1);

        let count = elements.len();
        for element in elements {
            self.insert_element(element);
        }

        self.metadata = document.metadata;
        self.current_file_path = None;
        self.is_modified = false;
        Ok(count)
    }

    /// Start an empty document.
    pub fn new_document(&mut self) {
        self.teardown();
        self.ids.reset();
        self.next_layer = 1;
        self.metadata = DocumentMetadata::default();
        self.current_file_path = None;
        self.is_modified = false;

        tracing::info!("New label document");
        self.publish(DesignerEvent::DocumentCleared);
    }

    /// Mark the document as modified
    pub fn mark_modified(&mut self) {
        self.is_modified = true;
    }

    /// File stem of the current file, or "Document", with `*` when modified.
    pub fn display_name(&self) -> String {
        let name = self
            .current_file_path
            .as_ref()
            .and_then(|p| p.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Document".to_string());

        if self.is_modified {
            format!("{}*", name)
        } else {
            name
        }
    }

    /// Drop every node, view model and group entry, ending any gesture.
    fn teardown(&mut self) {
        self.drag.end();
        self.resize.end();
        self.clear_selection();
        self.selected = None;

        for node in self.canvas.drain(..) {
            if let Some(vm) = self.elements.remove(&node) {
                let (_, mut scene_node) = vm.into_parts();
                scene_node.detach();
            }
        }
        self.elements.clear();
        self.groups.clear();
    }
}
