//! Document coordinator.
//!
//! [`LabelDesigner`] owns everything on the canvas: the view models keyed by
//! scene node, the paint-order list, the type-grouped tree projection, the id
//! allocator and the interaction controllers. All mutation goes through it.

mod elements;
mod file_io;
mod interaction;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use labelkit_core::{DesignerEvent, ElementError, EventBus, NoticeLevel, SceneNodeId};
use labelkit_settings::{DesignerSettings, LayoutPreset};

use crate::drag::DragController;
use crate::factory::{ElementFactory, RasterFactory};
use crate::groups::ElementGroups;
use crate::id_allocator::IdAllocator;
use crate::model::DocumentMetadata;
use crate::resize::ResizeController;
use crate::selection_manager::{AdornerLayer, OverlayHost, SelectionChanged, SelectionManager};
use crate::serialization::{JsonLayoutManager, LayoutManager};
use crate::view_model::ElementViewModel;

/// Asks the user which label size to create when a document has no layout yet.
pub trait LayoutPrompt {
    /// `None` cancels the add that needed the layout.
    fn choose_layout(&mut self, presets: &[LayoutPreset]) -> Option<LayoutPreset>;
}

/// Always picks the first preset.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPresetPrompt;

impl LayoutPrompt for FirstPresetPrompt {
    fn choose_layout(&mut self, presets: &[LayoutPreset]) -> Option<LayoutPreset> {
        presets.first().cloned()
    }
}

/// The label designer
pub struct LabelDesigner {
    settings: DesignerSettings,
    factory: Arc<dyn ElementFactory>,
    layout_manager: Box<dyn LayoutManager>,
    layout_prompt: Box<dyn LayoutPrompt>,
    overlay: Box<dyn OverlayHost>,
    events: Arc<EventBus>,

    selection: SelectionManager,
    drag: DragController,
    resize: ResizeController,
    ids: IdAllocator,

    elements: HashMap<SceneNodeId, ElementViewModel>,
    /// Canvas children in paint order
    canvas: Vec<SceneNodeId>,
    groups: ElementGroups,
    /// Selected view model as seen by the tree view and property panel
    selected: Option<SceneNodeId>,

    next_layer: i32,
    next_node_id: u64,

    pub metadata: DocumentMetadata,
    pub current_file_path: Option<PathBuf>,
    pub is_modified: bool,
}

impl LabelDesigner {
    /// Designer with the default factory, JSON persistence and an in-memory adorner layer.
    pub fn new(settings: DesignerSettings) -> Self {
        let handle_size = settings.interaction.handle_size;
        Self {
            settings,
            factory: Arc::new(RasterFactory::new()),
            layout_manager: Box::new(JsonLayoutManager),
            layout_prompt: Box::new(FirstPresetPrompt),
            overlay: Box::new(AdornerLayer::new()),
            events: Arc::new(EventBus::new()),
            selection: SelectionManager::new(handle_size),
            drag: DragController::new(),
            resize: ResizeController::new(handle_size),
            ids: IdAllocator::new(),
            elements: HashMap::new(),
            canvas: Vec::new(),
            groups: ElementGroups::new(),
            selected: None,
            next_layer: 1,
            next_node_id: 1,
            metadata: DocumentMetadata::default(),
            current_file_path: None,
            is_modified: false,
        }
    }

    pub fn with_factory(mut self, factory: Arc<dyn ElementFactory>) -> Self {
        self.factory = factory;
        self
    }

    pub fn with_layout_manager(mut self, manager: Box<dyn LayoutManager>) -> Self {
        self.layout_manager = manager;
        self
    }

    pub fn with_layout_prompt(mut self, prompt: Box<dyn LayoutPrompt>) -> Self {
        self.layout_prompt = prompt;
        self
    }

    pub fn with_overlay(mut self, overlay: Box<dyn OverlayHost>) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn with_event_bus(mut self, events: Arc<EventBus>) -> Self {
        self.events = events;
        self
    }

    pub fn settings(&self) -> &DesignerSettings {
        &self.settings
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn overlay(&self) -> &dyn OverlayHost {
        self.overlay.as_ref()
    }

    pub fn groups(&self) -> &ElementGroups {
        &self.groups
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn resize(&self) -> &ResizeController {
        &self.resize
    }

    /// Canvas children in paint order.
    pub fn canvas(&self) -> &[SceneNodeId] {
        &self.canvas
    }

    pub fn element_count(&self) -> usize {
        self.canvas.len()
    }

    pub fn view_model(&self, node: SceneNodeId) -> Option<&ElementViewModel> {
        self.elements.get(&node)
    }

    /// Direct property access for a property panel.
    ///
    /// Marks the document modified. Call [`LabelDesigner::refresh_highlight`]
    /// afterwards if the selected element's geometry changed.
    pub fn view_model_mut(&mut self, node: SceneNodeId) -> Option<&mut ElementViewModel> {
        let vm = self.elements.get_mut(&node)?;
        self.is_modified = true;
        Some(vm)
    }

    /// View models in paint order.
    pub fn view_models(&self) -> impl Iterator<Item = &ElementViewModel> {
        self.canvas.iter().filter_map(|node| self.elements.get(node))
    }

    pub fn selected(&self) -> Option<SceneNodeId> {
        self.selected
    }

    pub fn selected_view_model(&self) -> Option<&ElementViewModel> {
        self.selected.and_then(|node| self.elements.get(&node))
    }

    /// Single entry point for changing the selection.
    ///
    /// Canvas clicks and tree-view picks both land here. The selection
    /// manager's highlight and the selected view model are updated together,
    /// then observers are notified once. Unknown nodes clear the selection.
    pub fn select_element(&mut self, node: Option<SceneNodeId>) {
        let target = node.and_then(|n| self.elements.get(&n)).map(|vm| {
            (vm.node_id(), vm.node().bounds(), !vm.locked())
        });

        let change = match target {
            Some((node, bounds, resizable)) => {
                Some(
                    self.selection
                        .select(self.overlay.as_mut(), node, bounds, resizable),
                )
            }
            None => self.selection.clear_selection(self.overlay.as_mut()),
        };

        let Some(SelectionChanged(selected)) = change else {
            return;
        };
        // re-selecting the same node only refreshes its adorner
        let unchanged = selected.is_some() && selected == self.selected;
        self.selected = selected;
        if !unchanged {
            self.publish(DesignerEvent::SelectionChanged { node: selected });
        }
    }

    pub fn clear_selection(&mut self) {
        self.select_element(None);
    }

    /// Re-fit the highlight to the selected element's current bounds.
    pub fn refresh_highlight(&mut self) {
        if let Some(bounds) = self.selected_view_model().map(|vm| vm.node().bounds()) {
            self.selection
                .update_highlight_bounds(self.overlay.as_mut(), bounds);
        }
    }

    fn publish(&self, event: DesignerEvent) {
        tracing::trace!("{}", event.description());
        // nobody listening is fine
        let _ = self.events.publish(event);
    }

    fn publish_notice(&self, notice: &ElementError) {
        self.publish(DesignerEvent::Notice {
            level: NoticeLevel::Warning,
            message: notice.to_string(),
        });
    }

    fn allocate_node_id(&mut self) -> SceneNodeId {
        let id = SceneNodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }
}

impl std::fmt::Debug for LabelDesigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelDesigner")
            .field("elements", &self.canvas.len())
            .field("selected", &self.selected)
            .field("current_file_path", &self.current_file_path)
            .field("is_modified", &self.is_modified)
            .finish()
    }
}

impl Default for LabelDesigner {
    fn default() -> Self {
        Self::new(DesignerSettings::default())
    }
}
