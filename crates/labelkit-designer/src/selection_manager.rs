use labelkit_core::{Point, Rect, SceneNodeId};

use crate::resize::{hit_test_anchor, Anchor};

/// Highlight painted around the selected node.
///
/// An adorner is built fresh for every selection. Unlocked nodes get eight
/// resize anchors; locked nodes only get the outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Adorner {
    node: SceneNodeId,
    bounds: Rect,
    handle_size: f64,
    resizable: bool,
}

impl Adorner {
    pub fn new(node: SceneNodeId, bounds: Rect, handle_size: f64, resizable: bool) -> Self {
        Self {
            node,
            bounds,
            handle_size,
            resizable,
        }
    }

    pub fn node(&self) -> SceneNodeId {
        self.node
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    /// Anchor hit regions, empty for locked nodes.
    pub fn anchors(&self) -> Vec<(Anchor, Rect)> {
        if !self.resizable {
            return Vec::new();
        }
        Anchor::ALL
            .into_iter()
            .map(|anchor| (anchor, anchor.hit_rect(self.bounds, self.handle_size)))
            .collect()
    }

    /// Anchor under `p`, if any.
    ///
    /// The outline itself is not hit-testable; only anchor regions are.
    pub fn anchor_at(&self, p: Point) -> Option<Anchor> {
        if !self.resizable {
            return None;
        }
        hit_test_anchor(self.bounds, self.handle_size, p)
    }
}

/// Surface that can hold highlight overlays (an adorner layer)
pub trait OverlayHost {
    /// Add an adorner. Returns `false` when the host cannot accept overlays.
    fn attach(&mut self, adorner: Adorner) -> bool;

    /// Remove the adorner of `node`, if present.
    fn detach(&mut self, node: SceneNodeId);

    /// Move or resize the adorner of `node`.
    fn reposition(&mut self, node: SceneNodeId, bounds: Rect);

    /// Adorner currently shown for `node`.
    fn adorner(&self, node: SceneNodeId) -> Option<&Adorner>;

    /// Number of adorners shown.
    fn adorner_count(&self) -> usize;
}

/// In-memory adorner layer
#[derive(Debug, Clone)]
pub struct AdornerLayer {
    adorners: Vec<Adorner>,
    available: bool,
}

impl AdornerLayer {
    pub fn new() -> Self {
        Self {
            adorners: Vec::new(),
            available: true,
        }
    }

    /// A layer that refuses every overlay, as when the canvas has no adorner layer.
    pub fn unavailable() -> Self {
        Self {
            adorners: Vec::new(),
            available: false,
        }
    }

    pub fn adorners(&self) -> &[Adorner] {
        &self.adorners
    }
}

impl Default for AdornerLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayHost for AdornerLayer {
    fn attach(&mut self, adorner: Adorner) -> bool {
        if !self.available {
            return false;
        }
        self.adorners.retain(|a| a.node != adorner.node);
        self.adorners.push(adorner);
        true
    }

    fn detach(&mut self, node: SceneNodeId) {
        self.adorners.retain(|a| a.node != node);
    }

    fn reposition(&mut self, node: SceneNodeId, bounds: Rect) {
        if let Some(adorner) = self.adorners.iter_mut().find(|a| a.node == node) {
            adorner.bounds = bounds;
        }
    }

    fn adorner(&self, node: SceneNodeId) -> Option<&Adorner> {
        self.adorners.iter().find(|a| a.node == node)
    }

    fn adorner_count(&self) -> usize {
        self.adorners.len()
    }
}

/// Payload of a selection-changed notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChanged(pub Option<SceneNodeId>);

/// Tracks the single selected scene node and its highlight.
///
/// `SelectionManager` is responsible for:
/// - Recording which node, if any, is selected
/// - Attaching a fresh [`Adorner`] to the selected node and removing the old one
/// - Keeping the adorner on top of the node while it moves or resizes
///
/// # Notifications
///
/// Instead of invoking callbacks, `select` and `clear_selection` return the
/// [`SelectionChanged`] payload. The coordinator publishes it exactly once,
/// which keeps selection updates free of re-entrant notification loops.
#[derive(Debug, Clone)]
pub struct SelectionManager {
    selected: Option<SceneNodeId>,
    handle_size: f64,
}

impl SelectionManager {
    /// Creates a manager with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use labelkit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new(10.0);
    /// assert_eq!(manager.selected(), None);
    /// ```
    pub fn new(handle_size: f64) -> Self {
        Self {
            selected: None,
            handle_size,
        }
    }

    /// Returns the selected node.
    pub fn selected(&self) -> Option<SceneNodeId> {
        self.selected
    }

    pub fn handle_size(&self) -> f64 {
        self.handle_size
    }

    /// Selects `node`, replacing any previous highlight.
    ///
    /// # Arguments
    ///
    /// * `host` - Overlay surface receiving the adorner
    /// * `node` - The node to select
    /// * `bounds` - Current bounds of the node
    /// * `resizable` - Whether the adorner exposes resize anchors
    ///
    /// # Returns
    ///
    /// The notification to raise. If the host refuses the overlay, nothing is
    /// selected and the notification carries `None`.
    pub fn select(
        &mut self,
        host: &mut dyn OverlayHost,
        node: SceneNodeId,
        bounds: Rect,
        resizable: bool,
    ) -> SelectionChanged {
        if let Some(previous) = self.selected.take() {
            host.detach(previous);
        }

        let adorner = Adorner::new(node, bounds, self.handle_size, resizable);
        if !host.attach(adorner) {
            tracing::warn!("No overlay host available, {} left unselected", node);
            return SelectionChanged(None);
        }

        self.selected = Some(node);
        tracing::debug!("Selected {}", node);
        SelectionChanged(Some(node))
    }

    /// Clears the selection.
    ///
    /// # Returns
    ///
    /// `Some(SelectionChanged(None))` if something was selected, `None` otherwise.
    pub fn clear_selection(&mut self, host: &mut dyn OverlayHost) -> Option<SelectionChanged> {
        let previous = self.selected.take()?;
        host.detach(previous);
        tracing::debug!("Selection cleared ({} released)", previous);
        Some(SelectionChanged(None))
    }

    /// Moves the highlight to follow the selected node. No-op without a selection.
    pub fn update_highlight_position(&self, host: &mut dyn OverlayHost, x: f64, y: f64) {
        let Some(node) = self.selected else {
            return;
        };
        let Some(bounds) = host.adorner(node).map(|a| a.bounds().moved_to(x, y)) else {
            return;
        };
        host.reposition(node, bounds);
    }

    /// Re-fits the highlight after a resize. No-op without a selection.
    pub fn update_highlight_bounds(&self, host: &mut dyn OverlayHost, bounds: Rect) {
        if let Some(node) = self.selected {
            host.reposition(node, bounds);
        }
    }
}
