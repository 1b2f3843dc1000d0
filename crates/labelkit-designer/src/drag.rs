//! Drag controller: Idle -> Dragging -> Idle.
//!
//! The controller only tracks gesture state and produces deltas. Writing the
//! new position through the owning view model is the coordinator's job, so the
//! element model stays the single source of truth.

use labelkit_core::{Point, SceneNodeId};

use crate::pointer::PointerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { node: SceneNodeId, last: Point },
}

/// Position offset produced by one pointer move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    pub node: SceneNodeId,
    pub dx: f64,
    pub dy: f64,
}

/// What the drag controller needs to know about the node under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragCandidate {
    pub node: SceneNodeId,
    pub locked: bool,
    /// Whether the node has a canvas parent
    pub attached: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn dragged_node(&self) -> Option<SceneNodeId> {
        match self.state {
            DragState::Dragging { node, .. } => Some(node),
            DragState::Idle => None,
        }
    }

    /// Try to start dragging `candidate`.
    ///
    /// Refused when the event was already consumed, the element is locked,
    /// or the node is not on a canvas. On success the event is consumed.
    pub fn begin(&mut self, event: &mut PointerEvent, candidate: DragCandidate) -> bool {
        if event.handled || candidate.locked {
            return false;
        }
        if !candidate.attached {
            tracing::debug!("Drag on {} ignored, node has no canvas", candidate.node);
            return false;
        }

        self.state = DragState::Dragging {
            node: candidate.node,
            last: event.position,
        };
        event.handled = true;
        tracing::debug!("Drag started on {}", candidate.node);
        true
    }

    /// Offset since the previous move. Skipped for consumed events.
    pub fn update(&mut self, event: &PointerEvent) -> Option<DragStep> {
        if event.handled {
            return None;
        }
        let DragState::Dragging { node, last } = &mut self.state else {
            return None;
        };

        let (dx, dy) = event.position.delta_from(*last);
        *last = event.position;
        Some(DragStep { node: *node, dx, dy })
    }

    /// Finish the gesture, returning the node that was being dragged.
    pub fn end(&mut self) -> Option<SceneNodeId> {
        let node = self.dragged_node();
        if let Some(node) = node {
            tracing::debug!("Drag finished on {}", node);
        }
        self.state = DragState::Idle;
        node
    }
}
