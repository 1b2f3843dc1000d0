//! Pointer events as delivered by the host event loop.

use labelkit_core::{Point, SceneNodeId};

use crate::resize::Anchor;

/// One pointer-down/move/up notification.
///
/// `handled` is the consumption flag shared by all handlers that see the
/// event: the resize controller sets it so the drag controller skips the event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub handled: bool,
}

impl PointerEvent {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            handled: false,
        }
    }
}

/// What lies under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerTarget {
    /// Bare canvas
    Canvas,
    /// An element's scene node
    Node(SceneNodeId),
    /// A resize anchor of the selected node
    Anchor(SceneNodeId, Anchor),
}

/// Arrow-key directions for nudging the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

impl ArrowKey {
    /// Unit direction on the canvas (y grows downwards).
    pub fn direction(&self) -> (f64, f64) {
        match self {
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
        }
    }
}
