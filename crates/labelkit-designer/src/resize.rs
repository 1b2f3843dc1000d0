//! Resize controller.
//!
//! The selected node exposes eight square anchors, one per corner and edge
//! midpoint. Dragging an anchor applies the pointer offset, measured from the
//! pointer position at press time, to the node's bounds captured at press time.
//!
//! # Anchor transforms
//!
//! | Anchor       | left | top | width | height |
//! |--------------|------|-----|-------|--------|
//! | TopLeft      | +dx  | +dy | -dx   | -dy    |
//! | TopCenter    |      | +dy |       | -dy    |
//! | TopRight     |      | +dy | +dx   | -dy    |
//! | MiddleLeft   | +dx  |     | -dx   |        |
//! | MiddleRight  |      |     | +dx   |        |
//! | BottomLeft   | +dx  |     | -dx   | +dy    |
//! | BottomCenter |      |     |       | +dy    |
//! | BottomRight  |      |     | +dx   | +dy    |
//!
//! Width and height never drop below the floor (the anchor size). When an
//! anchor on the left or top edge hits the floor, the opposite edge stays put.

use labelkit_core::{Point, Rect, SceneNodeId};

use crate::pointer::PointerEvent;

/// One of the eight resize anchors, in hit-test order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 8] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::MiddleLeft,
        Anchor::MiddleRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    /// Point on `bounds` the anchor is centred on.
    pub fn position(&self, bounds: Rect) -> Point {
        let x = match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => bounds.left,
            Self::TopCenter | Self::BottomCenter => bounds.center_x(),
            Self::TopRight | Self::MiddleRight | Self::BottomRight => bounds.right(),
        };
        let y = match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => bounds.top,
            Self::MiddleLeft | Self::MiddleRight => bounds.center_y(),
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => bounds.bottom(),
        };
        Point::new(x, y)
    }

    /// Hit region of side `size` around the anchor point.
    pub fn hit_rect(&self, bounds: Rect, size: f64) -> Rect {
        Rect::centered_square(self.position(bounds), size)
    }

    fn moves_left_edge(&self) -> bool {
        matches!(self, Self::TopLeft | Self::MiddleLeft | Self::BottomLeft)
    }

    fn moves_right_edge(&self) -> bool {
        matches!(self, Self::TopRight | Self::MiddleRight | Self::BottomRight)
    }

    fn moves_top_edge(&self) -> bool {
        matches!(self, Self::TopLeft | Self::TopCenter | Self::TopRight)
    }

    fn moves_bottom_edge(&self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomCenter | Self::BottomRight)
    }

    /// Bounds after dragging this anchor by (dx, dy) from `baseline`.
    pub fn apply(&self, baseline: Rect, dx: f64, dy: f64, floor: f64) -> Rect {
        let mut out = baseline;

        if self.moves_left_edge() {
            out.width = (baseline.width - dx).max(floor);
            out.left = baseline.right() - out.width;
        } else if self.moves_right_edge() {
            out.width = (baseline.width + dx).max(floor);
        }

        if self.moves_top_edge() {
            out.height = (baseline.height - dy).max(floor);
            out.top = baseline.bottom() - out.height;
        } else if self.moves_bottom_edge() {
            out.height = (baseline.height + dy).max(floor);
        }

        out
    }
}

/// First anchor of `bounds` whose hit region contains `p`.
pub fn hit_test_anchor(bounds: Rect, size: f64, p: Point) -> Option<Anchor> {
    Anchor::ALL
        .into_iter()
        .find(|anchor| anchor.hit_rect(bounds, size).contains(p))
}

/// Resize gesture state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ResizeState {
    #[default]
    Inactive,
    Resizing {
        node: SceneNodeId,
        anchor: Anchor,
        start: Point,
        baseline: Rect,
    },
}

/// New bounds produced by one pointer move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStep {
    pub node: SceneNodeId,
    pub bounds: Rect,
}

/// Drives one anchor drag at a time
#[derive(Debug, Clone, Default)]
pub struct ResizeController {
    state: ResizeState,
    floor: f64,
}

impl ResizeController {
    pub fn new(floor: f64) -> Self {
        Self {
            state: ResizeState::Inactive,
            floor,
        }
    }

    pub fn state(&self) -> ResizeState {
        self.state
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, ResizeState::Resizing { .. })
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn resized_node(&self) -> Option<SceneNodeId> {
        match self.state {
            ResizeState::Resizing { node, .. } => Some(node),
            ResizeState::Inactive => None,
        }
    }

    /// Start resizing from `anchor`. Consumes the event.
    pub fn begin(
        &mut self,
        event: &mut PointerEvent,
        node: SceneNodeId,
        anchor: Anchor,
        baseline: Rect,
    ) {
        tracing::debug!("Resize {:?} started on {}", anchor, node);
        self.state = ResizeState::Resizing {
            node,
            anchor,
            start: event.position,
            baseline,
        };
        event.handled = true;
    }

    /// Bounds for the current pointer position, or `None` when idle.
    pub fn update(&mut self, event: &mut PointerEvent) -> Option<ResizeStep> {
        let ResizeState::Resizing {
            node,
            anchor,
            start,
            baseline,
        } = self.state
        else {
            return None;
        };
        let (dx, dy) = event.position.delta_from(start);
        event.handled = true;
        Some(ResizeStep {
            node,
            bounds: anchor.apply(baseline, dx, dy, self.floor),
        })
    }

    /// Finish the gesture, returning the node that was being resized.
    pub fn end(&mut self) -> Option<SceneNodeId> {
        match std::mem::take(&mut self.state) {
            ResizeState::Resizing { node, anchor, .. } => {
                tracing::debug!("Resize {:?} finished on {}", anchor, node);
                Some(node)
            }
            ResizeState::Inactive => None,
        }
    }
}
