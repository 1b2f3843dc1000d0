//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so they can be logged or replayed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::types::{ElementKind, SceneNodeId};

/// Events raised by the label designer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DesignerEvent {
    /// Selection moved to a node, or was cleared
    SelectionChanged { node: Option<SceneNodeId> },
    /// Element placed on the canvas
    ElementAdded {
        node: SceneNodeId,
        kind: ElementKind,
        id: u32,
    },
    /// Element removed from the canvas
    ElementRemoved {
        node: SceneNodeId,
        kind: ElementKind,
        id: u32,
    },
    /// Element position changed by a gesture
    ElementMoved { node: SceneNodeId, x: f64, y: f64 },
    /// Element bounds changed by a resize gesture
    ElementResized {
        node: SceneNodeId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Document rebuilt from a file
    DocumentLoaded {
        path: Option<PathBuf>,
        element_count: usize,
    },
    /// Document written to a file
    DocumentSaved { path: PathBuf },
    /// Canvas emptied for a new document
    DocumentCleared,
    /// User-facing message
    Notice { level: NoticeLevel, message: String },
}

impl DesignerEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            Self::SelectionChanged { .. } => EventCategory::Selection,
            Self::ElementAdded { .. }
            | Self::ElementRemoved { .. }
            | Self::ElementMoved { .. }
            | Self::ElementResized { .. } => EventCategory::Element,
            Self::DocumentLoaded { .. } | Self::DocumentSaved { .. } | Self::DocumentCleared => {
                EventCategory::Document
            }
            Self::Notice { .. } => EventCategory::Notice,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            Self::SelectionChanged { node: Some(node) } => format!("Selected {}", node),
            Self::SelectionChanged { node: None } => "Selection cleared".to_string(),
            Self::ElementAdded { node, kind, id } => format!("Added {} [{}] as {}", kind, id, node),
            Self::ElementRemoved { node, kind, id } => {
                format!("Removed {} [{}] ({})", kind, id, node)
            }
            Self::ElementMoved { node, x, y } => format!("Moved {} to ({:.1}, {:.1})", node, x, y),
            Self::ElementResized {
                node,
                width,
                height,
                ..
            } => format!("Resized {} to {:.1}x{:.1}", node, width, height),
            Self::DocumentLoaded {
                path,
                element_count,
            } => match path {
                Some(p) => format!("Loaded {} elements from {}", element_count, p.display()),
                None => format!("Loaded {} elements", element_count),
            },
            Self::DocumentSaved { path } => format!("Saved to {}", path.display()),
            Self::DocumentCleared => "Document cleared".to_string(),
            Self::Notice { level, message } => format!("{}: {}", level, message),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Selection,
    Element,
    Document,
    Notice,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selection => write!(f, "Selection"),
            Self::Element => write!(f, "Element"),
            Self::Document => write!(f, "Document"),
            Self::Notice => write!(f, "Notice"),
        }
    }
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "Info"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_categories() {
        let node = SceneNodeId(3);
        assert_eq!(
            DesignerEvent::SelectionChanged { node: Some(node) }.category(),
            EventCategory::Selection
        );
        assert_eq!(
            DesignerEvent::ElementMoved {
                node,
                x: 1.0,
                y: 2.0
            }
            .category(),
            EventCategory::Element
        );
        assert_eq!(DesignerEvent::DocumentCleared.category(), EventCategory::Document);
    }

    #[test]
    fn test_event_descriptions() {
        let event = DesignerEvent::ElementAdded {
            node: SceneNodeId(4),
            kind: ElementKind::Text,
            id: 2,
        };
        assert_eq!(event.description(), "Added Text [2] as node#4");

        let event = DesignerEvent::Notice {
            level: NoticeLevel::Warning,
            message: "bad size".to_string(),
        };
        assert_eq!(event.description(), "Warning: bad size");
    }
}
