//! # LabelKit Core
//!
//! Shared building blocks for the LabelKit workspace:
//! - Error types for element validation and document persistence
//! - Geometry and identity types shared by the designer and settings crates
//! - The designer event bus used to notify UI observers

pub mod error;
pub mod event_bus;
pub mod types;

pub use error::{DocumentError, ElementError, Error, Result};
pub use event_bus::{
    DesignerEvent, EventBus, EventBusConfig, EventBusError, EventCategory, EventFilter,
    NoticeLevel, SubscriptionId,
};
pub use types::{ElementKind, Point, Rect, SceneNodeId};
