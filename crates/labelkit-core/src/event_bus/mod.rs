//! # Event Bus Module
//!
//! Publish/subscribe channel between the document coordinator and whatever
//! UI observes it (tree view, property panel, status bar).
//!
//! - The coordinator publishes typed [`DesignerEvent`]s without knowing subscribers
//! - Subscribers filter by [`EventCategory`] and receive events synchronously
//! - Async consumers can poll a broadcast receiver instead
//!
//! ## Usage
//!
//! ```rust
//! use labelkit_core::event_bus::{DesignerEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Selection]),
//!     |event| {
//!         if let DesignerEvent::SelectionChanged { node } = event {
//!             println!("selected: {:?}", node);
//!         }
//!     },
//! );
//!
//! bus.publish(DesignerEvent::SelectionChanged { node: None }).ok();
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
