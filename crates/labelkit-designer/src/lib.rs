//! # LabelKit Designer
//!
//! Interaction core of a WYSIWYG label designer: place, move, resize and style
//! text, images, barcodes and QR codes on a label layout, then save and reload
//! the arrangement.
//!
//! ## Core Components
//!
//! ### Document
//! - **Model**: Serializable element records, the source of truth
//! - **Scene**: Transient visual nodes rendered from the model
//! - **Factory**: Builds scene nodes (QR and image rasters, text measuring)
//! - **View Model**: Pairs one model with one node and keeps them in sync
//! - **Serialization**: JSON documents through a [`serialization::LayoutManager`]
//!
//! ### Interaction
//! - **Selection Manager**: Single selection with a per-selection adorner
//! - **Drag Controller**: Moves the pressed element by pointer deltas
//! - **Resize Controller**: Eight anchors around the selected element
//!
//! ## Architecture
//!
//! ```text
//! LabelDesigner (document coordinator)
//!   ├── ElementViewModel (model + scene node) per element
//!   ├── ElementGroups (tree view projection)
//!   ├── IdAllocator (per-kind ids)
//!   ├── SelectionManager ── OverlayHost (adorners)
//!   ├── DragController / ResizeController
//!   └── EventBus (selection, element and document events)
//! ```
//!
//! Pointer events enter through [`LabelDesigner::pointer_down`],
//! [`LabelDesigner::pointer_move`] and [`LabelDesigner::pointer_up`].

pub mod designer;
pub mod drag;
pub mod factory;
pub mod groups;
pub mod id_allocator;
pub mod model;
pub mod pointer;
pub mod resize;
pub mod scene;
pub mod selection_manager;
pub mod serialization;
pub mod view_model;

pub use designer::{FirstPresetPrompt, LabelDesigner, LayoutPrompt};
pub use drag::{DragCandidate, DragController, DragState, DragStep};
pub use factory::{ElementFactory, LinearEncoder, NodeBuild, RasterFactory};
pub use groups::{ElementGroup, ElementGroups};
pub use id_allocator::IdAllocator;
pub use model::{
    BarcodeElement, Color, DocumentMetadata, ElementBase, FontStyle, FontWeight, ImageElement,
    ImageSource, LabelElement, LayoutElement, QrCodeElement, Symbology, TextElement,
};
pub use pointer::{ArrowKey, PointerEvent, PointerTarget};
pub use resize::{hit_test_anchor, Anchor, ResizeController, ResizeState, ResizeStep};
pub use scene::{SceneNode, Visual};
pub use selection_manager::{
    Adorner, AdornerLayer, OverlayHost, SelectionChanged, SelectionManager,
};
pub use serialization::{JsonLayoutManager, LabelDocumentFile, LayoutManager};
pub use view_model::ElementViewModel;

pub use labelkit_core::{ElementKind, Point, Rect, SceneNodeId};
