//! # LabelKit
//!
//! A WYSIWYG label designer core: lay out text, images, barcodes and QR codes
//! on a fixed-size label, move and resize them with the pointer, and persist
//! the arrangement as JSON.
//!
//! ## Architecture
//!
//! LabelKit is organized as a workspace with multiple crates:
//!
//! 1. **labelkit-core** - Error types, geometry, the designer event bus
//! 2. **labelkit-settings** - Placement, text, barcode and layout defaults
//! 3. **labelkit-designer** - Element model, scene nodes, selection, drag and resize
//! 4. **labelkit** - Command line front end that integrates all crates

pub mod cli;

pub use labelkit_core::{
    DesignerEvent, DocumentError, ElementError, ElementKind, Error, EventBus, Point, Rect,
    Result, SceneNodeId,
};
pub use labelkit_designer::{
    ElementViewModel, LabelDesigner, LabelDocumentFile, LabelElement, LayoutPrompt,
    PointerEvent, Symbology,
};
pub use labelkit_settings::{DesignerSettings, LayoutPreset};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
