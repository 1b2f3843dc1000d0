//! Error handling for LabelKit
//!
//! Two layers of errors exist:
//! - Element errors (validation of element properties and rendering)
//! - Document errors (persistence and document-level invariants)
//!
//! Gesture failures are never errors; the interaction controllers treat them as no-ops.

use thiserror::Error;

/// Element error type
///
/// Raised by view-model setters and the element factory. All of these are
/// recoverable: the previous value is retained or the node is left unrendered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    /// Font size outside the configured bounds
    #[error("Font size {size} is outside the allowed range {min}..={max}")]
    FontSizeOutOfRange {
        /// The rejected size.
        size: f64,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },

    /// Opacity outside 0.0..=1.0
    #[error("Opacity {opacity} is outside 0.0..=1.0")]
    OpacityOutOfRange {
        /// The rejected opacity.
        opacity: f64,
    },

    /// Barcode symbology tag not recognised
    #[error("Unsupported barcode type: {symbology}")]
    UnsupportedBarcodeType {
        /// The tag as found on the element.
        symbology: String,
    },

    /// Operation applies to a different element kind
    #[error("Expected a {expected} element, found {actual}")]
    WrongKind {
        /// The kind the operation needs.
        expected: String,
        /// The kind of the element it was applied to.
        actual: String,
    },

    /// Dimension that must be strictly positive
    #[error("{field} must be greater than zero, got {value}")]
    NonPositiveDimension {
        /// Name of the dimension.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// Image data that cannot be decoded
    #[error("Unreadable image: {reason}")]
    UnreadableImage {
        /// Decoder message.
        reason: String,
    },

    /// Raster could not be produced
    #[error("Render failed: {reason}")]
    Render {
        /// What went wrong.
        reason: String,
    },
}

/// Document error type
///
/// Raised by save/load and by document-level invariants enforced by the coordinator.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// I/O error while reading or writing a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document text is not a valid label document
    #[error("Failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document was written by an incompatible format version
    #[error("Unsupported document version: {version}")]
    UnsupportedVersion {
        /// Version string found in the file.
        version: String,
    },

    /// More than one layout element in a document
    #[error("Document contains {count} layout elements, at most one is allowed")]
    MultipleLayouts {
        /// Number of layout elements found.
        count: usize,
    },

    /// No layout was chosen, so nothing can be placed
    #[error("A layout must exist before elements can be added")]
    LayoutRequired,

    /// A layout is already present
    #[error("The document already has a layout")]
    LayoutExists,
}

/// Unified error type for LabelKit
#[derive(Error, Debug)]
pub enum Error {
    /// Element error
    #[error(transparent)]
    Element(#[from] ElementError),

    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl Error {
    /// Create an error from a message.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Result type for LabelKit operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_error_display() {
        let err = ElementError::FontSizeOutOfRange {
            size: 2000.0,
            min: 1.0,
            max: 1000.0,
        };
        assert_eq!(
            err.to_string(),
            "Font size 2000 is outside the allowed range 1..=1000"
        );

        let err = ElementError::UnsupportedBarcodeType {
            symbology: "PDF417".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported barcode type: PDF417");
    }

    #[test]
    fn test_document_error_display() {
        let err = DocumentError::MultipleLayouts { count: 2 };
        assert_eq!(
            err.to_string(),
            "Document contains 2 layout elements, at most one is allowed"
        );
        assert_eq!(
            DocumentError::LayoutExists.to_string(),
            "The document already has a layout"
        );
    }

    #[test]
    fn test_unified_error_is_transparent() {
        let err: Error = ElementError::OpacityOutOfRange { opacity: 1.5 }.into();
        assert_eq!(err.to_string(), "Opacity 1.5 is outside 0.0..=1.0");

        let err: Error = DocumentError::LayoutRequired.into();
        assert!(matches!(err, Error::Document(DocumentError::LayoutRequired)));

        assert_eq!(Error::other("boom").to_string(), "Error: boom");
    }
}
