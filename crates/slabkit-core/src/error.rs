//! Error handling for SlabKit
//!
//! Provides error types for the layers that can actually fail:
//! - Import errors (project JSON, legacy layouts, snapshots)
//! - Share errors (URL fragment tokens)
//! - Overlay errors (image data URLs)
//! - Model constraint errors (sink, overlay and faucet limits)
//!
//! Geometry never fails: invalid numeric input is coerced to a safe value
//! instead. All error types use `thiserror`.

use thiserror::Error;

/// Import error type
///
/// Raised when a project file, legacy layout or history snapshot cannot be
/// turned into a project. Import is all-or-nothing: the caller's state is
/// never touched when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    /// Payload is not valid JSON
    #[error("Invalid JSON at line {line}, column {column}: {reason}")]
    InvalidJson {
        /// Line of the syntax error (1-based).
        line: usize,
        /// Column of the syntax error (1-based).
        column: usize,
        /// Parser message.
        reason: String,
    },

    /// Payload parsed but is not a JSON object
    #[error("Expected a JSON object at the top level, found {found}")]
    NotAnObject {
        /// Kind of JSON value that was found.
        found: String,
    },

    /// File was written by a newer version
    #[error("Unsupported project version {version} (newest supported is {supported})")]
    UnsupportedVersion {
        /// Version found in the payload.
        version: u64,
        /// Newest version this build understands.
        supported: u64,
    },

    /// A field has a shape that cannot be coerced
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField {
        /// JSON path of the field.
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Project contains no layouts after migration
    #[error("Project contains no layouts")]
    NoLayouts,
}

impl ImportError {
    /// Build an [`ImportError::InvalidJson`] from a serde_json error.
    pub fn from_json(err: &serde_json::Error) -> Self {
        ImportError::InvalidJson {
            line: err.line(),
            column: err.column(),
            reason: err.to_string(),
        }
    }
}

/// Model constraint error type
///
/// Returned by mutations that would break a model invariant. The mutation
/// is declined and the model is left unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Piece already carries the maximum number of sinks
    #[error("Piece '{piece_id}' already has {max} sinks")]
    SinkLimit {
        /// Host piece id.
        piece_id: String,
        /// Maximum sinks per piece.
        max: usize,
    },

    /// Layout already carries the maximum number of overlays
    #[error("Layout '{layout_id}' already has {max} overlays")]
    OverlayLimit {
        /// Layout id.
        layout_id: String,
        /// Maximum overlays per layout.
        max: usize,
    },

    /// Faucet slot outside 0..=8
    #[error("Faucet index {index} is outside 0..={max}")]
    FaucetIndex {
        /// Requested slot.
        index: i64,
        /// Highest valid slot.
        max: u8,
    },

    /// Removing the only remaining layout
    #[error("A project must keep at least one layout")]
    LastLayout,

    /// Referenced entity does not exist
    #[error("No {kind} with id '{id}'")]
    NotFound {
        /// Entity kind ("piece", "sink", ...).
        kind: &'static str,
        /// Requested id or index.
        id: String,
    },
}

impl ModelError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ModelError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Share token error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShareError {
    /// Token does not start with a `vN=` prefix
    #[error("Share token has no version prefix")]
    MissingPrefix,

    /// Prefix is present but not understood
    #[error("Unknown share token version '{prefix}'")]
    UnknownVersion {
        /// The prefix that was found.
        prefix: String,
    },

    /// Body is not valid URL-safe base64
    #[error("Share token is not valid base64: {reason}")]
    Base64 {
        /// Decoder message.
        reason: String,
    },

    /// Body could not be (de)compressed
    #[error("Share token compression failed: {reason}")]
    Compression {
        /// Codec message.
        reason: String,
    },

    /// Decompressed body is not UTF-8 text
    #[error("Share token payload is not UTF-8 text")]
    NotUtf8,
}

/// Overlay image error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OverlayError {
    /// Not a `data:<mime>;base64,<payload>` URL
    #[error("Invalid data URL: {reason}")]
    InvalidDataUrl {
        /// Why the URL was rejected.
        reason: String,
    },

    /// Image bytes could not be decoded
    #[error("Failed to decode overlay image: {reason}")]
    Decode {
        /// Decoder message.
        reason: String,
    },

    /// Image could not be re-encoded
    #[error("Failed to encode overlay image: {reason}")]
    Encode {
        /// Encoder message.
        reason: String,
    },

    /// Mask raster would be empty or too large to allocate
    #[error("Cannot rasterize a {width}x{height} px mask")]
    RasterSize {
        width: f64,
        height: f64,
    },
}

/// Main error type for SlabKit
///
/// Unified error type that can represent any error in the system.
#[derive(Error, Debug)]
pub enum Error {
    /// Import error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Model constraint error
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Share token error
    #[error(transparent)]
    Share(#[from] ShareError),

    /// Overlay image error
    #[error(transparent)]
    Overlay(#[from] OverlayError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error came from reading a project payload
    pub fn is_import(&self) -> bool {
        matches!(self, Error::Import(_))
    }
}

/// Result type for SlabKit operations
pub type Result<T> = std::result::Result<T, Error>;
