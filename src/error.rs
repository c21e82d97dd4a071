//! Error types for the Lexis library.
//!
//! All errors are represented by the [`LexisError`] enum. Every error raised by
//! this crate is a local, synchronous programming error: callers are expected to
//! fix the call site rather than retry.
//!
//! # Examples
//!
//! ```
//! use lexis::error::{LexisError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LexisError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::document::field_value::FieldShape;

/// The main error type for Lexis operations.
#[derive(Error, Debug)]
pub enum LexisError {
    /// I/O errors raised while draining a reader value.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Contradictory or missing configuration (e.g. a stored reader field).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Attempt to replace a field value with a value of a different shape.
    #[error("cannot change value type from {existing} to {requested}")]
    ShapeMismatch {
        /// Shape the field was constructed with.
        existing: FieldShape,
        /// Shape implied by the setter that was called.
        requested: FieldShape,
    },

    /// Offset, length, index or position arguments violating their invariants.
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Operation not permitted in the current state.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// `copy_to` or a lookup resolved to an attribute of another capability.
    #[error("Capability mismatch: expected {expected}, found {found}")]
    CapabilityMismatch {
        /// Name of the capability the caller required.
        expected: &'static str,
        /// Name of the implementation that was actually supplied.
        found: &'static str,
    },

    /// Analysis-related errors (tokenizer or analyzer construction).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with [`LexisError`].
pub type Result<T> = std::result::Result<T, LexisError>;

impl LexisError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LexisError::InvalidArgument(msg.into())
    }

    /// Create a new out of range error.
    pub fn out_of_range<S: Into<String>>(msg: S) -> Self {
        LexisError::OutOfRange(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        LexisError::InvalidOperation(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        LexisError::Analysis(msg.into())
    }

    /// Create a new shape mismatch error.
    pub fn shape_mismatch(existing: FieldShape, requested: FieldShape) -> Self {
        LexisError::ShapeMismatch {
            existing,
            requested,
        }
    }

    /// Create a new capability mismatch error.
    pub fn capability_mismatch(expected: &'static str, found: &'static str) -> Self {
        LexisError::CapabilityMismatch { expected, found }
    }
}
