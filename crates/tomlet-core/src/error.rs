//! Error types for the JSON boundary.
//!
//! The text-side codec itself is total: `serialize` always produces text
//! and `parse` always produces a table. Errors only arise when JSON
//! documents enter or leave the model.

use thiserror::Error;

/// Errors from converting between JSON documents and the value model.
#[derive(Error, Debug)]
pub enum TomletError {
    /// The input string was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON document contains a value the text format cannot express.
    /// `path` is the dotted/indexed location of the offending value.
    #[error("unsupported value at {path}: {message}")]
    Unsupported { path: String, message: String },
}

/// Convenience alias used throughout tomlet-core.
pub type Result<T> = std::result::Result<T, TomletError>;
