// SPDX-License-Identifier: MIT OR Apache-2.0
//! Request-level errors.
//!
//! Only requests fail. Structural problems inside a resolved unit are
//! absorbed by the extractors and never surface here.

/// Error returned instead of a document
#[derive(Debug, thiserror::Error)]
pub enum IntrospectionError {
    /// A required parameter is missing or not a string
    #[error("Missing '{0}' parameter")]
    MissingParameter(&'static str),

    /// No unit matches the identifier
    #[error("Blueprint not found: {0}")]
    UnitNotFound(String),

    /// The command name is not handled
    #[error("Unknown blueprint introspection command: {0}")]
    UnknownCommand(String),

    /// The document could not be rendered as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}
