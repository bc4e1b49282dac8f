//! Error types for the GNOSS SDK

use thiserror::Error;

/// Errors that can occur when building or serializing an ontology graph
#[derive(Error, Debug)]
pub enum GnossError {
    /// A required field (`rdf:type` or `rdfs:label`) was null or empty at
    /// construction, mutation, or serialization time
    #[error("missing required field `{field}` on {subject}")]
    MissingRequiredField {
        /// Name of the missing field
        field: &'static str,
        /// Human-readable description of the offending node
        subject: String,
    },

    /// A stored language tag did not match the two-letter pattern
    #[error("invalid language tag: {0}")]
    InvalidLanguageTag(String),

    /// Invalid extension or format passed to image handling
    #[error("invalid transformation: {0}")]
    InvalidTransformation(String),

    /// The auxiliary-entity tree exceeded the recursion limit, which
    /// usually means the caller built a cyclic graph
    #[error("entity tree exceeds maximum depth of {limit}")]
    DepthLimitExceeded {
        /// The depth limit that was exceeded
        limit: usize,
    },

    /// Generated buffer was not valid UTF-8
    #[error("generated buffer is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Configuration parsing error
    #[error("configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GnossResult<T> = Result<T, GnossError>;
