//! Error types
//!
//! Extraction and rendering never fail; the only fallible surface is building
//! an autolink configuration.

use thiserror::Error;

/// Rejected autolink configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A link target base was empty, which would produce relative hrefs.
    #[error("{field} must not be empty")]
    EmptyUrlBase { field: &'static str },

    /// A value would break out of its double-quoted HTML attribute.
    #[error("{field} contains a character not allowed in an HTML attribute: {value:?}")]
    UnsafeAttribute { field: &'static str, value: String },

    /// The JSON form of the configuration did not parse.
    #[error("invalid autolink config: {0}")]
    Parse(#[from] serde_json::Error),
}
