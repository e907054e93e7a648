//! Error types for the SNS client

use crate::rdf::ParseError;
use thiserror::Error;

/// Errors that can occur while talking to the Semantic Network Service
#[derive(Error, Debug)]
pub enum SnsError {
    /// The service reports that the requested resource does not exist
    #[error("Resource does not exist: {0}")]
    NotFound(String),

    /// Non-success HTTP status other than 404
    #[error("HTTP status {status} for {url}")]
    Http { status: u16, url: String },

    /// HTTP transport error
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body is not valid RDF/XML
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Malformed request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SnsResult<T> = Result<T, SnsError>;
