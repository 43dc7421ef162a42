use crate::transport::TransportError;
use thiserror::Error;

/// Unified error type for the AkashML node.
///
/// Validation failures display their bare message because the host surfaces
/// them to the user verbatim. Batch aborts wrap the record failure so the
/// summary names the provider while diagnostics keep the underlying detail.
#[derive(Debug, Error)]
pub enum Error {
    /// Parameter problem detected before any network call.
    #[error("{0}")]
    Validation(String),

    /// Batch-level failure raised when the loop aborts on a record error.
    #[error("AkashML request failed: {source}")]
    Request {
        #[source]
        source: Box<Error>,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn unknown_operation(operation: &str) -> Self {
        Error::Validation(format!("Unknown operation: {}", operation))
    }

    /// Wrap a record failure in the user-facing request context.
    pub fn request(source: Error) -> Self {
        Error::Request {
            source: Box::new(source),
        }
    }

    /// True when the error never reached the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
