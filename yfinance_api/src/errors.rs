//! Error types for the transport client.

/// Errors that can occur when fetching a document from the provider.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or client setup).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not a JSON document of the expected shape.
    #[error("Malformed response body: {0}")]
    MalformedBody(String),
}

impl Error {
    /// HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
