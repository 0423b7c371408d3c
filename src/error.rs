//! Error types for the CFTools client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Client Error Enum ==
/// Unified error type for every client implementation, cached or not.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Request cannot be turned into an API call or cache key
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Operation requires credentials but none were configured
    #[error("Authentication required: no credentials configured")]
    AuthenticationRequired,

    /// Operation is server scoped but no server api id was given
    #[error("Server api id required: set a default or pass one with the request")]
    ServerApiIdRequired,

    /// Token rejected or access denied
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource does not exist upstream
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream asked us to slow down
    #[error("Rate limited by upstream")]
    RateLimited,

    /// Upstream 5xx
    #[error("Server error ({0}): {1}")]
    Server(u16, String),

    /// Transport failure or unexpected status
    #[error("Request error: {0}")]
    Request(String),

    /// Response body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Create a ClientError from an HTTP status code and response body
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => ClientError::Unauthorized(body.to_string()),
            404 => ClientError::NotFound(body.to_string()),
            429 => ClientError::RateLimited,
            500..=599 => ClientError::Server(status, body.to_string()),
            _ => ClientError::Request(format!("HTTP {}: {}", status, body)),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Request(err.to_string())
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the client.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(ClientError::from_status(401, ""), ClientError::Unauthorized(_)));
        assert!(matches!(ClientError::from_status(403, ""), ClientError::Unauthorized(_)));
        assert!(matches!(ClientError::from_status(404, "gone"), ClientError::NotFound(b) if b == "gone"));
        assert!(matches!(ClientError::from_status(429, ""), ClientError::RateLimited));
        assert!(matches!(ClientError::from_status(503, ""), ClientError::Server(503, _)));
        assert!(matches!(ClientError::from_status(418, ""), ClientError::Request(_)));
    }
}
