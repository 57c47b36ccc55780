//! A2A client error types.

use thiserror::Error;

/// Errors that can occur when using the A2A client.
#[derive(Debug, Error)]
pub enum A2AError {
    /// No transport kind is acceptable to both the client and the agent.
    #[error("no compatible transports found (tried: {})", attempted.join(", "))]
    NoCompatibleTransport {
        /// The transport kinds that were considered, in the order they were tried.
        attempted: Vec<String>,
    },

    /// HTTP transport error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote endpoint returned a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The remote agent returned a JSON-RPC error.
    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failed to fetch the agent card from its endpoint.
    #[error("agent discovery failed: {0}")]
    DiscoveryFailed(String),

    /// The agent card is malformed or missing required fields.
    #[error("invalid agent card: {0}")]
    InvalidAgentCard(String),

    /// Streaming (SSE) error.
    #[error("streaming error: {0}")]
    StreamingError(String),

    /// A registered event consumer failed while observing an event.
    #[error("consumer error: {0}")]
    Consumer(String),

    /// A call interceptor rejected or failed to process an outgoing request.
    #[error("interceptor error: {0}")]
    Interceptor(String),
}

/// A2A Result type alias.
pub type A2AResult<T> = Result<T, A2AError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_compatible_transport_message() {
        let err = A2AError::NoCompatibleTransport {
            attempted: vec!["JSONRPC".into(), "GRPC".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("no compatible transports found"));
        assert!(msg.contains("JSONRPC"));
        assert!(msg.contains("GRPC"));
    }
}
