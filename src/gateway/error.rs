use thiserror::Error;

/// Failures reported by a [`RemoteGateway`](super::RemoteGateway).
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request did not reach the server or the connection dropped
    #[error("Request failed: {0}")]
    Transport(String),
    /// The server answered with an error
    #[error("Request rejected by server: {0}")]
    Rejected(String),
    /// The response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    /// A fixture file could not be read
    #[error("Failed to read fixture: {0}")]
    Io(#[from] std::io::Error),
}
