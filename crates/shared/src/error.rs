use thiserror::Error;

/// Failures crossing the backend seam.
///
/// Every variant is rendered once into a human-readable status message by
/// the orchestrator and then swallowed; no backend failure propagates to
/// presentation consumers as an error value.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// Network-level failure, including request timeouts.
    #[error("request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-success HTTP status.
    #[error("backend returned HTTP {status}")]
    Status { status: u16 },
    /// The response body could not be decoded as the expected JSON shape.
    #[error("could not decode backend response: {0}")]
    Decode(String),
}
