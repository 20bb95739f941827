use thiserror::Error;

/// Errors from calls against the remote data backend. Every failure is one
/// of two kinds: the request never completed, or the backend answered with a
/// fault. Both carry the underlying message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network/transport errors
    #[error("network error: {0}")]
    Network(String),

    /// Backend-reported errors (non-2xx response or unreadable payload)
    #[error("remote operation failed: {0}")]
    Remote(String),
}
