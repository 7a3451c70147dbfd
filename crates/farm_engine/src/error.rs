use thiserror::Error;

/// The backend answered with something other than the expected status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub struct UpstreamError {
    pub status: u16,
    /// Response body, verbatim.
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unreadable response: {0}")]
    Decode(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    /// Status code of an upstream failure, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Upstream(err) => Some(err.status),
            _ => None,
        }
    }
}
