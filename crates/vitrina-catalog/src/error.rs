//! Error types for the catalog origin backend.

/// Errors that can occur when reading from the catalog origin.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The origin rejected the request with a non-success status.
    #[error("origin returned status {status}")]
    Status { status: u16 },

    /// Transport-level failure while talking to the origin.
    #[error("origin request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The origin answered with a payload that could not be decoded.
    #[error("failed to decode origin response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend was constructed with unusable configuration.
    #[error("invalid catalog configuration: {0}")]
    Config(String),
}

impl CatalogError {
    /// Creates a new status error.
    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }

    /// Creates a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns true if this is a transient error that might succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status } => *status >= 500,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Decode(_) | Self::Config(_) => false,
        }
    }
}
