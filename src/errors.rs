use thiserror::Error;

/// Errors produced by the follow-graph API client.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Auth,

    #[error("Account '{handle}' not found")]
    NotFound { handle: String },

    #[error("API rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Server error: {status_code}")]
    Server { status_code: u16 },

    #[error("Response data parsing failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Unexpected response from API: {0}")]
    UnexpectedResponse(String),
}

impl GraphError {
    /// Whether this error makes every further API call pointless.
    ///
    /// Only authentication failures qualify; everything else is scoped to the
    /// single request that produced it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GraphError::Auth)
    }
}

/// Top-level application error for the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

pub fn config_error(msg: impl Into<String>) -> AppError {
    AppError::Config(msg.into())
}
