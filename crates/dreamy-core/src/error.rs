use thiserror::Error;

/// Everything the API client can hand back to a screen. Callers branch on
/// `Unauthorized` to force a redirect; the rest render inline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Session expired. Please login again.")]
    Unauthorized,

    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Builds the non-2xx variant, preferring the server-provided message
    /// over a status-derived fallback.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        ApiError::RequestFailed { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
