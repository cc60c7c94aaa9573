use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// The transport failed before the service answered (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(String),
    /// The service answered with a failure status; the message is shown as-is.
    #[error("{0}")]
    Request(String),
    #[error("Please log in first.")]
    AuthRequired,
    #[error("{0}")]
    Validation(String),
}

impl WidgetError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, WidgetError::Network(_))
    }

    pub fn is_local(&self) -> bool {
        matches!(self, WidgetError::AuthRequired | WidgetError::Validation(_))
    }
}
