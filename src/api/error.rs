//! Errors raised by the remote services

/// Failure of a request to the form, user or directory service
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No identifier was supplied for the schema fetch
    #[error("roll number not provided")]
    MissingIdentifier,

    /// Transport failure or non-success status
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The body did not match the expected shape
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Message shown on the form screen. Transport and decode failures are
    /// collapsed into one generic message.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::MissingIdentifier => "Roll number not provided",
            ApiError::Request(_) | ApiError::Decode(_) => "Failed to load form.",
        }
    }
}
