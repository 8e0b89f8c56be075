use thiserror::Error;

/// Everything that can stop a validation attempt. None of these are fatal to
/// the application; the user may retry the action that failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidatorError {
    #[error("Please upload an ID card or take a photo")]
    NoImageSelected,
    #[error("Could not read the image: {0}")]
    Encoding(String),
    #[error("Validation request failed: {0}")]
    ValidationRequestFailed(#[from] RequestFailure),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestFailure {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ValidatorError {
    pub fn encoding(reason: impl std::fmt::Display) -> Self {
        Self::Encoding(reason.to_string())
    }
}
