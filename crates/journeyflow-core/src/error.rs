//! Error types for the designer core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// Server answered with a non-2xx status.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Edge not found: {0}")]
    EdgeNotFound(String),

    #[error("Node id '{0}' is not a server step id")]
    InvalidStepId(String),

    #[error("Invalid step: {0}")]
    InvalidStep(String),

    #[error("Journey has not been saved yet")]
    JourneyNotPersisted,

    #[error("No step form is open")]
    NoActiveForm,

    #[error("No context menu is open")]
    NoContextMenu,
}

impl SyncError {
    /// True for failures that came from talking to the server.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            SyncError::Status { .. } | SyncError::Http(_) | SyncError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_is_human_readable() {
        let err = SyncError::Status {
            status: 500,
            message: "Failed to save connection".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to save connection (HTTP 500)");
        assert!(err.is_remote());
    }

    #[test]
    fn test_local_errors_are_not_remote() {
        assert!(!SyncError::JourneyNotPersisted.is_remote());
        assert!(!SyncError::NodeNotFound("3".to_string()).is_remote());
    }
}
