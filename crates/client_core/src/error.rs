use thiserror::Error;

/// Failure surfaced by the remote joke service. The orchestration layer
/// does not distinguish network-down from 4xx/5xx: every variant degrades
/// to the same `Failure` state with a human-readable message.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to reach joke service: {0}")]
    Transport(String),
    #[error("joke service returned status {status}")]
    Status { status: u16 },
    #[error("failed to decode joke service response: {0}")]
    Decode(String),
    #[error("joke service returned an empty category list")]
    EmptyCategories,
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ServiceError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

/// Message shown to the consumer when a fetch fails. Falls back to a
/// generic string for errors that render empty.
pub(crate) fn failure_message(err: &ServiceError) -> String {
    let message = err.to_string();
    if message.is_empty() {
        "An error occurred".to_string()
    } else {
        message
    }
}
