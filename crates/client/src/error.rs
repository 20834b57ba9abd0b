//! Failure taxonomy for everything that crosses the network boundary.
//!
//! Managers never let these propagate: each async operation catches the
//! error and surfaces [`ClientError::display_message`] in the owning view.

use thiserror::Error;

use crate::upload::UploadValidationError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Client-side, pre-network rejection (bad file type/size, empty
    /// required field).
    #[error(transparent)]
    Validation(#[from] UploadValidationError),

    /// 401 — expired or missing token; no auto-refresh in scope.
    #[error("authentication required")]
    Auth,

    /// 404 — the edit target vanished server-side.
    #[error("not found: {0}")]
    NotFound(String),

    /// 409 — backend-specific conflicts; not specially handled upstream.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other non-2xx that carried a parseable `{message}` body.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Network failure, or a non-2xx without a parseable body.
    #[error("transport error: {0}")]
    Transport(String),
}

impl ClientError {
    /// Map a non-2xx status plus its `{message}` body to a variant.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ClientError::Auth,
            404 => ClientError::NotFound(message),
            409 => ClientError::Conflict(message),
            _ => ClientError::Server { status, message },
        }
    }

    /// The single human-readable string surfaced in the calling view.
    pub fn display_message(&self) -> String {
        match self {
            ClientError::Validation(err) => err.to_string(),
            ClientError::Auth => "Your session has expired. Please log in again.".to_string(),
            ClientError::NotFound(msg) | ClientError::Conflict(msg) => msg.clone(),
            ClientError::Server { message, .. } => message.clone(),
            ClientError::Transport(_) => "Request failed. Please try again.".to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
