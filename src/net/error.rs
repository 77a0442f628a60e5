//! Error type shared by every REST wrapper.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::collections::BTreeMap;

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered 401. The session has already been cleared.
    #[error("unauthorized")]
    Unauthorized { message: Option<String> },
    /// Any other non-2xx status.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    /// The response body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
    /// The envelope came back with `success: false`.
    #[error("request rejected: {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        message: Option<String>,
        errors: Option<BTreeMap<String, Vec<String>>>,
    },
}

impl ApiError {
    /// Message supplied by the backend, if the failure carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Status { message, .. } | Self::Rejected { message, .. } => {
                message.as_deref()
            }
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
