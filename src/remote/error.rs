//! Classification of failed controller API calls.

use std::fmt;

use crate::error::FlowsetError;
use crate::utils::text::truncate_string;

/// Longest response body excerpt kept in an error message, before the ellipsis
const MAX_BODY_EXCERPT: usize = 500;

/// A non-2xx response from the controller.
///
/// Preserves the HTTP status so callers can tell a stale revision apart from
/// a validation failure or a server fault.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: reqwest::StatusCode,
    pub message: String,
}

impl ApiError {
    /// Build an error from a status code and the raw response body.
    ///
    /// The controller answers failures with plain text; an empty body falls
    /// back to the status' canonical reason.
    pub fn from_body(status: reqwest::StatusCode, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            truncate_string(body, MAX_BODY_EXCERPT + 3)
        };
        Self { status, message }
    }

    /// The request carried a revision the server no longer accepts
    pub fn is_conflict(&self) -> bool {
        self.status == reqwest::StatusCode::CONFLICT
    }

    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    pub fn is_transient(&self) -> bool {
        self.status.is_server_error()
    }

    /// Short explanation appended to the message shown to the user
    pub fn hint(&self) -> Option<&'static str> {
        if self.is_conflict() {
            Some("the configuration was modified by another client")
        } else if self.is_transient() {
            Some("the controller is unavailable, try again later")
        } else if self.is_client_error() {
            Some("the request was rejected by the controller")
        } else {
            None
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.message)
    }
}

impl From<ApiError> for FlowsetError {
    fn from(error: ApiError) -> Self {
        let message = match error.hint() {
            Some(hint) => format!("{} ({hint})", error.message),
            None => error.message,
        };
        FlowsetError::Api {
            status: error.status.as_u16(),
            message,
        }
    }
}
