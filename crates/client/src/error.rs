use voyage_core::error::CoreError;

use crate::session::SessionError;

/// Errors from the REST client layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, decode, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `message` from the error body, or the raw body text.
        message: String,
    },

    /// A 2xx envelope without the `data` the endpoint promises.
    #[error("Response from {path} carried no data")]
    MissingData { path: String },

    /// The resource has no such endpoint (e.g. packs have no uploads).
    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),

    /// A domain-level refusal (e.g. a non-admin login).
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// Reading a local file for upload failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status, when the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The message worth showing to a person: the backend's own message
    /// when it sent one, the error text otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_backend_text() {
        let err = ApiError::Api {
            status: 400,
            message: "Name already taken".into(),
        };
        assert_eq!(err.user_message(), "Name already taken");
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_is_detected_by_status() {
        let err = ApiError::Api {
            status: 404,
            message: String::new(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "API error (404): ");
    }
}
