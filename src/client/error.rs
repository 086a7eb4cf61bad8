//! Client Error Types
//!
//! Classifies failed API calls the way views need them: an authorization
//! failure ends the session, a rejection carries the server's text, and
//! everything else falls back to a localized message.

use serde::Deserialize;
use thiserror::Error;

use crate::i18n::{Locale, Message};

/// Failure below HTTP semantics (connect, DNS, request building)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors returned by [`ApiClient`](super::ApiClient) calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// HTTP 401: the token is missing, expired or revoked
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-success status
    #[error("API error {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Rejected { status: u16, message: Option<String> },

    /// The server could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with something we could not decode
    #[error("Parse error: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Rejected { status: 404, .. })
    }

    /// Server-provided explanation, if there was one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text to show inline: the server's message verbatim, else `fallback`
    /// in the given locale.
    pub fn user_message(&self, locale: Locale, fallback: Message) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| locale.text(fallback).to_string())
    }
}

impl From<TransportError> for ClientError {
    fn from(e: TransportError) -> Self {
        ClientError::Network(e.0)
    }
}

/// Error body shapes the API is known to send
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl ErrorBody {
    /// Pull `error` (or `detail`) out of a JSON error body
    pub(crate) fn extract(body: &[u8]) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
        parsed
            .error
            .or(parsed.detail)
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_field() {
        assert_eq!(
            ErrorBody::extract(br#"{"error": "Username already exists"}"#).as_deref(),
            Some("Username already exists")
        );
        assert_eq!(
            ErrorBody::extract(br#"{"detail": "Not found."}"#).as_deref(),
            Some("Not found.")
        );
        assert_eq!(ErrorBody::extract(b"<html>502</html>"), None);
        assert_eq!(ErrorBody::extract(br#"{"error": ""}"#), None);
    }

    #[test]
    fn test_user_message() {
        let rejected = ClientError::Rejected {
            status: 400,
            message: Some("Slug already taken".to_string()),
        };
        assert_eq!(
            rejected.user_message(Locale::Ru, Message::CreateError),
            "Slug already taken"
        );

        let bare = ClientError::Rejected { status: 500, message: None };
        assert_eq!(
            bare.user_message(Locale::En, Message::CreateError),
            "Could not create the card"
        );

        let offline = ClientError::Network("connection refused".to_string());
        assert_eq!(
            offline.user_message(Locale::Cs, Message::LoginError),
            Locale::Cs.text(Message::LoginError)
        );
    }

    #[test]
    fn test_classification() {
        assert!(ClientError::Unauthorized.is_unauthorized());
        assert!(ClientError::Rejected { status: 404, message: None }.is_not_found());
        assert!(!ClientError::Network("x".into()).is_not_found());
    }
}
