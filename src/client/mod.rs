//! QuickCard REST API Client
//!
//! Thin wrapper over the card API. Every request goes to one fixed base URL
//! and carries `Authorization: Token <token>` when the session holds one.
//! Card submissions are multipart; everything else is JSON.
//!
//! The wire work is done by a [`Transport`]: reqwest on native targets
//! (`HttpTransport`), gloo-net in the browser front-end.
//!
//! # Endpoints
//!
//! - `POST /api/login/`, `POST /api/register/` - obtain a token
//! - `GET /api/cards/` - list the caller's cards
//! - `GET /api/cards/{slug}/` - one card (owner or public)
//! - `POST /api/cards/`, `PUT /api/cards/{slug}/` - multipart create/update
//! - `DELETE /api/cards/{slug}/`
//! - `GET /api/stats/` - visit counters

pub mod dto;
pub mod error;
pub mod multipart;

#[cfg(feature = "native")]
pub mod http;

#[cfg(test)]
pub(crate) mod testing;

pub use dto::{LoginRequest, RegisterRequest, TokenResponse};
pub use error::{ClientError, TransportError};
pub use multipart::{FormPayload, FormValue, ImageFile};

#[cfg(feature = "native")]
pub use http::HttpTransport;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

use crate::card::{Card, Stats};
use crate::session::SessionStore;
use error::ErrorBody;

/// Default API host when nothing is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// HTTP verbs used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(FormPayload),
}

/// A fully resolved request, ready for a transport
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Value for the `Authorization` header
    pub authorization: Option<String>,
    pub body: Body,
}

/// Raw response as seen by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves an [`ApiRequest`] over the wire
///
/// Futures are not required to be `Send` so browser transports can hold
/// JS values across awaits.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Client for the QuickCard REST API
#[derive(Clone)]
pub struct ApiClient<T> {
    transport: T,
    base_url: String,
    session: SessionStore,
}

impl<T: Transport> ApiClient<T> {
    /// Create a client for `base_url` (e.g. `http://localhost:8000`)
    /// that authenticates with `session`.
    pub fn new(transport: T, base_url: &str, session: SessionStore) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ============ Auth ============

    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ClientError> {
        let body = json_body(request)?;
        self.call(Method::Post, "/api/login/", body, false).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ClientError> {
        let body = json_body(request)?;
        self.call(Method::Post, "/api/register/", body, false).await
    }

    // ============ Cards ============

    /// Cards owned by the signed-in user
    pub async fn list_cards(&self) -> Result<Vec<Card>, ClientError> {
        self.call(Method::Get, "/api/cards/", Body::Empty, true).await
    }

    /// Latest copy of one of the user's cards
    pub async fn get_card(&self, slug: &str) -> Result<Card, ClientError> {
        self.call(Method::Get, &card_path(slug), Body::Empty, true).await
    }

    /// Public view of a card; never sends the session token
    pub async fn get_public_card(&self, slug: &str) -> Result<Card, ClientError> {
        self.call(Method::Get, &card_path(slug), Body::Empty, false).await
    }

    pub async fn create_card(&self, payload: FormPayload) -> Result<Card, ClientError> {
        self.call(Method::Post, "/api/cards/", Body::Multipart(payload), true)
            .await
    }

    pub async fn update_card(&self, slug: &str, payload: FormPayload) -> Result<Card, ClientError> {
        self.call(Method::Put, &card_path(slug), Body::Multipart(payload), true)
            .await
    }

    pub async fn delete_card(&self, slug: &str) -> Result<(), ClientError> {
        self.send(Method::Delete, &card_path(slug), Body::Empty, true)
            .await
            .map(|_| ())
    }

    pub async fn stats(&self) -> Result<Stats, ClientError> {
        self.call(Method::Get, "/api/stats/", Body::Empty, true).await
    }

    // ============ Plumbing ============

    async fn call<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Body,
        authenticated: bool,
    ) -> Result<R, ClientError> {
        let response = self.send(method, path, body, authenticated).await?;
        serde_json::from_slice(&response.body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Body,
        authenticated: bool,
    ) -> Result<ApiResponse, ClientError> {
        let authorization = if authenticated {
            self.session.token().map(|t| format!("Token {}", t))
        } else {
            None
        };

        let request = ApiRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            authorization,
            body,
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%method, path, error = %e, "API request failed");
                return Err(e.into());
            }
        };

        tracing::debug!(%method, path, status = response.status, "API response");

        if response.is_success() {
            return Ok(response);
        }
        match response.status {
            401 => Err(ClientError::Unauthorized),
            status => Err(ClientError::Rejected {
                status,
                message: ErrorBody::extract(&response.body),
            }),
        }
    }
}

fn card_path(slug: &str) -> String {
    format!("/api/cards/{}/", urlencoding::encode(slug))
}

fn json_body<B: Serialize>(body: &B) -> Result<Body, ClientError> {
    serde_json::to_value(body)
        .map(Body::Json)
        .map_err(|e| ClientError::Decode(e.to_string()))
}
