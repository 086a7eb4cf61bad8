//! reqwest Transport
//!
//! Native HTTP transport used by the CLI.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;

use super::{ApiRequest, ApiResponse, Body, FormPayload, FormValue, Method, Transport, TransportError};

/// Transport backed by a pooled `reqwest::Client`
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quickcard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::new(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);

        if let Some(authorization) = &request.authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }

        builder = match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(payload) => builder.multipart(to_form(payload)?),
        };

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::new("Request timeout")
            } else if e.is_connect() {
                TransportError::new(format!("Server unavailable: {}", e))
            } else {
                TransportError::new(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::new(format!("Failed to read response: {}", e)))?;

        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn to_form(payload: FormPayload) -> Result<Form, TransportError> {
    let mut form = Form::new();

    for (name, value) in payload.into_parts() {
        form = match value {
            FormValue::Text(text) => form.text(name, text),
            FormValue::File(file) => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(|e| TransportError::new(format!("Invalid content type: {}", e)))?;
                form.part(name, part)
            }
        };
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardDraft;
    use crate::client::{ApiClient, ClientError, ImageFile};
    use crate::session::SessionStore;
    use axum::{
        extract::{Multipart, State},
        http::{HeaderMap, StatusCode},
        routing::{delete, post},
        Json, Router,
    };
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Seen {
        authorization: Option<String>,
        fields: Vec<(String, Option<String>, Vec<u8>)>,
    }

    type Shared = Arc<Mutex<Seen>>;

    async fn create(
        State(seen): State<Shared>,
        headers: HeaderMap,
        mut multipart: Multipart,
    ) -> (StatusCode, Json<serde_json::Value>) {
        let mut seen = seen.lock().await;
        seen.authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut title = String::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let data = field.bytes().await.unwrap().to_vec();
            if name == "title" {
                title = String::from_utf8(data.clone()).unwrap();
            }
            seen.fields.push((name, file_name, data));
        }

        (
            StatusCode::CREATED,
            Json(serde_json::json!({"id": 10, "slug": "jane-doe", "title": title})),
        )
    }

    async fn refuse() -> (StatusCode, Json<serde_json::Value>) {
        (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({"error": "Not your card"})),
        )
    }

    async fn spawn_stub() -> (String, Shared) {
        let seen = Shared::default();
        let app = Router::new()
            .route("/api/cards/", post(create))
            .route("/api/cards/:slug/", delete(refuse))
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), seen)
    }

    #[tokio::test]
    async fn test_multipart_create_over_http() {
        let (base, seen) = spawn_stub().await;
        let session = SessionStore::ephemeral();
        session.login("abc");

        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let api = ApiClient::new(transport, &base, session);

        let mut draft = CardDraft::new();
        draft.title = "Jane Doe".to_string();
        draft.avatar = Some(ImageFile::new("me.png", "image/png", vec![1, 2, 3]));

        let card = api.create_card(draft.to_payload().unwrap()).await.unwrap();
        assert_eq!(card.id, 10);
        assert_eq!(card.title, "Jane Doe");

        let seen = seen.lock().await;
        assert_eq!(seen.authorization.as_deref(), Some("Token abc"));

        let avatar = seen.fields.iter().find(|(n, _, _)| n == "avatar").unwrap();
        assert_eq!(avatar.1.as_deref(), Some("me.png"));
        assert_eq!(avatar.2, vec![1, 2, 3]);

        let links = seen.fields.iter().find(|(n, _, _)| n == "social_links").unwrap();
        assert_eq!(links.2, b"[]".to_vec());
        assert!(!seen.fields.iter().any(|(n, _, _)| n == "background_image"));
    }

    #[tokio::test]
    async fn test_rejection_carries_server_message() {
        let (base, _seen) = spawn_stub().await;
        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let api = ApiClient::new(transport, &base, SessionStore::ephemeral());

        let err = api.delete_card("someone-else").await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Rejected {
                status: 403,
                message: Some("Not your card".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(Duration::from_secs(2)).unwrap();
        let api = ApiClient::new(transport, &format!("http://{}", addr), SessionStore::ephemeral());

        assert!(matches!(api.list_cards().await, Err(ClientError::Network(_))));
    }
}
