//! # QuickCard
//!
//! Client side of the QuickCard digital business-card service: users
//! register, build cards (contact details, styling, social links, images)
//! and publish them at `/<slug>`, where anyone can view them.
//!
//! The REST API is an external service. This crate holds everything on the
//! client side of it, shared by the `quickcard` CLI and the browser front-end.
//!
//! ## Modules
//!
//! - [`session`]: token store with pluggable persistence
//! - [`client`]: REST wrapper over a swappable [`Transport`]
//! - [`card`]: card records and the editor draft
//! - [`view`]: dashboard, public card and auth view-models
//! - [`routes`]: path table and session gating
//! - [`i18n`]: English, Russian and Czech strings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quickcard::client::{ApiClient, HttpTransport};
//! use quickcard::session::SessionStore;
//! use quickcard::view::Dashboard;
//! use quickcard::Locale;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = SessionStore::ephemeral();
//!     session.login("my-token");
//!
//!     let transport = HttpTransport::new(Duration::from_secs(30))?;
//!     let api = ApiClient::new(transport, "http://localhost:8000", session);
//!
//!     let mut dashboard = Dashboard::new(api, Locale::En);
//!     dashboard.mount().await;
//!
//!     for card in &dashboard.state().cards {
//!         println!("{} -> {}", card.title, card.public_path());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod card;
pub mod client;
pub mod i18n;
pub mod routes;
pub mod session;
pub mod view;

#[cfg(feature = "native")]
pub mod config;

// Re-export top-level types for convenience
pub use card::{Card, CardDraft, CardId, FontStyle, SocialLink, Stats, TemplateId, ValidationError};

pub use client::{ApiClient, ClientError, FormPayload, ImageFile, Transport, TransportError};

pub use i18n::{Locale, Message};

pub use routes::{guard, Navigation, Route};

pub use session::{SessionError, SessionStore, TokenStorage};

pub use view::{
    AuthView, Dashboard, DashboardState, EditorMode, Phase, PublicCardState, PublicCardView,
    ViewScope,
};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
