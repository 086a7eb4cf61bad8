//! API Access
//!
//! The browser side of the QuickCard client: a gloo-net [`Transport`] plus
//! the build-time API address.
//!
//! [`Transport`]: quickcard::client::Transport

pub mod transport;

pub use transport::GlooTransport;

use quickcard::client::{ApiClient, DEFAULT_API_BASE};

/// Client type used by every page
pub type Api = ApiClient<GlooTransport>;

/// API base URL, fixed when the bundle is built
pub fn api_base() -> String {
    option_env!("QUICKCARD_API_URL")
        .unwrap_or(DEFAULT_API_BASE)
        .trim_end_matches('/')
        .to_string()
}
