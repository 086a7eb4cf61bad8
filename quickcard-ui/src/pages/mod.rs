//! Pages
//!
//! Top-level page components for each route.

pub mod about;
pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod landing;
pub mod public_card;

pub use about::About;
pub use auth::{Login, Register};
pub use contact::Contact;
pub use dashboard::Dashboard;
pub use landing::Landing;
pub use public_card::PublicCard;
