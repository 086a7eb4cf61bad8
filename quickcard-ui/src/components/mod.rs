//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod card_form;
pub mod carousel;
pub mod card_tile;
pub mod header;
pub mod loading;
pub mod toast;

pub use card_form::CardForm;
pub use carousel::Carousel;
pub use card_tile::CardTile;
pub use header::Header;
pub use loading::{InlineLoading, Loading};
pub use toast::Toast;
