//! Business Cards
//!
//! Card records as served by the API and the editor draft that produces
//! create/update submissions.

pub mod form;
pub mod types;

pub use form::{CardDraft, LinkScratch, ValidationError};
pub use types::{Card, CardId, FontStyle, SocialLink, Stats, TemplateId};
