//! Card Types
//!
//! Wire representation of business cards as served by the REST API.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned card identifier
pub type CardId = u64;

pub const DEFAULT_BACKGROUND_COLOR: &str = "#FFFFFF";
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

const SAFE_LINK_SCHEMES: [&str; 4] = ["https://", "http://", "mailto:", "tel:"];

/// A published business card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub slug: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub subtitle: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub phone: String,
    #[serde(default)]
    pub template_id: TemplateId,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default = "default_background_color", deserialize_with = "nullable_background")]
    pub background_color: String,
    #[serde(default = "default_text_color", deserialize_with = "nullable_text_color")]
    pub text_color: String,
    /// Image URL, absolute or relative to the API host
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default, deserialize_with = "nullable_links")]
    pub social_links: Vec<SocialLink>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Card {
    /// Path of the public page for this card
    pub fn public_path(&self) -> String {
        format!("/{}", self.slug)
    }

    /// Rewrite relative media paths (`/media/...`) into absolute URLs on `base`.
    pub fn resolve_media(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        for url in [&mut self.avatar, &mut self.background_image]
            .into_iter()
            .flatten()
        {
            if url.starts_with('/') {
                *url = format!("{}{}", base, url);
            }
        }
        self
    }
}

/// One entry of a card's social link list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

impl SocialLink {
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            url: url.into(),
        }
    }

    /// Whether `url` uses a scheme that is safe to put in an `href`:
    /// `http`, `https`, `mailto` or `tel`.
    pub fn has_safe_url(&self) -> bool {
        let url = self.url.trim().to_ascii_lowercase();
        SAFE_LINK_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
    }

    /// CSS-friendly platform name (`LinkedIn` -> `linkedin`)
    pub fn css_class(&self) -> String {
        self.platform.trim().to_lowercase().replace(' ', "-")
    }
}

/// Layout template of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Default,
    Modern,
    Classic,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [TemplateId::Default, TemplateId::Modern, TemplateId::Classic];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Default => "default",
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TemplateId::Default => "Default",
            TemplateId::Modern => "Modern",
            TemplateId::Classic => "Classic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Unknown or null values decode to the default choice.
impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.as_deref().and_then(Self::parse).unwrap_or_default())
    }
}

/// Font family offered by the card editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum FontStyle {
    #[default]
    Arial,
    #[serde(rename = "Times New Roman")]
    TimesNewRoman,
    #[serde(rename = "Courier New")]
    CourierNew,
    Georgia,
    Verdana,
}

impl FontStyle {
    pub const ALL: [FontStyle; 5] = [
        FontStyle::Arial,
        FontStyle::TimesNewRoman,
        FontStyle::CourierNew,
        FontStyle::Georgia,
        FontStyle::Verdana,
    ];

    /// Font family name, also the wire value
    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Arial => "Arial",
            FontStyle::TimesNewRoman => "Times New Roman",
            FontStyle::CourierNew => "Courier New",
            FontStyle::Georgia => "Georgia",
            FontStyle::Verdana => "Verdana",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FontStyle {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.as_deref().and_then(Self::parse).unwrap_or_default())
    }
}

/// Visit counters for the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_visits: u64,
}

fn default_background_color() -> String {
    DEFAULT_BACKGROUND_COLOR.to_string()
}

fn default_text_color() -> String {
    DEFAULT_TEXT_COLOR.to_string()
}

fn default_active() -> bool {
    true
}

fn nullable_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn nullable_background<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default_background_color))
}

fn nullable_text_color<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default_text_color))
}

fn nullable_links<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<SocialLink>, D::Error> {
    Ok(Option::<Vec<SocialLink>>::deserialize(d)?.unwrap_or_default())
}
