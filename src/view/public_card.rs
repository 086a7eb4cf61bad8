//! Public Card Page
//!
//! Read-only view of one card, fetched by slug without credentials.

use crate::card::Card;
use crate::client::{ApiClient, ClientError, Transport};
use crate::i18n::{Locale, Message};

use super::{Redraw, ViewScope};

/// Loading until the fetch resolves; `Loaded` is final for the instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PublicCardState {
    #[default]
    Loading,
    /// Localized error text
    Error(String),
    Loaded(Card),
}

impl PublicCardState {
    /// Apply the fetch result. Media paths are made absolute on `api_base`.
    pub fn apply(&mut self, result: Result<Card, ClientError>, locale: Locale, api_base: &str) {
        if matches!(self, PublicCardState::Loaded(_)) {
            return;
        }

        *self = match result {
            Ok(card) => PublicCardState::Loaded(card.resolve_media(api_base)),
            Err(e) => {
                if e.is_not_found() {
                    tracing::debug!("Public card not found");
                } else {
                    tracing::warn!("Public card fetch failed: {}", e);
                }
                PublicCardState::Error(locale.text(Message::PublicError).to_string())
            }
        };
    }

    pub fn card(&self) -> Option<&Card> {
        match self {
            PublicCardState::Loaded(card) => Some(card),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PublicCardState::Loading)
    }
}

/// Drives a [`PublicCardState`] for one navigation to `/:slug`
pub struct PublicCardView<T> {
    api: ApiClient<T>,
    locale: Locale,
    state: PublicCardState,
    scope: ViewScope,
    redraw: Option<Redraw<PublicCardState>>,
}

impl<T: Transport> PublicCardView<T> {
    pub fn new(api: ApiClient<T>, locale: Locale) -> Self {
        Self {
            api,
            locale,
            state: PublicCardState::Loading,
            scope: ViewScope::new(),
            redraw: None,
        }
    }

    pub fn on_redraw(mut self, hook: impl FnMut(&PublicCardState) + 'static) -> Self {
        self.redraw = Some(Box::new(hook));
        self
    }

    pub fn state(&self) -> &PublicCardState {
        &self.state
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Fetch `slug` once. Does nothing after a card has been shown.
    pub async fn load(&mut self, slug: &str) -> &PublicCardState {
        if self.state.card().is_none() {
            if let Some(result) = self.scope.run(self.api.get_public_card(slug)).await {
                self.state.apply(result, self.locale, self.api.base_url());
                if let Some(hook) = self.redraw.as_mut() {
                    hook(&self.state);
                }
            }
        }
        &self.state
    }
}

impl<T> Drop for PublicCardView<T> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
