//! Dashboard
//!
//! The signed-in user's card list with create, edit and delete. Local state
//! only changes after the server confirms a call; any other failure leaves
//! the list as it was and shows an inline error.

use crate::card::{Card, CardId, Stats};
use crate::client::{ApiClient, ClientError, FormPayload, Transport};
use crate::i18n::{Locale, Message};
use crate::routes::{Navigation, Route};
use crate::session::SessionStore;

use super::{Phase, Redraw, ViewScope};

/// Which editor, if any, is open. Opening one closes the other.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorMode {
    #[default]
    Browsing,
    Creating,
    /// Editing the latest server copy of this card
    Editing(Card),
}

/// Everything the dashboard renders
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    pub cards: Vec<Card>,
    pub mode: EditorMode,
    /// Inline error, already localized
    pub error: Option<String>,
    pub phase: Phase,
    pub total_visits: Option<u64>,
    pub locale: Locale,
}

impl DashboardState {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn is_creating(&self) -> bool {
        matches!(self.mode, EditorMode::Creating)
    }

    /// Card currently open in the edit form
    pub fn editing(&self) -> Option<&Card> {
        match &self.mode {
            EditorMode::Editing(card) => Some(card),
            _ => None,
        }
    }

    pub fn begin_load(&mut self) {
        self.phase = Phase::Loading;
    }

    /// Open the create form, or close it if already open
    pub fn toggle_create(&mut self) {
        self.mode = if self.is_creating() {
            EditorMode::Browsing
        } else {
            EditorMode::Creating
        };
        self.error = None;
    }

    pub fn close_editor(&mut self) {
        self.mode = EditorMode::Browsing;
    }

    pub fn apply_list(&mut self, result: Result<Vec<Card>, ClientError>, session: &SessionStore) {
        match result {
            Ok(cards) => {
                tracing::debug!(count = cards.len(), "Cards loaded");
                self.cards = cards;
                self.phase = Phase::Loaded;
                self.error = None;
            }
            Err(e) => {
                self.phase = Phase::Failed;
                self.fail(e, Message::LoadCardsError, session);
            }
        }
    }

    pub fn apply_edit_target(&mut self, result: Result<Card, ClientError>, session: &SessionStore) {
        match result {
            Ok(card) => {
                self.mode = EditorMode::Editing(card);
                self.error = None;
            }
            Err(e) => self.fail(e, Message::LoadCardError, session),
        }
    }

    /// Append the server's copy of a new card. Returns true on success.
    pub fn apply_created(&mut self, result: Result<Card, ClientError>, session: &SessionStore) -> bool {
        match result {
            Ok(card) => {
                tracing::info!(slug = %card.slug, "Card created");
                self.cards.push(card);
                self.mode = EditorMode::Browsing;
                self.error = None;
                true
            }
            Err(e) => {
                self.fail(e, Message::CreateError, session);
                false
            }
        }
    }

    /// Replace the list entry with the same id. Returns true on success.
    pub fn apply_updated(&mut self, result: Result<Card, ClientError>, session: &SessionStore) -> bool {
        match result {
            Ok(card) => {
                tracing::info!(slug = %card.slug, "Card updated");
                if let Some(slot) = self.cards.iter_mut().find(|c| c.id == card.id) {
                    *slot = card;
                }
                self.mode = EditorMode::Browsing;
                self.error = None;
                true
            }
            Err(e) => {
                self.fail(e, Message::EditError, session);
                false
            }
        }
    }

    pub fn apply_deleted(
        &mut self,
        id: CardId,
        result: Result<(), ClientError>,
        session: &SessionStore,
    ) -> bool {
        match result {
            Ok(()) => {
                tracing::info!(id, "Card deleted");
                self.cards.retain(|c| c.id != id);
                if self.editing().is_some_and(|c| c.id == id) {
                    self.mode = EditorMode::Browsing;
                }
                self.error = None;
                true
            }
            Err(e) => {
                self.fail(e, Message::DeleteError, session);
                false
            }
        }
    }

    /// Visit counters are optional; failures other than 401 are only logged.
    pub fn apply_stats(&mut self, result: Result<Stats, ClientError>, session: &SessionStore) {
        match result {
            Ok(stats) => self.total_visits = Some(stats.total_visits),
            Err(ClientError::Unauthorized) => session.invalidate("stats request unauthorized"),
            Err(e) => tracing::debug!("Stats unavailable: {}", e),
        }
    }

    fn fail(&mut self, error: ClientError, fallback: Message, session: &SessionStore) {
        if error.is_unauthorized() {
            session.invalidate("dashboard request unauthorized");
        }
        self.error = Some(error.user_message(self.locale, fallback));
    }
}

/// Drives a [`DashboardState`] against the API
pub struct Dashboard<T> {
    api: ApiClient<T>,
    state: DashboardState,
    scope: ViewScope,
    redraw: Option<Redraw<DashboardState>>,
}

impl<T: Transport> Dashboard<T> {
    pub fn new(api: ApiClient<T>, locale: Locale) -> Self {
        Self {
            api,
            state: DashboardState::new(locale),
            scope: ViewScope::new(),
            redraw: None,
        }
    }

    /// Call `hook` after every state change
    pub fn on_redraw(mut self, hook: impl FnMut(&DashboardState) + 'static) -> Self {
        self.redraw = Some(Box::new(hook));
        self
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Load the card list, or send anonymous users to the login page.
    pub async fn mount(&mut self) -> Navigation {
        if !self.api.session().is_authenticated() {
            return Navigation::Redirect(Route::Login);
        }

        self.state.begin_load();
        self.redraw();

        if let Some(result) = self.scope.run(self.api.list_cards()).await {
            self.state.apply_list(result, self.api.session());
            self.redraw();
        }

        if !self.api.session().is_authenticated() {
            return Navigation::Redirect(Route::Login);
        }

        self.refresh_stats().await;
        if !self.api.session().is_authenticated() {
            return Navigation::Redirect(Route::Login);
        }

        Navigation::Render(Route::Dashboard)
    }

    pub async fn refresh_stats(&mut self) {
        if let Some(result) = self.scope.run(self.api.stats()).await {
            self.state.apply_stats(result, self.api.session());
            self.redraw();
        }
    }

    pub fn toggle_create(&mut self) {
        self.state.toggle_create();
        self.redraw();
    }

    /// Open the edit form with a fresh copy of `card`; `None` closes it.
    pub async fn toggle_edit(&mut self, card: Option<&Card>) {
        let Some(card) = card else {
            self.state.close_editor();
            self.redraw();
            return;
        };

        let slug = card.slug.clone();
        if let Some(result) = self.scope.run(self.api.get_card(&slug)).await {
            self.state.apply_edit_target(result, self.api.session());
            self.redraw();
        }
    }

    /// Delete card `id` once `confirm` agrees. Returns true if it was removed.
    pub async fn delete(&mut self, id: CardId, confirm: impl FnOnce(&Card) -> bool) -> bool {
        let Some(card) = self.state.card(id) else {
            tracing::warn!(id, "Delete requested for unknown card");
            return false;
        };
        if !confirm(card) {
            return false;
        }

        let slug = card.slug.clone();
        let Some(result) = self.scope.run(self.api.delete_card(&slug)).await else {
            return false;
        };

        let removed = self.state.apply_deleted(id, result, self.api.session());
        self.redraw();
        removed
    }

    pub async fn submit_create(&mut self, payload: FormPayload) -> bool {
        let Some(result) = self.scope.run(self.api.create_card(payload)).await else {
            return false;
        };

        let created = self.state.apply_created(result, self.api.session());
        self.redraw();
        created
    }

    /// Save the card open in the edit form
    pub async fn submit_edit(&mut self, payload: FormPayload) -> bool {
        let Some(slug) = self.state.editing().map(|c| c.slug.clone()) else {
            tracing::warn!("Edit submitted with no card open");
            return false;
        };

        let Some(result) = self.scope.run(self.api.update_card(&slug, payload)).await else {
            return false;
        };

        let updated = self.state.apply_updated(result, self.api.session());
        self.redraw();
        updated
    }

    fn redraw(&mut self) {
        if let Some(hook) = self.redraw.as_mut() {
            hook(&self.state);
        }
    }
}

impl<T> Drop for Dashboard<T> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardDraft;
    use crate::client::testing::MockTransport;
    use crate::client::Method;
    use crate::view::AuthView;
    use std::cell::Cell;
    use std::rc::Rc;

    const TWO_CARDS: &str = r#"[{"id": 1, "slug": "a"}, {"id": 2, "slug": "b"}]"#;

    fn dashboard(mock: &MockTransport, session: &SessionStore) -> Dashboard<MockTransport> {
        let api = ApiClient::new(mock.clone(), "http://api.test", session.clone());
        Dashboard::new(api, Locale::En)
    }

    fn signed_in() -> SessionStore {
        let session = SessionStore::ephemeral();
        session.login("t0k");
        session
    }

    fn card(json: &str) -> Card {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_mount_without_session_redirects() {
        let mock = MockTransport::new();
        let mut dash = dashboard(&mock, &SessionStore::ephemeral());

        assert_eq!(dash.mount().await, Navigation::Redirect(Route::Login));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_mount_redirects_when_stats_end_session() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/cards/", 200, TWO_CARDS);
        mock.respond(Method::Get, "/api/stats/", 401, r#"{"detail": "Token expired"}"#);
        let session = signed_in();
        let mut dash = dashboard(&mock, &session);

        assert_eq!(dash.mount().await, Navigation::Redirect(Route::Login));
        assert!(!session.is_authenticated());
        assert_eq!(dash.state().cards.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_after_confirmation() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/cards/", 200, TWO_CARDS);
        mock.respond(Method::Delete, "/api/cards/a/", 204, "");
        let mut dash = dashboard(&mock, &signed_in());

        assert_eq!(dash.mount().await, Navigation::Render(Route::Dashboard));

        let mut asked = None;
        let removed = dash
            .delete(1, |c| {
                asked = Some(c.slug.clone());
                true
            })
            .await;

        assert!(removed);
        assert_eq!(asked.as_deref(), Some("a"));
        assert_eq!(dash.state().cards, vec![card(r#"{"id": 2, "slug": "b"}"#)]);
        assert_eq!(mock.count(Method::Delete, "/api/cards/a/"), 1);
        assert_eq!(mock.count(Method::Delete, "/api/cards/b/"), 0);
    }

    #[tokio::test]
    async fn test_delete_declined_sends_nothing() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/cards/", 200, TWO_CARDS);
        let mut dash = dashboard(&mock, &signed_in());
        dash.mount().await;

        assert!(!dash.delete(1, |_| false).await);
        assert!(!dash.delete(99, |_| true).await);
        assert_eq!(dash.state().cards.len(), 2);
        assert_eq!(mock.count(Method::Delete, "/api/cards/a/"), 0);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_list() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/cards/", 200, TWO_CARDS);
        mock.respond(Method::Delete, "/api/cards/a/", 500, "");
        let mut dash = dashboard(&mock, &signed_in());
        dash.mount().await;

        assert!(!dash.delete(1, |_| true).await);
        assert_eq!(dash.state().cards.len(), 2);
        assert_eq!(
            dash.state().error.as_deref(),
            Some(Locale::En.text(Message::DeleteError))
        );
    }

    #[tokio::test]
    async fn test_register_then_create_card() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/api/register/", 201, r#"{"token": "fresh"}"#);
        mock.respond(Method::Get, "/api/cards/", 200, "[]");
        mock.respond(
            Method::Post,
            "/api/cards/",
            201,
            r#"{"id": 5, "slug": "jane-doe", "title": "Jane Doe", "is_active": true}"#,
        );
        let session = SessionStore::ephemeral();
        let api = ApiClient::new(mock.clone(), "http://api.test", session.clone());

        let mut auth = AuthView::register(api.clone(), Locale::En);
        auth.form_mut().username = "jane".into();
        auth.form_mut().email = "jane@example.com".into();
        auth.form_mut().password = "secret".into();
        assert_eq!(auth.submit().await, Some(Navigation::Redirect(Route::Dashboard)));
        assert_eq!(session.token().as_deref(), Some("fresh"));

        let mut dash = Dashboard::new(api, Locale::En);
        assert_eq!(dash.mount().await, Navigation::Render(Route::Dashboard));
        assert_eq!(mock.count(Method::Get, "/api/cards/"), 1);

        dash.toggle_create();
        let mut draft = CardDraft::new();
        draft.title = "Jane Doe".into();
        assert!(dash.submit_create(draft.to_payload().unwrap()).await);

        let expected = card(r#"{"id": 5, "slug": "jane-doe", "title": "Jane Doe", "is_active": true}"#);
        assert_eq!(dash.state().cards, vec![expected]);
        assert_eq!(dash.state().mode, EditorMode::Browsing);
        assert_eq!(mock.count(Method::Get, "/api/cards/"), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/cards/", 401, r#"{"detail": "Invalid token."}"#);
        let session = signed_in();
        let mut dash = dashboard(&mock, &session);

        assert_eq!(dash.mount().await, Navigation::Redirect(Route::Login));
        assert!(!session.is_authenticated());

        // Next mount redirects without touching the network
        assert_eq!(dash.mount().await, Navigation::Redirect(Route::Login));
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_replaces_entry_by_id() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/cards/", 200, TWO_CARDS);
        mock.respond(Method::Get, "/api/cards/b/", 200, r#"{"id": 2, "slug": "b", "title": "Old"}"#);
        mock.respond(Method::Put, "/api/cards/b/", 200, r#"{"id": 2, "slug": "b", "title": "New"}"#);
        let mut dash = dashboard(&mock, &signed_in());
        dash.mount().await;

        let target = dash.state().cards[1].clone();
        dash.toggle_edit(Some(&target)).await;
        assert_eq!(dash.state().editing().map(|c| c.title.as_str()), Some("Old"));

        let mut draft = CardDraft::from_card(dash.state().editing().unwrap());
        draft.title = "New".into();
        assert!(dash.submit_edit(draft.to_payload().unwrap()).await);

        assert_eq!(dash.state().cards[0].slug, "a");
        assert_eq!(dash.state().cards[1].title, "New");
        assert_eq!(dash.state().mode, EditorMode::Browsing);
    }

    #[tokio::test]
    async fn test_editor_modes_are_exclusive() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/cards/", 200, TWO_CARDS);
        mock.respond(Method::Get, "/api/cards/a/", 200, r#"{"id": 1, "slug": "a"}"#);
        let mut dash = dashboard(&mock, &signed_in());
        dash.mount().await;

        dash.toggle_create();
        assert!(dash.state().is_creating());

        let target = dash.state().cards[0].clone();
        dash.toggle_edit(Some(&target)).await;
        assert!(!dash.state().is_creating());
        assert!(dash.state().editing().is_some());

        dash.toggle_create();
        assert!(dash.state().is_creating());
        assert!(dash.state().editing().is_none());

        dash.toggle_create();
        assert_eq!(dash.state().mode, EditorMode::Browsing);

        dash.toggle_edit(Some(&target)).await;
        dash.toggle_edit(None).await;
        assert_eq!(dash.state().mode, EditorMode::Browsing);
    }

    #[tokio::test]
    async fn test_edit_load_failure_shows_server_message() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/cards/", 200, TWO_CARDS);
        mock.respond(Method::Get, "/api/cards/a/", 404, r#"{"detail": "Not found."}"#);
        let mut dash = dashboard(&mock, &signed_in());
        dash.mount().await;
        dash.toggle_create();

        let target = dash.state().cards[0].clone();
        dash.toggle_edit(Some(&target)).await;

        assert_eq!(dash.state().error.as_deref(), Some("Not found."));
        assert!(dash.state().is_creating());
    }

    #[tokio::test]
    async fn test_cancelled_scope_leaves_state_untouched() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/cards/", 200, TWO_CARDS);
        mock.respond(Method::Post, "/api/cards/", 201, r#"{"id": 9, "slug": "late"}"#);
        let mut dash = dashboard(&mock, &signed_in());
        dash.mount().await;
        let before = dash.state().clone();

        dash.scope().cancel();
        let mut draft = CardDraft::new();
        draft.title = "Late".into();
        assert!(!dash.submit_create(draft.to_payload().unwrap()).await);

        assert_eq!(dash.state(), &before);
        assert_eq!(mock.count(Method::Post, "/api/cards/"), 0);
    }

    #[tokio::test]
    async fn test_redraw_after_each_resolution() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/api/cards/", 200, TWO_CARDS);
        mock.respond(Method::Get, "/api/stats/", 200, r#"{"total_visits": 42}"#);
        let redraws = Rc::new(Cell::new(0));
        let seen = redraws.clone();
        let mut dash = dashboard(&mock, &signed_in()).on_redraw(move |_| seen.set(seen.get() + 1));

        dash.mount().await;

        // loading, list, stats
        assert_eq!(redraws.get(), 3);
        assert_eq!(dash.state().total_visits, Some(42));
        assert_eq!(dash.state().phase, Phase::Loaded);
    }
}
