//! Login and Registration
//!
//! Both forms exchange credentials for a token and hand it to the session
//! store. Signed-in users are sent straight to the dashboard.

use crate::card::ValidationError;
use crate::client::{ApiClient, ClientError, LoginRequest, RegisterRequest, TokenResponse, Transport};
use crate::i18n::{Locale, Message};
use crate::routes::{guard, Navigation, Route};
use crate::session::SessionStore;

use super::{Redraw, ViewScope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    pub fn route(self) -> Route {
        match self {
            AuthMode::Login => Route::Login,
            AuthMode::Register => Route::Register,
        }
    }

    fn fallback(self) -> Message {
        match self {
            AuthMode::Login => Message::LoginError,
            AuthMode::Register => Message::RegisterError,
        }
    }
}

/// Credential inputs; `email` is only used when registering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub mode: AuthMode,
    pub form: AuthForm,
    /// Inline error, already localized
    pub error: Option<String>,
    pub locale: Locale,
}

impl AuthState {
    pub fn new(mode: AuthMode, locale: Locale) -> Self {
        Self {
            mode,
            form: AuthForm::default(),
            error: None,
            locale,
        }
    }

    /// Every visible field is required
    pub fn validate(&self) -> Result<(), ValidationError> {
        let form = &self.form;
        if form.username.trim().is_empty() {
            return Err(ValidationError::Required("username"));
        }
        if self.mode == AuthMode::Register && form.email.trim().is_empty() {
            return Err(ValidationError::Required("email"));
        }
        if form.password.is_empty() {
            return Err(ValidationError::Required("password"));
        }
        Ok(())
    }

    pub fn login_request(&self) -> LoginRequest {
        LoginRequest {
            username: self.form.username.trim().to_string(),
            password: self.form.password.clone(),
        }
    }

    pub fn register_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.form.username.trim().to_string(),
            email: self.form.email.trim().to_string(),
            password: self.form.password.clone(),
        }
    }

    pub fn apply_invalid(&mut self, error: &ValidationError) {
        self.error = Some(self.locale.text(error.message()).to_string());
    }

    /// Start the session on success; returns where to go next.
    pub fn apply_token(
        &mut self,
        result: Result<TokenResponse, ClientError>,
        session: &SessionStore,
    ) -> Option<Navigation> {
        match result {
            Ok(response) => {
                session.login(response.token);
                self.error = None;
                self.form.password.clear();
                Some(Navigation::Redirect(Route::Dashboard))
            }
            Err(e) => {
                tracing::debug!(mode = ?self.mode, "Authentication failed: {}", e);
                self.error = Some(e.user_message(self.locale, self.mode.fallback()));
                None
            }
        }
    }
}

/// Drives the login or registration page
pub struct AuthView<T> {
    api: ApiClient<T>,
    state: AuthState,
    scope: ViewScope,
    redraw: Option<Redraw<AuthState>>,
}

impl<T: Transport> AuthView<T> {
    pub fn login(api: ApiClient<T>, locale: Locale) -> Self {
        Self::new(api, AuthMode::Login, locale)
    }

    pub fn register(api: ApiClient<T>, locale: Locale) -> Self {
        Self::new(api, AuthMode::Register, locale)
    }

    fn new(api: ApiClient<T>, mode: AuthMode, locale: Locale) -> Self {
        Self {
            api,
            state: AuthState::new(mode, locale),
            scope: ViewScope::new(),
            redraw: None,
        }
    }

    pub fn on_redraw(mut self, hook: impl FnMut(&AuthState) + 'static) -> Self {
        self.redraw = Some(Box::new(hook));
        self
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut AuthForm {
        &mut self.state.form
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Render the form, or skip it when a session already exists
    pub fn gate(&self) -> Navigation {
        guard(self.state.mode.route(), self.api.session().is_authenticated())
    }

    /// Submit the form. `Some` means the page should navigate away.
    pub async fn submit(&mut self) -> Option<Navigation> {
        if let Err(e) = self.state.validate() {
            self.state.apply_invalid(&e);
            self.redraw();
            return None;
        }

        let call = async {
            match self.state.mode {
                AuthMode::Login => self.api.login(&self.state.login_request()).await,
                AuthMode::Register => self.api.register(&self.state.register_request()).await,
            }
        };

        let result = self.scope.run(call).await?;
        let next = self.state.apply_token(result, self.api.session());
        self.redraw();
        next
    }

    fn redraw(&mut self) {
        if let Some(hook) = self.redraw.as_mut() {
            hook(&self.state);
        }
    }
}

impl<T> Drop for AuthView<T> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::MockTransport;
    use crate::client::Method;

    fn client(mock: &MockTransport, session: &SessionStore) -> ApiClient<MockTransport> {
        ApiClient::new(mock.clone(), "http://api.test", session.clone())
    }

    #[tokio::test]
    async fn test_login_starts_session() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/api/login/", 200, r#"{"token": "abc"}"#);
        let session = SessionStore::ephemeral();
        let mut view = AuthView::login(client(&mock, &session), Locale::En);
        assert_eq!(view.gate(), Navigation::Render(Route::Login));

        view.form_mut().username = " jane ".into();
        view.form_mut().password = "pw".into();

        assert_eq!(view.submit().await, Some(Navigation::Redirect(Route::Dashboard)));
        assert_eq!(session.token().as_deref(), Some("abc"));
        assert!(view.state().form.password.is_empty());
        assert_eq!(
            mock.requests()[0].body,
            crate::client::Body::Json(serde_json::json!({"username": "jane", "password": "pw"}))
        );
    }

    #[tokio::test]
    async fn test_missing_field_blocks_submission() {
        let mock = MockTransport::new();
        let session = SessionStore::ephemeral();
        let mut view = AuthView::register(client(&mock, &session), Locale::Ru);
        view.form_mut().username = "jane".into();
        view.form_mut().password = "pw".into();

        assert_eq!(view.submit().await, None);
        assert_eq!(
            view.state().error.as_deref(),
            Some(Locale::Ru.text(Message::FieldRequired))
        );
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_shown_verbatim() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Post,
            "/api/register/",
            400,
            r#"{"error": "Username already exists"}"#,
        );
        let session = SessionStore::ephemeral();
        let mut view = AuthView::register(client(&mock, &session), Locale::En);
        *view.form_mut() = AuthForm {
            username: "jane".into(),
            email: "jane@example.com".into(),
            password: "pw".into(),
        };

        assert_eq!(view.submit().await, None);
        assert_eq!(view.state().error.as_deref(), Some("Username already exists"));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_unreachable_server_uses_fallback() {
        let mock = MockTransport::new();
        let session = SessionStore::ephemeral();
        let mut view = AuthView::login(client(&mock, &session), Locale::En);
        view.form_mut().username = "jane".into();
        view.form_mut().password = "pw".into();

        assert_eq!(view.submit().await, None);
        assert_eq!(
            view.state().error.as_deref(),
            Some(Locale::En.text(Message::LoginError))
        );
    }

    #[test]
    fn test_gate_redirects_signed_in_user() {
        let session = SessionStore::ephemeral();
        session.login("abc");
        let view = AuthView::register(client(&MockTransport::new(), &session), Locale::En);
        assert_eq!(view.gate(), Navigation::Redirect(Route::Dashboard));
    }
}
