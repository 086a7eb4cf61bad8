//! Application Context
//!
//! The session store and API client are created once in [`provide_app_context`]
//! and reached by every page through [`use_app`]. Signals mirror the bits
//! the UI reacts to: whether a token exists and the interface language.

use leptos::*;

use quickcard::session::SessionStore;
use quickcard::{Locale, Message};

use super::storage::{initial_locale, save_locale, LocalStorageTokens};
use crate::api::{api_base, Api, GlooTransport};

/// Context provided to all components
#[derive(Clone)]
pub struct AppContext {
    pub session: SessionStore,
    pub api: Api,
    /// True while the session holds a token
    pub signed_in: RwSignal<bool>,
    pub locale: RwSignal<Locale>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Restore the session from `localStorage` and provide the context
pub fn provide_app_context() {
    let session = SessionStore::open(LocalStorageTokens);
    let api = Api::new(GlooTransport, &api_base(), session.clone());

    let ctx = AppContext {
        signed_in: create_rw_signal(session.is_authenticated()),
        session,
        api,
        locale: create_rw_signal(initial_locale()),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(ctx);
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext not found")
}

impl AppContext {
    /// Translate `message` for one-off text (toasts, dialogs). Views read
    /// `locale` directly so they re-render on a language switch.
    pub fn t(&self, message: Message) -> &'static str {
        self.locale.get_untracked().text(message)
    }

    pub fn set_locale(&self, locale: Locale) {
        save_locale(locale);
        self.locale.set(locale);
    }

    /// Re-read the session after anything that may have changed it
    pub fn sync_session(&self) {
        let signed_in = self.session.is_authenticated();
        if self.signed_in.get_untracked() != signed_in {
            self.signed_in.set(signed_in);
        }
    }

    pub fn logout(&self) {
        self.session.logout();
        self.sync_session();
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
