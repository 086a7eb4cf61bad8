//! Browser Token Storage
//!
//! Keeps the session token in `localStorage` under the shared key.

use quickcard::session::{SessionError, TokenStorage, TOKEN_STORAGE_KEY};

/// `localStorage` key for the chosen interface language
pub const LOCALE_STORAGE_KEY: &str = "locale";

/// [`TokenStorage`] backed by `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokens;

impl TokenStorage for LocalStorageTokens {
    fn load(&self) -> Result<Option<String>, SessionError> {
        local_storage()?
            .get_item(TOKEN_STORAGE_KEY)
            .map_err(|_| SessionError::Unavailable("localStorage read failed".into()))
    }

    fn store(&self, token: &str) -> Result<(), SessionError> {
        local_storage()?
            .set_item(TOKEN_STORAGE_KEY, token)
            .map_err(|_| SessionError::Unavailable("localStorage write failed".into()))
    }

    fn clear(&self) -> Result<(), SessionError> {
        local_storage()?
            .remove_item(TOKEN_STORAGE_KEY)
            .map_err(|_| SessionError::Unavailable("localStorage write failed".into()))
    }
}

fn local_storage() -> Result<web_sys::Storage, SessionError> {
    web_sys::window()
        .ok_or_else(|| SessionError::Unavailable("no window".into()))?
        .local_storage()
        .ok()
        .flatten()
        .ok_or_else(|| SessionError::Unavailable("localStorage disabled".into()))
}

/// Saved language, else the browser's, else English
pub fn initial_locale() -> quickcard::Locale {
    let window = web_sys::window();

    let saved = window
        .as_ref()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(LOCALE_STORAGE_KEY).ok().flatten());
    let browser = || window.as_ref().and_then(|w| w.navigator().language());

    saved
        .or_else(browser)
        .map(|code| quickcard::Locale::parse(&code))
        .unwrap_or_default()
}

pub fn save_locale(locale: quickcard::Locale) {
    if let Ok(storage) = local_storage() {
        let _ = storage.set_item(LOCALE_STORAGE_KEY, locale.code());
    }
}
