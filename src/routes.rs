//! Route Table
//!
//! Maps URL paths to views and decides, from session presence alone,
//! whether a view renders or redirects.

use std::fmt;

/// Client-visible pages
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    About,
    Contact,
    /// Public card page, `/:slug`
    PublicCard(String),
}

/// Outcome of resolving a route against the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

/// First path segments that name pages and can never be card slugs
const RESERVED: [&str; 6] = ["", "login", "register", "dashboard", "about", "contact"];

impl Route {
    /// Resolve a path such as `/dashboard` or `/jane-doe`.
    ///
    /// Query strings and fragments are ignored. Paths with more than one
    /// segment match nothing and fall back to the landing page.
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_matches('/');

        match path {
            "" => Route::Landing,
            "login" => Route::Login,
            "register" => Route::Register,
            "dashboard" => Route::Dashboard,
            "about" => Route::About,
            "contact" => Route::Contact,
            slug if !slug.contains('/') => {
                let slug = urlencoding::decode(slug)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| slug.to_string());
                Route::PublicCard(slug)
            }
            _ => Route::Landing,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::About => "/about".to_string(),
            Route::Contact => "/contact".to_string(),
            Route::PublicCard(slug) => format!("/{}", urlencoding::encode(slug)),
        }
    }

    /// Whether the page needs a signed-in user
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Dashboard)
    }

    /// Pages that make no sense once signed in
    pub fn is_guest_only(&self) -> bool {
        matches!(self, Route::Landing | Route::Login | Route::Register)
    }

    /// True if `slug` collides with a page name
    pub fn is_reserved(slug: &str) -> bool {
        RESERVED.contains(&slug.trim_matches('/'))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Gate `route` on session presence.
///
/// The dashboard sends anonymous users to the login page; landing, login
/// and register send signed-in users to the dashboard.
pub fn guard(route: Route, authenticated: bool) -> Navigation {
    if route.requires_session() && !authenticated {
        tracing::debug!(%route, "No session, redirecting to login");
        return Navigation::Redirect(Route::Login);
    }
    if route.is_guest_only() && authenticated {
        return Navigation::Redirect(Route::Dashboard);
    }
    Navigation::Render(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pages() {
        assert_eq!(Route::parse("/"), Route::Landing);
        assert_eq!(Route::parse(""), Route::Landing);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/register/"), Route::Register);
        assert_eq!(Route::parse("/dashboard?tab=1"), Route::Dashboard);
        assert_eq!(Route::parse("/about"), Route::About);
        assert_eq!(Route::parse("/contact#form"), Route::Contact);
    }

    #[test]
    fn test_parse_slug_and_fallback() {
        assert_eq!(Route::parse("/jane-doe"), Route::PublicCard("jane-doe".into()));
        assert_eq!(Route::parse("/a%20b"), Route::PublicCard("a b".into()));
        assert_eq!(Route::parse("/jane/extra"), Route::Landing);
    }

    #[test]
    fn test_path_round_trip() {
        for route in [
            Route::Landing,
            Route::Login,
            Route::Dashboard,
            Route::PublicCard("a b".into()),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_reserved_names() {
        assert!(Route::is_reserved("dashboard"));
        assert!(Route::is_reserved("/login/"));
        assert!(!Route::is_reserved("jane"));
    }

    #[test]
    fn test_guard_dashboard() {
        assert_eq!(
            guard(Route::Dashboard, false),
            Navigation::Redirect(Route::Login)
        );
        assert_eq!(
            guard(Route::Dashboard, true),
            Navigation::Render(Route::Dashboard)
        );
    }

    #[test]
    fn test_guard_guest_pages() {
        for route in [Route::Landing, Route::Login, Route::Register] {
            assert_eq!(
                guard(route.clone(), true),
                Navigation::Redirect(Route::Dashboard)
            );
            assert_eq!(guard(route.clone(), false), Navigation::Render(route));
        }
    }

    #[test]
    fn test_guard_public_pages_ignore_session() {
        let card = Route::PublicCard("jane".into());
        assert_eq!(guard(card.clone(), false), Navigation::Render(card.clone()));
        assert_eq!(guard(card.clone(), true), Navigation::Render(card));
        assert_eq!(guard(Route::About, true), Navigation::Render(Route::About));
    }
}
