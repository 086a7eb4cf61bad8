//! View Models
//!
//! Each page keeps its state in a plain struct with synchronous `apply_*`
//! transitions. Drivers ([`Dashboard`], [`PublicCardView`], [`AuthView`])
//! issue API calls, feed the results through those transitions and then
//! call the page's redraw hook. The browser front-end runs the same
//! transitions inside its own signals.
//!
//! Every driver owns a [`ViewScope`]. Calls run under the scope; once it is
//! cancelled their results are dropped before they reach the state.

pub mod auth;
pub mod dashboard;
pub mod public_card;

pub use auth::{AuthForm, AuthMode, AuthState, AuthView};
pub use dashboard::{Dashboard, DashboardState, EditorMode};
pub use public_card::{PublicCardState, PublicCardView};

use std::future::Future;
use tokio_util::sync::CancellationToken;

pub use crate::routes::Navigation;

/// Progress of a view's initial fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Callback run after state changes so the caller can re-render
pub type Redraw<S> = Box<dyn FnMut(&S)>;

/// Cancellation boundary of one view instance
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token shared with anything that should stop with the view
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// End the scope; pending and future calls resolve to `None`.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `fut` unless the scope ends first.
    ///
    /// Returns `None` when cancelled, including when cancellation happened
    /// before the call or while it was in flight.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.token.is_cancelled() {
            return None;
        }

        let output = tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            output = fut => Some(output),
        };

        // A result that raced with teardown is still stale
        output.filter(|_| !self.token.is_cancelled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_returns_output() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_cancelled_scope_skips_call() {
        let scope = ViewScope::new();
        scope.cancel();

        let mut ran = false;
        let result = scope.run(async { ran = true }).await;
        assert_eq!(result, None);
        assert!(!ran);
    }

    #[tokio::test]
    async fn test_cancel_while_in_flight() {
        let scope = ViewScope::new();
        let handle = scope.clone();

        let result = scope
            .run(async move {
                handle.cancel();
                tokio::task::yield_now().await;
                "late"
            })
            .await;

        assert_eq!(result, None);
        assert!(scope.is_cancelled());
    }
}
