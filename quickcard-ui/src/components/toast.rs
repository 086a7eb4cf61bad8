//! Toast Component
//!
//! Bottom-right notices fed by [`AppContext::show_success`] and
//! [`AppContext::show_error`]. They clear themselves; a click clears early.
//!
//! [`AppContext::show_success`]: crate::state::AppContext::show_success
//! [`AppContext::show_error`]: crate::state::AppContext::show_error

use leptos::*;

use crate::state::use_app;

#[component]
pub fn Toast() -> impl IntoView {
    let ctx = use_app();

    view! {
        <div class="fixed bottom-6 right-4 z-50 space-y-2">
            <Notice message=ctx.success tone="bg-green-600" icon="✓" />
            <Notice message=ctx.error tone="bg-red-600" icon="✕" />
        </div>
    }
}

#[component]
fn Notice(message: RwSignal<Option<String>>, tone: &'static str, icon: &'static str) -> impl IntoView {
    move || {
        message.get().map(|text| view! {
            <button
                on:click=move |_| message.set(None)
                class=format!(
                    "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg animate-slide-in",
                    tone
                )
            >
                <span class="text-lg">{icon}</span>
                <span class="text-sm font-medium">{text}</span>
            </button>
        })
    }
}
