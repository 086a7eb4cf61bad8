//! Loading Component
//!
//! Spinners shown while a request is in flight.

use leptos::*;

/// Full-width loading spinner with an optional caption
#[component]
pub fn Loading(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12 space-y-3">
            <div class="loading-spinner w-8 h-8" />
            {label.map(|text| view! { <span class="text-gray-400 text-sm">{text}</span> })}
        </div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}
