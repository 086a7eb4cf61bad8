//! Contact Page

use leptos::*;

use quickcard::Message;

use crate::state::use_app;

#[component]
pub fn Contact() -> impl IntoView {
    let locale = use_app().locale;

    view! {
        <div class="max-w-2xl mx-auto space-y-4">
            <h1 class="text-3xl font-bold">{move || locale.get().text(Message::ContactTitle)}</h1>
            <p class="text-gray-300">{move || locale.get().text(Message::ContactDescription)}</p>
        </div>
    }
}
