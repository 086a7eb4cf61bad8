//! Card Tile Component
//!
//! One entry of the dashboard list with view, edit and delete actions.

use leptos::*;
use leptos_router::*;

use quickcard::{Card, Message};

use crate::state::use_app;

#[component]
pub fn CardTile(
    card: Card,
    #[prop(into)]
    on_edit: Callback<Card>,
    #[prop(into)]
    on_delete: Callback<Card>,
) -> impl IntoView {
    let ctx = use_app();
    let locale = ctx.locale;
    let t = move |m: Message| locale.get().text(m);

    let accent = format!(
        "background-color: {}; color: {}; font-family: '{}'",
        card.background_color, card.text_color, card.font_style
    );
    let edit_card = card.clone();
    let delete_card = card.clone();

    view! {
        <div class="bg-gray-800 rounded-xl p-5 flex flex-col space-y-3">
            <div class="rounded-lg p-4" style=accent>
                <h3 class="text-lg font-semibold">{card.title.clone()}</h3>
                {(!card.subtitle.is_empty()).then(|| view! {
                    <p class="text-sm opacity-80">{card.subtitle.clone()}</p>
                })}
            </div>

            <div class="flex items-center justify-between text-sm text-gray-400">
                <span>{card.public_path()}</span>
                <span class=if card.is_active {
                    "px-2 py-1 rounded bg-green-700 text-white"
                } else {
                    "px-2 py-1 rounded bg-gray-700 line-through"
                }>
                    {move || t(Message::FieldIsActive)}
                </span>
            </div>

            <div class="flex space-x-2">
                <A
                    href=card.public_path()
                    class="flex-1 text-center px-3 py-2 rounded-lg bg-gray-700 hover:bg-gray-600 transition-colors"
                >
                    {move || t(Message::ViewCard)}
                </A>
                <button
                    on:click=move |_| on_edit.call(edit_card.clone())
                    class="flex-1 px-3 py-2 rounded-lg bg-primary-600 hover:bg-primary-700 transition-colors"
                >
                    {move || t(Message::Edit)}
                </button>
                <button
                    on:click=move |_| on_delete.call(delete_card.clone())
                    class="flex-1 px-3 py-2 rounded-lg bg-red-600 hover:bg-red-700 transition-colors"
                >
                    {move || t(Message::Delete)}
                </button>
            </div>
        </div>
    }
}
