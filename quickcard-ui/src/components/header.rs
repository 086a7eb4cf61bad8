//! Header Component
//!
//! Brand, navigation links, language switcher and logout.

use leptos::*;
use leptos_router::*;

use quickcard::{Locale, Message, Route};

use crate::state::use_app;

/// Navigation header shown on every page
#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let locale = ctx.locale;
    let signed_in = ctx.signed_in;

    let logout = move |_: web_sys::MouseEvent| {
        ctx.logout();
        navigate(&Route::Login.path(), Default::default());
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🪪"</span>
                        <span class="text-xl font-bold text-white">"QuickCard"</span>
                    </A>

                    // Navigation links
                    <div class="flex items-center space-x-1">
                        <NavLink route=Route::About label=text(locale, Message::NavAbout) />
                        <NavLink route=Route::Contact label=text(locale, Message::NavContact) />

                        <Show
                            when=move || signed_in.get()
                            fallback=move || view! {
                                <NavLink route=Route::Register label=text(locale, Message::NavRegister) />
                                <NavLink route=Route::Login label=text(locale, Message::NavLogin) />
                            }
                        >
                            <NavLink route=Route::Dashboard label=text(locale, Message::NavDashboard) />
                            <button
                                on:click=logout.clone()
                                class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-red-600 transition-colors"
                            >
                                {text(locale, Message::Logout)}
                            </button>
                        </Show>

                        <LanguageSwitcher />
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Reactive translation of `message`
fn text(locale: RwSignal<Locale>, message: Message) -> Signal<&'static str> {
    Signal::derive(move || locale.get().text(message))
}

/// Individual navigation link
#[component]
fn NavLink(route: Route, label: Signal<&'static str>) -> impl IntoView {
    view! {
        <A
            href=route.path()
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}

/// Interface language selector
#[component]
fn LanguageSwitcher() -> impl IntoView {
    let ctx = use_app();
    let locale = ctx.locale;

    view! {
        <select
            on:change=move |ev| ctx.set_locale(Locale::parse(&event_target_value(&ev)))
            prop:value=move || locale.get().code()
            class="ml-2 bg-gray-700 rounded-lg px-3 py-2 text-white border border-gray-600"
        >
            {Locale::ALL
                .into_iter()
                .map(|l| view! { <option value=l.code()>{l.native_name()}</option> })
                .collect_view()}
        </select>
    }
}
