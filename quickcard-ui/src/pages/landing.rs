//! Landing Page

use leptos::*;
use leptos_router::*;

use quickcard::{guard, Message, Navigation, Route};

use crate::components::Carousel;
use crate::state::use_app;

#[component]
pub fn Landing() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let locale = ctx.locale;
    let signed_in = ctx.signed_in;
    let t = move |m: Message| locale.get().text(m);

    // Signed-in visitors belong on their dashboard
    create_effect(move |_| {
        if let Navigation::Redirect(to) = guard(Route::Landing, signed_in.get()) {
            navigate(&to.path(), Default::default());
        }
    });

    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center space-y-6">
            <div class="text-6xl">"🪪"</div>
            <h1 class="text-4xl font-bold">{move || t(Message::LandingTitle)}</h1>
            <p class="text-gray-400 max-w-xl">{move || t(Message::LandingDescription)}</p>

            <div class="flex space-x-3">
                <A
                    href=Route::Register.path()
                    class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    {move || t(Message::NavRegister)}
                </A>
                <A
                    href=Route::Login.path()
                    class="px-6 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors"
                >
                    {move || t(Message::NavLogin)}
                </A>
            </div>

            <Carousel />
        </div>
    }
}
