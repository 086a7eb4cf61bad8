//! Login and Registration Pages
//!
//! Both pages share one form over [`AuthState`]. A successful submit stores
//! the token and moves on to the dashboard; visiting either page with a
//! session skips straight there.

use leptos::*;
use leptos_router::*;

use quickcard::view::{AuthMode, AuthState, ViewScope};
use quickcard::{guard, Message, Navigation};

use crate::components::InlineLoading;
use crate::state::use_app;

#[component]
pub fn Login() -> impl IntoView {
    view! { <AuthPage mode=AuthMode::Login /> }
}

#[component]
pub fn Register() -> impl IntoView {
    view! { <AuthPage mode=AuthMode::Register /> }
}

#[component]
fn AuthPage(mode: AuthMode) -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let locale = ctx.locale;
    let signed_in = ctx.signed_in;
    let t = move |m: Message| locale.get().text(m);

    let state = create_rw_signal(AuthState::new(mode, locale.get_untracked()));
    let busy = create_rw_signal(false);

    let scope = ViewScope::new();
    on_cleanup({
        let scope = scope.clone();
        move || scope.cancel()
    });

    // Already signed in (or just signed in elsewhere)
    let redirect = navigate.clone();
    create_effect(move |_| {
        if let Navigation::Redirect(to) = guard(mode.route(), signed_in.get()) {
            redirect(&to.path(), Default::default());
        }
    });

    create_effect(move |_| {
        let current = locale.get();
        state.update(|s| s.locale = current);
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        if let Err(e) = state.with_untracked(AuthState::validate) {
            state.update(|s| s.apply_invalid(&e));
            return;
        }

        let (login, register) = state.with_untracked(|s| (s.login_request(), s.register_request()));
        let ctx = ctx.clone();
        let scope = scope.clone();
        let navigate = navigate.clone();
        busy.set(true);

        spawn_local(async move {
            let call = async {
                match mode {
                    AuthMode::Login => ctx.api.login(&login).await,
                    AuthMode::Register => ctx.api.register(&register).await,
                }
            };
            let Some(result) = scope.run(call).await else {
                return;
            };

            busy.set(false);
            let next = state
                .try_update(|s| s.apply_token(result, &ctx.session))
                .flatten();
            ctx.sync_session();

            if let Some(Navigation::Redirect(to)) = next {
                navigate(&to.path(), Default::default());
            }
        });
    };

    let (title, action, switch_text, switch_to) = match mode {
        AuthMode::Login => (
            Message::LoginTitle,
            Message::LoginSubmit,
            Message::LoginNoAccount,
            AuthMode::Register,
        ),
        AuthMode::Register => (
            Message::RegisterTitle,
            Message::RegisterSubmit,
            Message::RegisterHaveAccount,
            AuthMode::Login,
        ),
    };

    view! {
        <div class="max-w-md mx-auto">
            <form on:submit=submit class="bg-gray-800 rounded-xl p-6 space-y-4">
                <h1 class="text-2xl font-bold">{move || t(title)}</h1>

                <Field
                    label=Signal::derive(move || t(Message::Username))
                    value=Signal::derive(move || state.with(|s| s.form.username.clone()))
                    on_input=move |v: String| state.update(|s| s.form.username = v)
                />

                {(mode == AuthMode::Register).then(|| view! {
                    <Field
                        label=Signal::derive(move || t(Message::FieldEmail))
                        kind="email"
                        value=Signal::derive(move || state.with(|s| s.form.email.clone()))
                        on_input=move |v: String| state.update(|s| s.form.email = v)
                    />
                })}

                <Field
                    label=Signal::derive(move || t(Message::Password))
                    kind="password"
                    value=Signal::derive(move || state.with(|s| s.form.password.clone()))
                    on_input=move |v: String| state.update(|s| s.form.password = v)
                />

                {move || state.with(|s| s.error.clone()).map(|error| view! {
                    <p class="text-red-400 text-sm">{error}</p>
                })}

                <button
                    type="submit"
                    disabled=move || busy.get()
                    class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           disabled:cursor-not-allowed rounded-lg py-3 font-semibold
                           transition-colors flex items-center justify-center space-x-2"
                >
                    {move || busy.get().then(|| view! { <InlineLoading /> })}
                    <span>{move || t(action)}</span>
                </button>

                <p class="text-sm text-gray-400 text-center">
                    <A href=switch_to.route().path() class="hover:text-white">
                        {move || t(switch_text)}
                    </A>
                </p>
            </form>
        </div>
    }
}

#[component]
fn Field(
    label: Signal<&'static str>,
    value: Signal<String>,
    #[prop(into)]
    on_input: Callback<String>,
    #[prop(default = "text")]
    kind: &'static str,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <input
                type=kind
                required=true
                prop:value=value
                on:input=move |ev| on_input.call(event_target_value(&ev))
                class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white border border-gray-600
                       focus:border-primary-500 focus:outline-none"
            />
        </div>
    }
}
