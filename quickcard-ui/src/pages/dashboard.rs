//! Dashboard Page
//!
//! The signed-in user's cards. Every action runs against the API first and
//! only the confirmed result is applied to [`DashboardState`].

use std::future::Future;

use leptos::*;
use leptos_router::*;

use quickcard::view::{DashboardState, EditorMode, Phase, ViewScope};
use quickcard::{guard, Card, FormPayload, Message, Navigation, Route};

use crate::api::Api;
use crate::components::{CardForm, CardTile, Loading};
use crate::state::{use_app, AppContext};

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let locale = ctx.locale;
    let signed_in = ctx.signed_in;
    let t = move |m: Message| locale.get().text(m);

    let state = create_rw_signal(DashboardState::new(locale.get_untracked()));
    let saving = create_rw_signal(false);

    let scope = ViewScope::new();
    on_cleanup({
        let scope = scope.clone();
        move || scope.cancel()
    });

    // Covers both arriving without a session and losing it to a 401
    create_effect(move |_| {
        if let Navigation::Redirect(to) = guard(Route::Dashboard, signed_in.get()) {
            navigate(&to.path(), Default::default());
        }
    });

    create_effect(move |_| {
        let current = locale.get();
        state.update(|s| s.locale = current);
    });

    if ctx.session.is_authenticated() {
        state.update(DashboardState::begin_load);
        spawn_call(
            &ctx,
            &scope,
            |api| async move { api.list_cards().await },
            move |result, ctx| state.update(|s| s.apply_list(result, &ctx.session)),
        );
        spawn_call(
            &ctx,
            &scope,
            |api| async move { api.stats().await },
            move |result, ctx| state.update(|s| s.apply_stats(result, &ctx.session)),
        );
    }

    let on_edit = Callback::new({
        let ctx = ctx.clone();
        let scope = scope.clone();
        move |card: Card| {
            if state.with_untracked(|s| s.editing().is_some_and(|c| c.id == card.id)) {
                state.update(DashboardState::close_editor);
                return;
            }
            spawn_call(
                &ctx,
                &scope,
                move |api| async move { api.get_card(&card.slug).await },
                move |result, ctx| state.update(|s| s.apply_edit_target(result, &ctx.session)),
            );
        }
    });

    let on_delete = Callback::new({
        let ctx = ctx.clone();
        let scope = scope.clone();
        move |card: Card| {
            let question = format!("{} \"{}\"", ctx.t(Message::ConfirmDelete), card.title);
            if !window().confirm_with_message(&question).unwrap_or(false) {
                return;
            }
            let id = card.id;
            spawn_call(
                &ctx,
                &scope,
                move |api| async move { api.delete_card(&card.slug).await },
                move |result, ctx| {
                    if state.try_update(|s| s.apply_deleted(id, result, &ctx.session)) == Some(true) {
                        ctx.show_success(ctx.t(Message::CardDeleted));
                    }
                },
            );
        }
    });

    let on_create = Callback::new({
        let ctx = ctx.clone();
        let scope = scope.clone();
        move |payload: FormPayload| {
            saving.set(true);
            spawn_call(
                &ctx,
                &scope,
                move |api| async move { api.create_card(payload).await },
                move |result, ctx| {
                    saving.set(false);
                    if state.try_update(|s| s.apply_created(result, &ctx.session)) == Some(true) {
                        ctx.show_success(ctx.t(Message::CardSaved));
                    }
                },
            );
        }
    });

    let on_save = Callback::new({
        let ctx = ctx.clone();
        let scope = scope.clone();
        move |payload: FormPayload| {
            let Some(slug) = state.with_untracked(|s| s.editing().map(|c| c.slug.clone())) else {
                return;
            };
            saving.set(true);
            spawn_call(
                &ctx,
                &scope,
                move |api| async move { api.update_card(&slug, payload).await },
                move |result, ctx| {
                    saving.set(false);
                    if state.try_update(|s| s.apply_updated(result, &ctx.session)) == Some(true) {
                        ctx.show_success(ctx.t(Message::CardSaved));
                    }
                },
            );
        }
    });

    let on_cancel = Callback::new(move |_: ()| state.update(DashboardState::close_editor));

    // Only re-render the editor when it opens, closes or switches card
    let mode = create_memo(move |_| state.with(|s| s.mode.clone()));

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">{move || t(Message::DashboardCards)}</h1>
                    {move || state.with(|s| s.total_visits).map(|visits| view! {
                        <p class="text-gray-400 mt-1">{t(Message::TotalVisits)}": "{visits}</p>
                    })}
                </div>
                <button
                    on:click=move |_| state.update(DashboardState::toggle_create)
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    {move || t(Message::CreateCard)}
                </button>
            </div>

            {move || state.with(|s| s.error.clone()).map(|error| view! {
                <div class="bg-red-900/50 border border-red-700 rounded-lg px-4 py-3 text-red-200">
                    {error}
                </div>
            })}

            {move || match mode.get() {
                EditorMode::Browsing => ().into_view(),
                EditorMode::Creating => view! {
                    <CardForm on_submit=on_create on_cancel=on_cancel busy=saving />
                }
                .into_view(),
                EditorMode::Editing(card) => view! {
                    <CardForm initial=card on_submit=on_save on_cancel=on_cancel busy=saving />
                }
                .into_view(),
            }}

            {move || {
                let (phase, cards) = state.with(|s| (s.phase, s.cards.clone()));
                if phase == Phase::Loading {
                    view! { <Loading /> }.into_view()
                } else if cards.is_empty() {
                    view! {
                        <p class="text-gray-400 text-center py-12">{t(Message::NoCards)}</p>
                    }
                    .into_view()
                } else {
                    view! {
                        <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-6">
                            {cards
                                .into_iter()
                                .map(|card| view! {
                                    <CardTile card on_edit=on_edit on_delete=on_delete />
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_view()
                }
            }}
        </div>
    }
}

/// Run an API call in the page scope and apply its result.
///
/// Nothing is applied once the page is gone. The header is resynced
/// afterwards since a 401 may have ended the session.
fn spawn_call<Fut>(
    ctx: &AppContext,
    scope: &ViewScope,
    call: impl FnOnce(Api) -> Fut + 'static,
    apply: impl FnOnce(Fut::Output, &AppContext) + 'static,
) where
    Fut: Future + 'static,
{
    let ctx = ctx.clone();
    let scope = scope.clone();

    spawn_local(async move {
        if let Some(result) = scope.run(call(ctx.api.clone())).await {
            apply(result, &ctx);
            ctx.sync_session();
        }
    });
}
