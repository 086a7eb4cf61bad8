//! Public Card Page
//!
//! Renders `/<slug>` for anyone, signed in or not.

use leptos::*;
use leptos_router::*;

use quickcard::view::{PublicCardState, ViewScope};
use quickcard::{Card, Message, Route};

use crate::components::Loading;
use crate::state::use_app;

#[component]
pub fn PublicCard() -> impl IntoView {
    let ctx = use_app();
    let location = use_location();
    let locale = ctx.locale;

    let state = create_rw_signal(PublicCardState::Loading);

    let scope = ViewScope::new();
    on_cleanup({
        let scope = scope.clone();
        move || scope.cancel()
    });

    // Router params are not percent-decoded; the route table is
    let slug = create_memo(move |_| match Route::parse(&location.pathname.get()) {
        Route::PublicCard(slug) => Some(slug),
        _ => None,
    });

    // Same component instance is reused when only the slug changes
    create_effect(move |_| {
        let Some(requested) = slug.get() else {
            return;
        };
        state.set(PublicCardState::Loading);

        let ctx = ctx.clone();
        let scope = scope.clone();
        spawn_local(async move {
            let Some(result) = scope.run(ctx.api.get_public_card(&requested)).await else {
                return;
            };
            if slug.get_untracked().as_deref() != Some(requested.as_str()) {
                return;
            }
            state.update(|s| s.apply(result, ctx.locale.get_untracked(), ctx.api.base_url()));
        });
    });

    view! {
        <div class="flex justify-center">
            {move || match state.get() {
                PublicCardState::Loading => view! {
                    <Loading label=locale.get().text(Message::PublicLoading) />
                }
                .into_view(),
                PublicCardState::Error(error) => view! {
                    <div class="text-center py-12 space-y-2">
                        <div class="text-6xl">"🔍"</div>
                        <p class="text-gray-400">{error}</p>
                    </div>
                }
                .into_view(),
                PublicCardState::Loaded(card) => view! { <CardView card /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn CardView(card: Card) -> impl IntoView {
    let locale = use_app().locale;
    let t = move |m: Message| locale.get().text(m);

    let style = card_style(&card);
    let class = format!(
        "card template-{} w-full max-w-md rounded-2xl shadow-xl p-8 space-y-4 text-center",
        card.template_id
    );

    view! {
        <article class=class style=style>
            {card.avatar.clone().map(|src| view! {
                <img src=src alt=card.title.clone() class="w-28 h-28 rounded-full object-cover mx-auto" />
            })}

            <h1 class="text-3xl font-bold">{card.title.clone()}</h1>
            {(!card.subtitle.is_empty()).then(|| view! {
                <h2 class="text-lg opacity-80">{card.subtitle.clone()}</h2>
            })}
            {(!card.description.is_empty()).then(|| view! {
                <p class="whitespace-pre-line">{card.description.clone()}</p>
            })}

            {(!card.email.is_empty()).then(|| view! {
                <p>
                    <span class="opacity-70">{move || t(Message::PublicEmail)}" "</span>
                    <a href=format!("mailto:{}", card.email) class="underline">{card.email.clone()}</a>
                </p>
            })}
            {(!card.phone.is_empty()).then(|| view! {
                <p>
                    <span class="opacity-70">{move || t(Message::PublicPhone)}" "</span>
                    <a href=format!("tel:{}", card.phone) class="underline">{card.phone.clone()}</a>
                </p>
            })}

            {(!card.social_links.is_empty()).then(|| view! {
                <div class="pt-2 space-y-2">
                    <h3 class="font-semibold">{move || t(Message::PublicSocialLinks)}</h3>
                    <ul class="flex flex-wrap justify-center gap-2">
                        {card
                            .social_links
                            .iter()
                            .map(|link| {
                                let class = format!("social-link {} px-3 py-1 rounded-full border", link.css_class());
                                // Cards saved before link checks may still carry script URLs
                                let item = if link.has_safe_url() {
                                    view! {
                                        <a href=link.url.clone() target="_blank" rel="noopener noreferrer" class=class>
                                            {link.platform.clone()}
                                        </a>
                                    }
                                    .into_view()
                                } else {
                                    view! { <span class=class title=link.url.clone()>{link.platform.clone()}</span> }
                                        .into_view()
                                };
                                view! { <li>{item}</li> }
                            })
                            .collect_view()}
                    </ul>
                </div>
            })}
        </article>
    }
}

/// Inline style carrying the card's colors, font and background image
fn card_style(card: &Card) -> String {
    let mut style = format!(
        "background-color: {}; color: {}; font-family: '{}';",
        card.background_color, card.text_color, card.font_style
    );
    if let Some(url) = &card.background_image {
        style.push_str(&format!(
            " background-image: url('{}'); background-size: cover; background-position: center;",
            url
        ));
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(json: serde_json::Value) -> Card {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_card_style_uses_defaults() {
        let card = card(serde_json::json!({"id": 1, "slug": "jane", "title": "Jane"}));

        assert_eq!(
            card_style(&card),
            "background-color: #FFFFFF; color: #000000; font-family: 'Arial';"
        );
    }

    #[test]
    fn test_card_style_includes_background_image() {
        let card = card(serde_json::json!({
            "id": 1,
            "slug": "jane",
            "font_style": "Georgia",
            "background_color": "#112233",
            "background_image": "http://api.test/media/bg.png"
        }));

        let style = card_style(&card);
        assert!(style.starts_with("background-color: #112233;"));
        assert!(style.contains("font-family: 'Georgia'"));
        assert!(style.contains("url('http://api.test/media/bg.png')"));
    }
}
