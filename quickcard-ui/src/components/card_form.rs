//! Card Form Component
//!
//! Create/edit form over a [`CardDraft`]. The form never calls the API: a
//! valid draft is handed to `on_submit` as a multipart payload and the
//! caller decides what to do with it.

use leptos::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use quickcard::card::{CardDraft, FontStyle, TemplateId};
use quickcard::{Card, FormPayload, ImageFile, Message};

use crate::components::InlineLoading;
use crate::state::use_app;

#[component]
pub fn CardForm(
    /// Card being edited; `None` for a new card
    #[prop(optional)]
    initial: Option<Card>,
    #[prop(into)]
    on_submit: Callback<FormPayload>,
    #[prop(into)]
    on_cancel: Callback<()>,
    /// Disables the submit button while the caller is saving
    #[prop(into)]
    busy: Signal<bool>,
) -> impl IntoView {
    let ctx = use_app();
    let locale = ctx.locale;
    let t = move |m: Message| locale.get().text(m);

    let heading = if initial.is_some() {
        Message::EditCard
    } else {
        Message::CreateCard
    };
    let current_avatar = initial.as_ref().and_then(|c| c.avatar.clone());
    let current_background = initial.as_ref().and_then(|c| c.background_image.clone());

    let draft = create_rw_signal(initial.as_ref().map(CardDraft::from_card).unwrap_or_default());
    let invalid = create_rw_signal(None::<Message>);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match draft.with(|d| d.to_payload()) {
            Ok(payload) => {
                invalid.set(None);
                on_submit.call(payload);
            }
            Err(e) => invalid.set(Some(e.message())),
        }
    };

    view! {
        <form on:submit=submit class="bg-gray-800 rounded-xl p-6 space-y-4">
            <h2 class="text-xl font-semibold">{move || t(heading)}</h2>

            <div class="grid md:grid-cols-2 gap-4">
                <TextField draft label=Message::FieldTitle required=true
                    read=|d| d.title.clone() write=|d, v| d.title = v />
                <TextField draft label=Message::FieldSlug
                    read=|d| d.slug.clone() write=|d, v| d.slug = v />
                <TextField draft label=Message::FieldSubtitle
                    read=|d| d.subtitle.clone() write=|d, v| d.subtitle = v />
                <TextField draft label=Message::FieldEmail kind="email"
                    read=|d| d.email.clone() write=|d, v| d.email = v />
                <TextField draft label=Message::FieldPhone kind="tel"
                    read=|d| d.phone.clone() write=|d, v| d.phone = v />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">{move || t(Message::FieldDescription)}</label>
                <textarea
                    rows=3
                    prop:value=move || draft.with(|d| d.description.clone())
                    on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white border border-gray-600
                           focus:border-primary-500 focus:outline-none"
                />
            </div>

            <div class="grid md:grid-cols-2 gap-4">
                <ImageField draft label=Message::FieldAvatar current=current_avatar
                    write=|d, f| d.avatar = f />
                <ImageField draft label=Message::FieldBackgroundImage current=current_background
                    write=|d, f| d.background_image = f />
            </div>

            <div class="grid md:grid-cols-4 gap-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">{move || t(Message::FieldTemplate)}</label>
                    <select
                        on:change=move |ev| draft.update(|d| {
                            d.template_id = TemplateId::parse(&event_target_value(&ev)).unwrap_or_default()
                        })
                        prop:value=move || draft.with(|d| d.template_id.as_str())
                        class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white border border-gray-600"
                    >
                        {TemplateId::ALL
                            .into_iter()
                            .map(|id| view! { <option value=id.as_str()>{id.label()}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">{move || t(Message::FieldFont)}</label>
                    <select
                        on:change=move |ev| draft.update(|d| {
                            d.font_style = FontStyle::parse(&event_target_value(&ev)).unwrap_or_default()
                        })
                        prop:value=move || draft.with(|d| d.font_style.as_str())
                        class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white border border-gray-600"
                    >
                        {FontStyle::ALL
                            .into_iter()
                            .map(|font| view! {
                                <option value=font.as_str() style=format!("font-family: '{}'", font)>
                                    {font.as_str()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </div>

                <TextField draft label=Message::FieldBackgroundColor kind="color"
                    read=|d| d.background_color.clone() write=|d, v| d.background_color = v />
                <TextField draft label=Message::FieldTextColor kind="color"
                    read=|d| d.text_color.clone() write=|d, v| d.text_color = v />
            </div>

            <SocialLinks draft />

            <label class="flex items-center space-x-2">
                <input
                    type="checkbox"
                    prop:checked=move || draft.with(|d| d.is_active)
                    on:change=move |ev| draft.update(|d| d.is_active = event_target_checked(&ev))
                />
                <span>{move || t(Message::FieldIsActive)}</span>
            </label>

            {move || invalid.get().map(|m| view! {
                <p class="text-red-400 text-sm">{locale.get().text(m)}</p>
            })}

            <div class="flex space-x-3">
                <button
                    type="submit"
                    disabled=move || busy.get()
                    class="flex-1 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           disabled:cursor-not-allowed rounded-lg py-3 font-semibold
                           transition-colors flex items-center justify-center space-x-2"
                >
                    {move || busy.get().then(|| view! { <InlineLoading /> })}
                    <span>{move || t(Message::Save)}</span>
                </button>
                <button
                    type="button"
                    on:click=move |_| on_cancel.call(())
                    class="flex-1 bg-gray-700 hover:bg-gray-600 rounded-lg py-3 font-semibold transition-colors"
                >
                    {move || t(Message::Cancel)}
                </button>
            </div>
        </form>
    }
}

/// Labelled single-line input bound to one draft field
#[component]
fn TextField(
    draft: RwSignal<CardDraft>,
    label: Message,
    read: fn(&CardDraft) -> String,
    write: fn(&mut CardDraft, String),
    #[prop(default = "text")]
    kind: &'static str,
    #[prop(optional)]
    required: bool,
) -> impl IntoView {
    let locale = use_app().locale;

    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">
                {move || locale.get().text(label)}
                {required.then(|| " *")}
            </label>
            <input
                type=kind
                required=required
                prop:value=move || draft.with(read)
                on:input=move |ev| draft.update(|d| write(d, event_target_value(&ev)))
                class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white border border-gray-600
                       focus:border-primary-500 focus:outline-none"
            />
        </div>
    }
}

/// File picker for one of the card images
#[component]
fn ImageField(
    draft: RwSignal<CardDraft>,
    label: Message,
    /// URL of the image already on the server
    current: Option<String>,
    write: fn(&mut CardDraft, Option<ImageFile>),
) -> impl IntoView {
    let ctx = use_app();
    let locale = ctx.locale;

    let on_change = move |ev: web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            draft.update(|d| write(d, None));
            return;
        };

        let ctx = ctx.clone();
        spawn_local(async move {
            match read_image(&file).await {
                Ok(image) => draft.update(|d| write(d, Some(image))),
                Err(e) => {
                    web_sys::console::error_1(&e);
                    ctx.show_error(&format!("{}: {}", ctx.t(label), file.name()));
                }
            }
        });
    };

    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{move || locale.get().text(label)}</label>
            {current.map(|url| view! {
                <img src=url class="h-16 w-16 object-cover rounded mb-2" />
            })}
            <input
                type="file"
                accept="image/*"
                on:change=on_change
                class="w-full text-sm text-gray-300"
            />
        </div>
    }
}

/// Ordered social link list plus the platform/url pair being typed
#[component]
fn SocialLinks(draft: RwSignal<CardDraft>) -> impl IntoView {
    let locale = use_app().locale;
    let t = move |m: Message| locale.get().text(m);

    view! {
        <div class="space-y-2">
            <label class="block text-sm text-gray-400">{move || t(Message::FieldSocialLinks)}</label>

            {move || draft.with(|d| {
                d.social_links
                    .iter()
                    .enumerate()
                    .map(|(index, link)| view! {
                        <div class="flex items-center justify-between bg-gray-700 rounded-lg px-4 py-2">
                            <span>
                                <strong>{link.platform.clone()}</strong>
                                ": "
                                {link.url.clone()}
                            </span>
                            <button
                                type="button"
                                on:click=move |_| draft.update(|d| { d.remove_link(index); })
                                class="text-red-400 hover:text-red-300"
                            >
                                {move || t(Message::Remove)}
                            </button>
                        </div>
                    })
                    .collect_view()
            })}

            <div class="flex space-x-2">
                <input
                    type="text"
                    placeholder=move || t(Message::PlatformPlaceholder)
                    prop:value=move || draft.with(|d| d.scratch.platform.clone())
                    on:input=move |ev| draft.update(|d| d.set_scratch_platform(event_target_value(&ev)))
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-2 text-white border border-gray-600"
                />
                <input
                    type="url"
                    placeholder=move || t(Message::UrlPlaceholder)
                    prop:value=move || draft.with(|d| d.scratch.url.clone())
                    on:input=move |ev| draft.update(|d| d.set_scratch_url(event_target_value(&ev)))
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-2 text-white border border-gray-600"
                />
                <button
                    type="button"
                    on:click=move |_| draft.update(|d| { d.add_link(); })
                    class="px-4 py-2 rounded-lg bg-gray-600 hover:bg-gray-500 transition-colors"
                >
                    {move || t(Message::AddLink)}
                </button>
            </div>
        </div>
    }
}

async fn read_image(file: &web_sys::File) -> Result<ImageFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let name = file.name();
    let content_type = match file.type_() {
        t if t.is_empty() => ImageFile::guess_content_type(&name).to_string(),
        t => t,
    };

    Ok(ImageFile::new(name, content_type, bytes))
}
