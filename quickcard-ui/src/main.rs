//! QuickCard Front-end
//!
//! Digital business cards in the browser, built with Leptos (WASM).
//!
//! # Features
//!
//! - Sign up and sign in, with the session kept in `localStorage`
//! - Card dashboard: create, edit and delete cards with images and social links
//! - Public card pages at `/<slug>`, no account needed
//! - English, Russian and Czech
//!
//! # Architecture
//!
//! Client-side rendered Leptos compiled to WebAssembly. Page state lives in
//! the `quickcard` view-models; pages run their transitions inside signals
//! and talk to the API through gloo-net. The API base URL is taken from
//! `QUICKCARD_API_URL` at build time.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Panics show up in the browser console instead of "unreachable"
    console_error_panic_hook::set_once();

    mount_to_body(app::App);
}
