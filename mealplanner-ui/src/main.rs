//! Meal Planner AI
//!
//! Browser front end built with Leptos (WASM).
//!
//! # Features
//!
//! - Google sign-in through the hosted identity provider
//! - Saved meal list backed by the hosted meals table
//! - AI meal suggestions through the backend
//! - Light and dark theme
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! It talks to the hosted REST and auth endpoints directly, and to the
//! meal planner backend for suggestions.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
