//! Quill Web Client
//!
//! Single-page blog client built with Leptos (WASM).
//!
//! # Features
//!
//! - Article list and detail views
//! - Publish, edit, and delete your own articles
//! - Login and registration against the blog API
//! - Floating chat widget
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The app root holds the article list; pages patch it after
//! each successful API call. The session token lives in local storage.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
