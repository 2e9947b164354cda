//! Navigation Component
//!
//! Header bar. Links change with the session: article links when logged in,
//! login and register otherwise.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let on_logout = move |_| {
        let token = state.token.get_untracked();
        // Local state goes regardless of what the server says.
        state.log_out();
        spawn_local(async move {
            if let Err(e) = api::logout_user(token.as_deref()).await {
                web_sys::console::error_1(&format!("Logout: {}", e).into());
            }
        });
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/articles" class="flex items-center space-x-3">
                        <span class="text-2xl">"🪶"</span>
                        <span class="text-xl font-bold text-white">"Quill"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        {move || if state.is_logged_in() {
                            view! {
                                <NavLink href="/articles" label="Articles" />
                                <NavLink href="/add" label="Write" />
                                <NavLink href="/settings" label="Settings" />
                                <span class="px-3 text-sm text-gray-400">
                                    {move || state.username.get().unwrap_or_default()}
                                </span>
                                <button
                                    on:click=on_logout
                                    class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                                >
                                    "Logout"
                                </button>
                            }.into_view()
                        } else {
                            view! {
                                <NavLink href="/" label="Login" />
                                <NavLink href="/register" label="Register" />
                                <NavLink href="/settings" label="Settings" />
                            }.into_view()
                        }}
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            exact=true
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
