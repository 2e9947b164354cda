//! Settings Page
//!
//! Which API server and chat endpoint the client talks to.

use leptos::*;

use crate::api;
use crate::state::chat;
use crate::state::global::GlobalState;

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (chat_url, set_chat_url) = create_signal(chat::get_chat_url(&api::get_api_base()));

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        api::set_api_base(&api_url.get());
        chat::set_chat_url(&chat_url.get());
        set_api_url.set(api::get_api_base());
        set_chat_url.set(chat::get_chat_url(&api::get_api_base()));
        state.show_success("Settings saved. Reload to reconnect.");
    };

    let on_reset = move |_| {
        api::set_api_base("");
        chat::set_chat_url("");
        set_api_url.set(api::DEFAULT_API_BASE.to_string());
        set_chat_url.set(chat::derive_chat_url(api::DEFAULT_API_BASE));
    };

    view! {
        <div class="max-w-xl mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"Where Quill connects"</p>
            </div>

            <form on:submit=on_save class="bg-gray-800 rounded-xl p-6 space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"API server"</label>
                    <input
                        type="url"
                        prop:value=move || api_url.get()
                        on:input=move |ev| set_api_url.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Chat endpoint"</label>
                    <input
                        type="text"
                        prop:value=move || chat_url.get()
                        on:input=move |ev| set_chat_url.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div class="flex space-x-3">
                    <button
                        type="submit"
                        class="px-6 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium"
                    >
                        "Save"
                    </button>
                    <button
                        type="button"
                        on:click=on_reset
                        class="px-6 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium"
                    >
                        "Reset to defaults"
                    </button>
                </div>
            </form>
        </div>
    }
}
