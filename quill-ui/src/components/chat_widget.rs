//! Chat Widget Component
//!
//! Floating chat panel shown on every page.

use leptos::*;

use crate::state::chat::{ChatClient, ChatMessage, ChatState};
use crate::state::global::GlobalState;

/// Chat toggle button plus panel
#[component]
pub fn ChatWidget() -> impl IntoView {
    let chat = use_context::<ChatState>().expect("ChatState not found");

    let toggle = move |_| {
        chat.open.update(|open| *open = !*open);
        if chat.open.get_untracked() {
            chat.unread.set(0);
        }
    };

    view! {
        <div class="fixed bottom-4 right-4 z-40 flex flex-col items-end space-y-2">
            {move || if chat.open.get() {
                view! { <ChatPanel /> }.into_view()
            } else {
                view! {}.into_view()
            }}

            <button
                on:click=toggle
                class="relative w-14 h-14 rounded-full bg-primary-600 hover:bg-primary-700 shadow-lg text-2xl"
                title="Chat"
            >
                "💬"
                {move || {
                    let unread = chat.unread.get();
                    (unread > 0).then(|| view! {
                        <span class="absolute -top-1 -right-1 bg-red-600 text-xs rounded-full px-2 py-0.5">
                            {unread}
                        </span>
                    })
                }}
            </button>
        </div>
    }
}

#[component]
fn ChatPanel() -> impl IntoView {
    let chat = use_context::<ChatState>().expect("ChatState not found");
    let client = use_context::<ChatClient>().expect("ChatClient not found");
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (draft, set_draft) = create_signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let body = draft.get();
        if body.trim().is_empty() {
            return;
        }

        let author = state
            .username
            .get_untracked()
            .unwrap_or_else(|| "anonymous".to_string());

        match client.send(&author, body.trim()) {
            Ok(()) => set_draft.set(String::new()),
            Err(e) => state.show_error(&e),
        }
    };

    view! {
        <div class="w-80 h-96 bg-gray-800 border border-gray-700 rounded-xl shadow-xl flex flex-col">
            // Header with connection status
            <div class="flex items-center justify-between px-4 py-3 border-b border-gray-700">
                <span class="font-semibold">"Chat"</span>
                {move || if chat.connected.get() {
                    view! {
                        <span class="flex items-center space-x-1 text-xs text-green-400">
                            <span class="w-2 h-2 bg-green-400 rounded-full" />
                            <span>"Online"</span>
                        </span>
                    }.into_view()
                } else {
                    view! {
                        <span class="flex items-center space-x-1 text-xs text-red-400">
                            <span class="w-2 h-2 bg-red-400 rounded-full" />
                            <span>"Offline"</span>
                        </span>
                    }.into_view()
                }}
            </div>

            // Transcript
            <div class="flex-1 overflow-y-auto px-4 py-2 space-y-2 text-sm">
                {move || {
                    let messages = chat.messages.get();
                    if messages.is_empty() {
                        view! {
                            <p class="text-gray-500 text-center mt-8">"No messages yet"</p>
                        }.into_view()
                    } else {
                        messages.into_iter().map(|m| view! { <ChatLine message=m /> }).collect_view()
                    }
                }}
            </div>

            // Composer
            <form on:submit=on_submit class="flex border-t border-gray-700">
                <input
                    type="text"
                    placeholder="Say something..."
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    class="flex-1 bg-transparent px-4 py-3 focus:outline-none"
                />
                <button
                    type="submit"
                    disabled=move || !chat.connected.get()
                    class="px-4 text-primary-400 hover:text-primary-300 disabled:text-gray-600"
                >
                    "Send"
                </button>
            </form>
        </div>
    }
}

#[component]
fn ChatLine(message: ChatMessage) -> impl IntoView {
    let time = message.time_label();

    match message.author {
        Some(author) => view! {
            <div>
                <span class="text-gray-500 mr-2">{time}</span>
                <span class="font-medium text-primary-300">{author}": "</span>
                <span class="text-gray-200">{message.body}</span>
            </div>
        }.into_view(),
        None => view! {
            <div class="text-center text-xs text-gray-500 italic">{message.body}</div>
        }.into_view(),
    }
}
