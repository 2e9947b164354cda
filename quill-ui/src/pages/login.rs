//! Login Page

use leptos::*;
use leptos_router::*;

use crate::api::{self, Credentials};
use crate::state::global::GlobalState;

/// Login form; a stored token moves the app on to the article list
#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let credentials = Credentials {
            username: username.get().trim().to_string(),
            password: password.get(),
        };
        set_submitting.set(true);

        spawn_local(async move {
            match api::login_user(&credentials).await {
                Ok(token) => {
                    state.log_in(token);
                    state.show_success(&format!("Welcome back, {}", credentials.username));
                }
                Err(e) => state.show_error(&e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto mt-12 bg-gray-800 rounded-xl p-8">
            <h1 class="text-3xl font-bold mb-6">"Login"</h1>

            <form on:submit=on_submit class="space-y-4">
                <TextField label="Username" kind="text" value=username set_value=set_username />
                <TextField label="Password" kind="password" value=password set_value=set_password />

                <button
                    type="submit"
                    disabled=move || submitting.get() || username.with(|u| u.trim().is_empty())
                    class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg py-3 font-semibold transition-colors"
                >
                    {move || if submitting.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>

            <p class="text-sm text-gray-400 mt-6">
                "No account yet? "
                <A href="/register" class="text-primary-400 hover:underline">"Register"</A>
            </p>
        </div>
    }
}

/// Labelled input bound to a signal
#[component]
pub fn TextField(
    label: &'static str,
    kind: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <input
                type=kind
                prop:value=move || value.get()
                on:input=move |ev| set_value.set(event_target_value(&ev))
                class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white
                       border border-gray-600 focus:border-primary-500 focus:outline-none"
            />
        </div>
    }
}
