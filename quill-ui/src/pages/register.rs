//! Register Page

use leptos::*;
use leptos_router::*;

use super::login::TextField;
use crate::api::{self, Registration};
use crate::state::global::GlobalState;

/// Why a registration form can't be sent yet
pub fn registration_problem(username: &str, password1: &str, password2: &str) -> Option<&'static str> {
    if username.trim().is_empty() {
        Some("Choose a username")
    } else if password1.is_empty() {
        Some("Choose a password")
    } else if password1 != password2 {
        Some("Passwords don't match")
    } else {
        None
    }
}

/// Account creation form
#[component]
pub fn Register() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (username, set_username) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password1, set_password1) = create_signal(String::new());
    let (password2, set_password2) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let problem = move || {
        registration_problem(&username.get(), &password1.get(), &password2.get())
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(p) = problem() {
            state.show_error(p);
            return;
        }

        let registration = Registration {
            username: username.get().trim().to_string(),
            email: email.get().trim().to_string(),
            password1: password1.get(),
            password2: password2.get(),
        };
        set_submitting.set(true);

        spawn_local(async move {
            match api::register_user(&registration).await {
                Ok(token) => {
                    state.log_in(token);
                    state.show_success(&format!("Welcome, {}", registration.username));
                }
                Err(e) => state.show_error(&e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto mt-12 bg-gray-800 rounded-xl p-8">
            <h1 class="text-3xl font-bold mb-6">"Register"</h1>

            <form on:submit=on_submit class="space-y-4">
                <TextField label="Username" kind="text" value=username set_value=set_username />
                <TextField label="Email (optional)" kind="email" value=email set_value=set_email />
                <TextField label="Password" kind="password" value=password1 set_value=set_password1 />
                <TextField label="Confirm password" kind="password" value=password2 set_value=set_password2 />

                {move || problem().map(|p| view! {
                    <p class="text-sm text-gray-400">{p}</p>
                })}

                <button
                    type="submit"
                    disabled=move || submitting.get() || problem().is_some()
                    class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg py-3 font-semibold transition-colors"
                >
                    {move || if submitting.get() { "Creating account..." } else { "Register" }}
                </button>
            </form>

            <p class="text-sm text-gray-400 mt-6">
                "Already registered? "
                <A href="/" class="text-primary-400 hover:underline">"Login"</A>
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_problem() {
        assert_eq!(registration_problem("", "a", "a"), Some("Choose a username"));
        assert_eq!(registration_problem("ann", "", ""), Some("Choose a password"));
        assert_eq!(registration_problem("ann", "a", "b"), Some("Passwords don't match"));
        assert_eq!(registration_problem("ann", "a", "a"), None);
    }
}
