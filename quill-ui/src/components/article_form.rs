//! Article Form Component
//!
//! Title and body inputs shared by the add and update pages.

use leptos::*;

use crate::api::ArticleDraft;

/// Article editor form
#[component]
pub fn ArticleForm(
    /// Starting values
    #[prop(default = ArticleDraft::default())]
    initial: ArticleDraft,
    /// Button text
    submit_label: &'static str,
    /// Called with the form contents
    on_submit: Callback<ArticleDraft>,
    #[prop(into)]
    submitting: Signal<bool>,
) -> impl IntoView {
    let (title, set_title) = create_signal(initial.title);
    let (description, set_description) = create_signal(initial.description);

    let handle_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_submit.call(ArticleDraft {
            title: title.get().trim().to_string(),
            description: description.get(),
        });
    };

    let incomplete = move || title.with(|t| t.trim().is_empty()) || description.with(|d| d.trim().is_empty());

    view! {
        <form on:submit=handle_submit class="space-y-4">
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Title"</label>
                <input
                    type="text"
                    placeholder="Article title"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Description"</label>
                <textarea
                    rows="10"
                    placeholder="Write your article..."
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <button
                type="submit"
                disabled=move || submitting.get() || incomplete()
                class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       disabled:cursor-not-allowed rounded-lg py-3 font-semibold transition-colors"
            >
                {move || if submitting.get() { "Saving..." } else { submit_label }}
            </button>
        </form>
    }
}
