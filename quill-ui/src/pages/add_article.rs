//! Add Article Page

use leptos::*;
use leptos_router::*;

use crate::api::{self, ArticleDraft};
use crate::components::ArticleForm;
use crate::state::global::GlobalState;

/// New article page
#[component]
pub fn AddArticle() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = Callback::new(move |draft: ArticleDraft| {
        let token = state.token.get_untracked();
        let navigate = navigate.clone();
        set_submitting.set(true);

        spawn_local(async move {
            match api::create_article(&draft, token.as_deref()).await {
                Ok(article) => {
                    state.inserted_article(article);
                    state.show_success("Article published");
                    navigate("/articles", Default::default());
                }
                Err(e) => state.show_error(&e),
            }
            set_submitting.set(false);
        });
    });

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"New Article"</h1>
            <ArticleForm submit_label="Publish" on_submit=on_submit submitting=submitting />
        </div>
    }
}
