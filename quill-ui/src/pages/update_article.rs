//! Update Article Page
//!
//! Edits the article picked on the detail page.

use leptos::*;
use leptos_router::*;

use crate::api::{self, ArticleDraft};
use crate::components::ArticleForm;
use crate::state::global::GlobalState;

/// Update page component
#[component]
pub fn UpdateArticle() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"Update Article"</h1>
            {move || match state.edit_article.get() {
                Some(article) => {
                    let initial = ArticleDraft {
                        title: article.title,
                        description: article.description,
                    };
                    view! { <EditForm slug=article.slug initial=initial /> }.into_view()
                }
                None => view! {
                    <p class="text-gray-400">
                        "Pick an article to edit from "
                        <A href="/articles" class="text-primary-400 hover:underline">"the list"</A>
                        "."
                    </p>
                }.into_view(),
            }}
        </div>
    }
}

#[component]
fn EditForm(slug: String, initial: ArticleDraft) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = Callback::new(move |draft: ArticleDraft| {
        let slug = slug.clone();
        let token = state.token.get_untracked();
        let navigate = navigate.clone();
        set_submitting.set(true);

        spawn_local(async move {
            match api::update_article(&slug, &draft, token.as_deref()).await {
                Ok(article) => {
                    let target = format!("/articles/{}", article.slug);
                    state.updated_article(article);
                    state.edit_article.set(None);
                    state.show_success("Article updated");
                    navigate(&target, Default::default());
                }
                Err(e) => state.show_error(&e),
            }
            set_submitting.set(false);
        });
    });

    view! {
        <ArticleForm initial=initial submit_label="Save" on_submit=on_submit submitting=submitting />
    }
}
