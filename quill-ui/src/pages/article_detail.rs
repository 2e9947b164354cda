//! Article Detail Page
//!
//! Fetches one article by slug. The author also gets Update and Delete.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::Loading;
use crate::state::global::{can_edit, Article, GlobalState};

/// Article detail page component
#[component]
pub fn ArticleDetail() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let params = use_params_map();
    let slug = move || params.with(|p| p.get("slug").cloned().unwrap_or_default());

    let article = create_local_resource(
        move || (slug(), state.token.get()),
        |(slug, token)| async move { api::fetch_article(&slug, token.as_deref()).await },
    );

    view! {
        <div class="max-w-3xl mx-auto">
            {move || match article.get() {
                None => view! { <Loading /> }.into_view(),
                Some(Ok(article)) => view! { <ArticleBody article=article /> }.into_view(),
                Some(Err(e)) => view! {
                    <div class="text-center py-12">
                        <p class="text-red-400 mb-4">{e}</p>
                        <A href="/articles" class="text-primary-400 hover:underline">"Back to articles"</A>
                    </div>
                }.into_view(),
            }}
        </div>
    }
}

#[component]
fn ArticleBody(article: Article) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let (deleting, set_deleting) = create_signal(false);

    let editable = {
        let article = article.clone();
        move || state.username.with(|u| can_edit(u.as_deref(), &article))
    };

    let on_delete = {
        let slug = article.slug.clone();
        let navigate = navigate.clone();
        move |_| {
            let slug = slug.clone();
            let navigate = navigate.clone();
            let token = state.token.get_untracked();
            set_deleting.set(true);

            spawn_local(async move {
                match api::delete_article(&slug, token.as_deref()).await {
                    Ok(()) => {
                        state.deleted_article(&slug);
                        state.show_success("Article deleted");
                        navigate("/articles", Default::default());
                    }
                    Err(e) => state.show_error(&e),
                }
                set_deleting.set(false);
            });
        }
    };

    let on_update = {
        let article = article.clone();
        move |_| {
            state.select_for_edit(article.clone());
            navigate("/update", Default::default());
        }
    };

    let published = article.published_display();

    view! {
        <article class="space-y-6">
            <div>
                <h1 class="text-4xl font-bold">{article.title.clone()}</h1>
                <h6 class="text-gray-400 mt-2">
                    "Published "{published}" by "<i>{article.author.clone()}</i>
                </h6>
            </div>

            <p class="text-gray-200 leading-relaxed whitespace-pre-wrap">{article.description.clone()}</p>

            <Show when=editable>
                <div class="flex space-x-3">
                    <button
                        on:click=on_delete.clone()
                        disabled=move || deleting.get()
                        class="px-4 py-2 bg-red-600 hover:bg-red-700 disabled:bg-gray-600 rounded-lg font-medium"
                    >
                        {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                    </button>
                    <button
                        on:click=on_update.clone()
                        class="px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg font-medium"
                    >
                        "Update"
                    </button>
                </div>
            </Show>

            <A href="/articles" class="inline-block text-primary-400 hover:underline">"← All articles"</A>
        </article>
    }
}
