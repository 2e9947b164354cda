//! Articles Page
//!
//! The in-memory list held by the app root.

use leptos::*;
use leptos_router::*;

use crate::components::loading::ListSkeleton;
use crate::components::ArticleCard;
use crate::state::global::GlobalState;

/// Article list page
#[component]
pub fn Articles() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Articles"</h1>
                    <p class="text-gray-400 mt-1">
                        {move || format!("{} published", state.articles.with(|a| a.len()))}
                    </p>
                </div>

                <A
                    href="/add"
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "+ New Article"
                </A>
            </div>

            <div class="space-y-4">
                {move || {
                    let articles = state.articles.get();
                    if state.loading.get() && articles.is_empty() {
                        view! { <ListSkeleton /> }.into_view()
                    } else if articles.is_empty() {
                        view! {
                            <div class="text-center py-12">
                                <p class="text-gray-400">"No articles yet. Write the first one!"</p>
                            </div>
                        }.into_view()
                    } else {
                        articles.into_iter().map(|article| {
                            view! { <ArticleCard article=article /> }
                        }).collect_view()
                    }
                }}
            </div>
        </div>
    }
}
