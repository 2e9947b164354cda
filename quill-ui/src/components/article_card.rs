//! Article Card Component

use leptos::*;
use leptos_router::*;

use crate::state::global::Article;

/// One entry in the article list
#[component]
pub fn ArticleCard(article: Article) -> impl IntoView {
    let href = format!("/articles/{}", article.slug);
    let published = article.published_display();

    view! {
        <A href=href class="block bg-gray-800 hover:bg-gray-700 rounded-xl p-6 transition-colors">
            <h2 class="text-xl font-semibold text-white">{article.title}</h2>
            <p class="text-sm text-gray-400 mt-1">
                {published}" · "<i>{article.author}</i>
            </p>
            <p class="text-gray-300 mt-3 line-clamp-2">{article.description}</p>
        </A>
    }
}
