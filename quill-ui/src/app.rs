//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{ChatWidget, Nav, Toast};
use crate::pages::{AddArticle, ArticleDetail, Articles, Login, Register, Settings, UpdateArticle};
use crate::state::chat::init_chat;
use crate::state::global::{provide_global_state, GlobalState};
use crate::state::session::landing_route;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    init_chat(&api::get_api_base());

    view! {
        <Router>
            <SessionGate />

            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Login />
                        <Route path="/register" view=Register />
                        <Route path="/articles" view=Articles />
                        <Route path="/articles/:slug" view=ArticleDetail />
                        <Route path="/add" view=AddArticle />
                        <Route path="/update" view=UpdateArticle />
                        <Route path="/settings" view=Settings />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <ChatWidget />
                <Toast />
            </div>
        </Router>
    }
}

/// Reacts to token changes: refetches the list and the current user, then
/// routes to the article list or the login page.
#[component]
fn SessionGate() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    create_effect(move |_| {
        let token = state.token.get();
        navigate(landing_route(token.as_deref()), Default::default());

        let Some(token) = token else {
            return;
        };

        state.loading.set(true);
        let list_token = token.clone();
        spawn_local(async move {
            match api::fetch_articles(Some(&list_token)).await {
                Ok(articles) => state.set_articles(articles),
                Err(e) => state.show_error(&e),
            }
            state.loading.set(false);
        });

        spawn_local(async move {
            match api::fetch_current_user(Some(&token)).await {
                Ok(user) => state.username.set(Some(user.username)),
                Err(e) => web_sys::console::error_1(&format!("User lookup failed: {}", e).into()),
            }
        });
    });
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/articles"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Articles"
            </A>
        </div>
    }
}
