//! HTTP API Client
//!
//! Functions for communicating with the blog REST API.

use gloo_net::http::{Request, RequestBuilder, Response};

use crate::state::global::Article;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://blogrestapi1.herokuapp.com";

const API_URL_KEY: &str = "quill_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim().trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage; empty clears the override
pub fn set_api_base(url: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let url = url.trim();
        let result = if url.is_empty() {
            storage.remove_item(API_URL_KEY)
        } else {
            storage.set_item(API_URL_KEY, url)
        };
        if let Err(e) = result {
            web_sys::console::error_1(&e);
        }
    }
}

// ============ Request/Response Types ============

/// Body for create and update
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ArticleDraft {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Registration {
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    pub password1: String,
    pub password2: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct TokenResponse {
    pub key: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CurrentUser {
    pub username: String,
}

// ============ Helpers ============

fn article_url(api_base: &str, slug: &str) -> String {
    let slug: String = js_sys::encode_uri_component(slug).into();
    format!("{}/articles/{}/", api_base, slug)
}

fn authorized(request: RequestBuilder, token: Option<&str>) -> Result<RequestBuilder, String> {
    let token = token.ok_or_else(|| "Please log in first".to_string())?;
    Ok(request.header("Authorization", &format!("Token {}", token)))
}

/// Flatten an error body into one line
///
/// The API answers with `{"detail": "..."}` or with a map of field names to
/// lists of messages.
pub fn describe_api_error(status: u16, body: &serde_json::Value) -> String {
    if let Some(detail) = body.get("detail").and_then(|d| d.as_str()) {
        return detail.to_string();
    }

    if let Some(fields) = body.as_object() {
        let mut parts: Vec<String> = fields
            .iter()
            .map(|(field, value)| {
                let text = match value {
                    serde_json::Value::Array(items) => items
                        .iter()
                        .map(|m| m.as_str().map(str::to_string).unwrap_or_else(|| m.to_string()))
                        .collect::<Vec<_>>()
                        .join(" "),
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                if field == "non_field_errors" {
                    text
                } else {
                    format!("{}: {}", field, text)
                }
            })
            .collect();
        parts.sort();
        if !parts.is_empty() {
            return parts.join("; ");
        }
    }

    format!("Request failed ({})", status)
}

async fn check(response: Response) -> Result<Response, String> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body: serde_json::Value = response.json().await.unwrap_or(serde_json::Value::Null);
    let message = describe_api_error(status, &body);
    web_sys::console::error_1(&format!("API error {}: {}", status, message).into());
    Err(message)
}

async fn send(request: RequestBuilder) -> Result<Response, String> {
    let response = request
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    check(response).await
}

async fn send_json<B: serde::Serialize>(
    request: RequestBuilder,
    body: &B,
) -> Result<Response, String> {
    let response = request
        .json(body)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    check(response).await
}

async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, String> {
    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

// ============ API Functions ============

/// Fetch all articles
pub async fn fetch_articles(token: Option<&str>) -> Result<Vec<Article>, String> {
    let api_base = get_api_base();
    let request = authorized(Request::get(&format!("{}/articles/", api_base)), token)?;
    parse(send(request).await?).await
}

/// Fetch one article by slug
pub async fn fetch_article(slug: &str, token: Option<&str>) -> Result<Article, String> {
    let api_base = get_api_base();
    let request = authorized(Request::get(&article_url(&api_base, slug)), token)?;
    parse(send(request).await?).await
}

/// Publish a new article
pub async fn create_article(draft: &ArticleDraft, token: Option<&str>) -> Result<Article, String> {
    let api_base = get_api_base();
    let request = authorized(Request::post(&format!("{}/articles/", api_base)), token)?;
    parse(send_json(request, draft).await?).await
}

/// Replace an article's title and description
pub async fn update_article(
    slug: &str,
    draft: &ArticleDraft,
    token: Option<&str>,
) -> Result<Article, String> {
    let api_base = get_api_base();
    let request = authorized(Request::put(&article_url(&api_base, slug)), token)?;
    parse(send_json(request, draft).await?).await
}

/// Delete an article
pub async fn delete_article(slug: &str, token: Option<&str>) -> Result<(), String> {
    let api_base = get_api_base();
    let request = authorized(Request::delete(&article_url(&api_base, slug)), token)?;
    send(request).await?;
    Ok(())
}

/// Create an account; returns the new session token
pub async fn register_user(registration: &Registration) -> Result<String, String> {
    let api_base = get_api_base();
    let request = Request::post(&format!("{}/dj-rest-auth/registration/", api_base));
    let reply: TokenResponse = parse(send_json(request, registration).await?).await?;
    Ok(reply.key)
}

/// Log in; returns the session token
pub async fn login_user(credentials: &Credentials) -> Result<String, String> {
    let api_base = get_api_base();
    let request = Request::post(&format!("{}/dj-rest-auth/login/", api_base));
    let reply: TokenResponse = parse(send_json(request, credentials).await?).await?;
    Ok(reply.key)
}

/// Invalidate the token server-side
pub async fn logout_user(token: Option<&str>) -> Result<(), String> {
    let api_base = get_api_base();
    let request = authorized(Request::post(&format!("{}/dj-rest-auth/logout/", api_base)), token)?;
    send(request).await?;
    Ok(())
}

/// Look up the account the token belongs to
pub async fn fetch_current_user(token: Option<&str>) -> Result<CurrentUser, String> {
    let api_base = get_api_base();
    let request = authorized(Request::get(&format!("{}/dj-rest-auth/user/", api_base)), token)?;
    parse(send(request).await?).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_message() {
        let body = serde_json::json!({"detail": "Invalid token."});
        assert_eq!(describe_api_error(401, &body), "Invalid token.");
    }

    #[test]
    fn test_field_messages() {
        let body = serde_json::json!({
            "username": ["A user with that username already exists."],
            "non_field_errors": ["The two password fields didn't match."]
        });

        assert_eq!(
            describe_api_error(400, &body),
            "The two password fields didn't match.; username: A user with that username already exists."
        );
    }

    #[test]
    fn test_unreadable_body() {
        assert_eq!(
            describe_api_error(500, &serde_json::Value::Null),
            "Request failed (500)"
        );
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_empty_api_base_falls_back_to_default() {
        set_api_base("http://localhost:8000/");
        assert_eq!(get_api_base(), "http://localhost:8000");

        set_api_base("   ");
        assert_eq!(get_api_base(), DEFAULT_API_BASE);
    }
}
