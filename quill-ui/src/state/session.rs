//! Session token slot
//!
//! One local-storage key holds the token across reloads.

/// Local storage key for the session token
pub const TOKEN_KEY: &str = "quill_token";

pub const ARTICLES_ROUTE: &str = "/articles";
pub const LOGIN_ROUTE: &str = "/";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Read the stored token
pub fn load_token() -> Option<String> {
    storage()
        .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

pub fn save_token(token: &str) {
    if let Some(storage) = storage() {
        if let Err(e) = storage.set_item(TOKEN_KEY, token) {
            web_sys::console::error_1(&e);
        }
    }
}

pub fn clear_token() {
    if let Some(storage) = storage() {
        if let Err(e) = storage.remove_item(TOKEN_KEY) {
            web_sys::console::error_1(&e);
        }
    }
}

/// Token present: article list. Token absent: login.
pub fn landing_route(token: Option<&str>) -> &'static str {
    match token {
        Some(t) if !t.trim().is_empty() => ARTICLES_ROUTE,
        _ => LOGIN_ROUTE,
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_token_round_trips_through_storage() {
        clear_token();
        assert_eq!(load_token(), None);

        save_token("abc123");
        assert_eq!(load_token().as_deref(), Some("abc123"));
        assert_eq!(landing_route(load_token().as_deref()), ARTICLES_ROUTE);

        clear_token();
        assert_eq!(load_token(), None);
    }

    #[wasm_bindgen_test]
    fn test_blank_stored_token_reads_as_none() {
        save_token("   ");
        assert_eq!(load_token(), None);
        clear_token();
    }
}
