//! Account and session types

use serde::{Deserialize, Serialize};

/// The logged-in account as returned by the user lookup endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(default)]
    pub pk: Option<u64>,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Registration request body
///
/// The API wants the password twice and checks they match server-side.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    pub password1: String,
    pub password2: String,
}

impl Registration {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            email: email.into(),
            password1: password.clone(),
            password2: password,
        }
    }
}

/// Reply to login and registration: `{"key": "<token>"}`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub key: String,
}

/// A bearer token plus, when known, whose it is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: Option<String>,
    pub token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            username: None,
            token: token.into(),
        }
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("Token {}", self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_repeats_password() {
        let reg = Registration::new("alice", "", "s3cret");
        let json = serde_json::to_value(&reg).unwrap();

        assert_eq!(json["password1"], "s3cret");
        assert_eq!(json["password2"], "s3cret");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_user_lookup_payload() {
        let user: User = serde_json::from_str(
            r#"{"pk": 3, "username": "alice", "email": "a@example.com", "first_name": "", "last_name": ""}"#,
        )
        .unwrap();

        assert_eq!(user.pk, Some(3));
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn test_session_authorization_header() {
        assert_eq!(Session::new("abc123").authorization(), "Token abc123");
    }
}
