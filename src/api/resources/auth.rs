//
//  scribe-cli
//  api/resources/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Login, logout and the current user.
//!
//! Login is the only place a token enters the [`TokenStore`](crate::auth::TokenStore);
//! the client interceptors only read and clear it.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::id_string;
use crate::api::client::ScribeClient;
use crate::api::common::{ApiError, ApiResponse, ApiResult};
use crate::api::transport::ApiRequest;

/// The authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id", deserialize_with = "id_string")]
    pub id: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default, alias = "fullName", alias = "name")]
    pub full_name: Option<String>,
}

/// Authentication operations.
#[derive(Clone)]
pub struct AuthApi {
    client: ScribeClient,
}

impl AuthApi {
    pub fn new(client: ScribeClient) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a bearer token and stores it.
    ///
    /// # Errors
    ///
    /// - the server's error for rejected credentials
    /// - [`ApiError::Credentials`] if the response carries no token or the
    ///   token cannot be stored
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<ApiResponse> {
        let request = ApiRequest::post("/auth/login")
            .json_body(json!({"email": email, "password": password}));
        let response = self.client.execute(&request).await?;

        let token = extract_token(&response.body).ok_or_else(|| {
            ApiError::Credentials("login response did not contain a token".to_string())
        })?;
        self.client
            .tokens()
            .store(&token)
            .map_err(|e| ApiError::Credentials(format!("could not store token: {:#}", e)))?;

        debug!("stored new token");
        Ok(response)
    }

    pub async fn me(&self) -> ApiResult<ApiResponse> {
        self.client.execute(&ApiRequest::get("/auth/me")).await
    }

    /// Forgets the stored token. No request is made.
    pub fn logout(&self) -> ApiResult<()> {
        self.client
            .tokens()
            .clear()
            .map_err(|e| ApiError::Credentials(format!("could not clear token: {:#}", e)))
    }
}

/// Finds the bearer token in a login response.
///
/// Looks for `access_token`, `token` or `accessToken`, at the top level or
/// inside a `data` envelope.
pub fn extract_token(body: &Value) -> Option<String> {
    const KEYS: [&str; 3] = ["access_token", "token", "accessToken"];

    [Some(body), body.get("data")]
        .into_iter()
        .flatten()
        .flat_map(|scope| KEYS.iter().filter_map(move |key| scope.get(*key)))
        .find_map(|value| value.as_str().filter(|token| !token.is_empty()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::ScriptedTransport;
    use crate::api::transport::RawResponse;
    use crate::auth::{MemoryTokenStore, TokenStore};
    use reqwest::header::AUTHORIZATION;
    use std::sync::Arc;

    #[test]
    fn test_extract_token_variants() {
        assert_eq!(extract_token(&json!({"access_token": "a"})), Some("a".into()));
        assert_eq!(extract_token(&json!({"data": {"token": "b"}})), Some("b".into()));
        assert_eq!(extract_token(&json!({"accessToken": "c"})), Some("c".into()));
        assert_eq!(extract_token(&json!({"token": ""})), None);
        assert_eq!(extract_token(&json!({"user": {}})), None);
    }

    #[test]
    fn test_extract_token_skips_empty_keys() {
        let body = json!({"access_token": "", "token": "b"});
        assert_eq!(extract_token(&body), Some("b".into()));

        let body = json!({"token": "", "data": {"accessToken": "c"}});
        assert_eq!(extract_token(&body), Some("c".into()));
    }

    #[tokio::test]
    async fn test_login_stores_token_used_by_next_call() {
        let transport = ScriptedTransport::routes(|req| match req.path.as_str() {
            "/auth/login" => RawResponse::new(200, r#"{"access_token":"fresh"}"#),
            _ => RawResponse::new(200, r#"{"id":1,"email":"ada@example.com"}"#),
        });
        let tokens = Arc::new(MemoryTokenStore::new());
        let client = ScribeClient::new(transport.clone(), tokens.clone());

        client.auth().login("ada@example.com", "pw").await.unwrap();
        assert_eq!(tokens.get().unwrap(), Some("fresh".to_string()));

        let me: User = client.auth().me().await.unwrap().json().unwrap();
        assert_eq!(me.id, "1");

        let calls = transport.calls();
        assert!(calls[0].headers.get(AUTHORIZATION).is_none());
        assert_eq!(calls[1].headers.get(AUTHORIZATION).unwrap(), "Bearer fresh");

        client.auth().logout().unwrap();
        assert_eq!(tokens.get().unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_without_token_is_an_error() {
        let transport = ScriptedTransport::always(200, r#"{"ok":true}"#);
        let tokens = Arc::new(MemoryTokenStore::new());
        let client = ScribeClient::new(transport, tokens.clone());

        let err = client.auth().login("a", "b").await.unwrap_err();
        assert!(matches!(err, ApiError::Credentials(_)));
        assert_eq!(tokens.get().unwrap(), None);
    }
}
