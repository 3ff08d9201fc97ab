//! HTTP client for the catalog backend.
//!
//! Every request goes through [`ApiClient::send`], which attaches the bearer
//! token and performs the single-shot 401 recovery: refresh once, retry the
//! original request once, give up and clear the session otherwise.

mod error;

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

pub use error::{SessionExpiredError, StatusError, is_session_expired, status_of};

use crate::session::TokenStore;

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    refresh_token: String,
}

// The refresh endpoint answers in camelCase, unlike the token endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
}

/// Catalog API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    /// Creates a new client for the given base URL.
    pub fn new(base_url: &str, tokens: Arc<TokenStore>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            tokens,
        }
    }

    /// Returns the token store backing this client.
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Exchanges credentials for a token pair and stores it.
    ///
    /// # Errors
    /// Propagates the HTTP error unchanged on failure; the login screen maps
    /// it to "Invalid email or password".
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let body = json!({ "userEmail": email, "password": password });
        let response = self.send(Method::POST, "/auth/token", &[], Some(&body)).await?;
        let auth: AuthResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        self.tokens.set(&auth.access_token, &auth.refresh_token)?;
        Ok(())
    }

    /// Clears the stored session. No server-side invalidation call is made.
    pub fn logout(&self) -> Result<()> {
        self.tokens.clear()
    }

    /// Issues a GET request and parses the JSON response.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.send(Method::GET, path, query, None).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {path}"))
    }

    /// Issues a POST request, discarding the response body.
    pub async fn post(&self, path: &str, body: &serde_json::Value) -> Result<()> {
        self.send(Method::POST, path, &[], Some(body)).await?;
        Ok(())
    }

    /// Issues a POST request with an empty JSON object body.
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        self.post(path, &json!({})).await
    }

    /// Exchanges the refresh token for a new access token.
    /// Does not update the store; the caller decides what to keep.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String> {
        let body = json!({ "refreshToken": refresh_token });
        let request = self.build(Method::POST, "/auth/refresh", &[], Some(&body));
        let response = request
            .send()
            .await
            .context("Failed to send token refresh request")?;
        let response = Self::check_status(response).await?;

        let refreshed: RefreshResponse = response
            .json()
            .await
            .context("Failed to parse refresh response")?;
        Ok(refreshed.access_token)
    }

    /// Sends a request with the bearer token attached.
    ///
    /// On a 401 response with a refresh token present: refreshes once, stores
    /// the new access token (reusing the existing refresh token), and resends
    /// the original request once. On refresh failure: clears the token store
    /// and propagates the original 401 chained with [`SessionExpiredError`].
    /// Any other error status propagates unchanged.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let request = self.build(method.clone(), path, query, body);
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach {path}"))?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check_status(response).await;
        }
        let Some(refresh_token) = self.tokens.refresh_token() else {
            return Self::check_status(response).await;
        };

        let original = Self::into_status_error(response).await;
        tracing::debug!(path, "access token rejected, refreshing");

        match self.refresh(&refresh_token).await {
            Ok(new_access) => {
                self.tokens.set(&new_access, &refresh_token)?;
                let retry = self.build(method, path, query, body);
                let response = retry
                    .send()
                    .await
                    .with_context(|| format!("Failed to reach {path}"))?;
                Self::check_status(response).await
            }
            Err(refresh_err) => {
                tracing::warn!(path, "token refresh failed: {refresh_err:#}");
                self.tokens.clear()?;
                Err(anyhow::Error::new(original).context(SessionExpiredError))
            }
        }
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.http.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.tokens.access() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(Self::into_status_error(response).await.into())
    }

    async fn into_status_error(response: reqwest::Response) -> StatusError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        StatusError { status, body }
    }
}
