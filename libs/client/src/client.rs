//! The API client: one request funnel behind uniform verbs

use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiClientError;
use crate::token::TokenStore;

/// Success envelope returned by every API endpoint
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    data: T,
}

/// Error envelope returned on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    errors: Option<HashMap<String, Vec<String>>>,
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Token-aware HTTP client for the portfolio API
///
/// Constructed once at application start with the token storage injected
/// by the caller; cookies are always sent, and a bearer header is added
/// whenever the store holds a token. A `401` response clears the store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a new client for the given API base URL
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(ApiClient {
            http,
            base_url: base_url.into(),
            tokens,
        })
    }

    /// Replace the held bearer token
    pub fn set_token(&self, token: String) {
        self.tokens.set(token);
    }

    /// Drop the held bearer token
    pub fn clear_token(&self) {
        self.tokens.clear();
    }

    /// GET a resource
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiClientError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    /// POST a payload
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiClientError> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// PUT a payload
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiClientError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// PATCH a payload
    pub async fn patch<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiClientError> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// DELETE a resource
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiClientError> {
        self.request::<T, ()>(Method::DELETE, path, None).await
    }

    /// The single funnel every verb goes through
    async fn request<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiClientError> {
        let url = join_url(&self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);

        if let Some(token) = self.tokens.get() {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let envelope: ApiEnvelope<T> = response.json().await?;
            return Ok(envelope.data);
        }

        // A rejected credential is stale; drop it so the caller can
        // re-authenticate instead of replaying the same failure.
        if status.as_u16() == 401 {
            self.tokens.clear();
        }

        let fallback = status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
        let error_body = match response.json::<ErrorBody>().await {
            Ok(body) => body,
            Err(_) => ErrorBody {
                message: fallback,
                errors: None,
            },
        };

        Err(ApiClientError::Api {
            status_code: status.as_u16(),
            message: error_body.message,
            errors: error_body.errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MemoryTokenStore;

    #[test]
    fn test_join_url_normalizes_slashes() {
        assert_eq!(
            join_url("http://localhost:5000/", "/api/v1/blogs"),
            "http://localhost:5000/api/v1/blogs"
        );
        assert_eq!(
            join_url("http://localhost:5000", "api/v1/blogs"),
            "http://localhost:5000/api/v1/blogs"
        );
    }

    #[test]
    fn test_token_set_and_clear_go_through_the_store() {
        let store = Arc::new(MemoryTokenStore::new());
        let client = ApiClient::new("http://localhost:5000", store.clone()).unwrap();

        client.set_token("abc".to_string());
        assert_eq!(store.get(), Some("abc".to_string()));

        client.clear_token();
        assert_eq!(store.get(), None);
    }
}
