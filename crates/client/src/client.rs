//! HTTP client for the booking backend.
//!
//! Wraps [`reqwest`] with the three conventions every backend call shares:
//! paths are joined onto one configured base URL, a bearer token from the
//! injected [`SessionStore`] is attached to every request except the
//! auth endpoints, and most responses arrive wrapped in a `{ data: T }`
//! envelope that is peeled off here.

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

/// Endpoints that never carry a bearer token.
const AUTH_ENDPOINTS: [&str; 4] = [
    "/auth/login",
    "/auth/signup",
    "/auth/forgot-password",
    "/auth/reset-password",
];

/// Whether `path` is one of the unauthenticated auth endpoints.
pub fn is_auth_endpoint(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or_default();
    AUTH_ENDPOINTS.iter().any(|p| path == *p)
}

/// Standard response wrapper. Only `data` is required in practice; the
/// other fields are present on some endpoints.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    ok: Option<bool>,
    message: Option<String>,
    data: Option<T>,
}

/// Shared client handle. Cheap to clone; every service holds one.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(http, config.api_url.clone(), session))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    // ---- enveloped JSON ----

    /// `GET` an enveloped singleton. A missing `data` is an error.
    pub(crate) async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).send().await?;
        Self::require_data(path, Self::parse_envelope(response).await?)
    }

    /// `GET` an enveloped collection. `null` or missing `data` reads as
    /// `T::default()`.
    pub(crate) async fn get_data_or_default<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        let response = self.request(Method::GET, path).send().await?;
        Ok(Self::parse_envelope(response).await?.unwrap_or_default())
    }

    pub(crate) async fn get_data_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let response = self.request(Method::GET, path).query(query).send().await?;
        Ok(Self::parse_envelope(response).await?.unwrap_or_default())
    }

    pub(crate) async fn post_data<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::require_data(path, Self::parse_envelope(response).await?)
    }

    pub(crate) async fn put_data<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::require_data(path, Self::parse_envelope(response).await?)
    }

    /// `DELETE` returning an enveloped entity (image deletes).
    pub(crate) async fn delete_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::require_data(path, Self::parse_envelope(response).await?)
    }

    pub(crate) async fn post_multipart_data<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path).multipart(form).send().await?;
        Self::require_data(path, Self::parse_envelope(response).await?)
    }

    // ---- bare JSON, text and bytes ----

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).send().await?;
        Self::parse_response(response).await
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.request(Method::GET, path).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::parse_response(response).await
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::parse_response(response).await
    }

    /// `POST` a JSON body and return the response as plain text.
    pub(crate) async fn post_text<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, ApiError> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.text().await?)
    }

    pub(crate) async fn post_multipart_json<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path).multipart(form).send().await?;
        Self::parse_response(response).await
    }

    /// `DELETE`, discarding the body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    // ---- private helpers ----

    /// Start a request, attaching the bearer token unless `path` is an
    /// auth endpoint.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = %method, url = %url, "Backend request");
        let builder = self.http.request(method, url);
        if is_auth_endpoint(path) {
            return builder;
        }
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Ensure the response has a success status code. On failure the
    /// error carries the backend's `message` (or `error`) field when the
    /// body is JSON, the raw body text otherwise.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(ApiError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Unwrap `{ data: T }`. An explicit `ok: false` is a failure even on a
    /// 2xx status.
    async fn parse_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Option<T>, ApiError> {
        let status = response.status().as_u16();
        let envelope: Envelope<T> = Self::parse_response(response).await?;
        if envelope.ok == Some(false) {
            return Err(ApiError::Api {
                status,
                message: envelope.message.unwrap_or_default(),
            });
        }
        Ok(envelope.data)
    }

    fn require_data<T>(path: &str, data: Option<T>) -> Result<T, ApiError> {
        data.ok_or_else(|| ApiError::MissingData {
            path: path.to_string(),
        })
    }
}

/// Best human-readable message in an error body.
fn error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = json.get(key).and_then(|v| v.as_str()) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    body.trim().to_string()
}
