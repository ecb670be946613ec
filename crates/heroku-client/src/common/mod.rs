//! Common utilities for the Heroku API client
//!
//! Provides the authenticated HTTP wrapper shared by all API calls.

use crate::error::HerokuError;
use crate::models::ErrorResponse;
use reqwest::{Client, Method, Response};
use serde::Deserialize;
use tracing::debug;

/// Media type selecting version 3 of the Platform API
pub const ACCEPT_HEADER: &str = "application/vnd.heroku+json; version=3";

/// HTTP client wrapper with authentication
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String, token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Percent-encode a single path segment (space ids may also be names)
    pub fn encode_segment(segment: &str) -> String {
        urlencoding::encode(segment).into_owned()
    }

    /// Send a request and map non-success statuses onto `HerokuError`
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, HerokuError> {
        let url = self.build_url(path);
        match body {
            Some(body) => debug!("{} {} with body: {}", method, url, body),
            None => debug!("{} {}", method, url),
        }

        let mut request = self.client
            .request(method.clone(), &url)
            .header("Authorization", self.auth_header())
            .header("Accept", ACCEPT_HEADER);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(HerokuError::Http)?;

        if let Some(request_id) = response.headers().get("Request-Id").and_then(|v| v.to_str().ok()) {
            debug!("{} {} -> {} (request id {})", method, path, response.status(), request_id);
        }

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let parsed: ErrorResponse = serde_json::from_str(&body).unwrap_or_default();
        let message = parsed.message.unwrap_or(body);

        match status.as_u16() {
            404 => Err(HerokuError::NotFound(format!("{} - {}", path, message))),
            401 | 403 => Err(HerokuError::Authentication(format!("{} {}: {}", method, path, message))),
            code => Err(HerokuError::Api {
                status: code,
                id: parsed.id,
                message: format!("{} {} failed: {}", method, path, message),
            }),
        }
    }

    /// Decode a JSON response body, keeping the raw text on failure
    async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, HerokuError> {
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Make a GET request
    pub async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, HerokuError> {
        let response = self.send(Method::GET, path, None).await?;
        Self::decode(response).await
    }

    /// Make a POST request
    pub async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, HerokuError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Self::decode(response).await
    }

    /// Make a PATCH request
    pub async fn patch<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, HerokuError> {
        let response = self.send(Method::PATCH, path, Some(body)).await?;
        Self::decode(response).await
    }

    /// Make a DELETE request. The Platform API echoes the deleted resource.
    pub async fn delete<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, HerokuError> {
        let response = self.send(Method::DELETE, path, None).await?;
        Self::decode(response).await
    }
}
