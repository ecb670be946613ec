//! Heroku API client
//!
//! Implements the Platform API calls used to manage Private Spaces.
//! Based on the API structure: /spaces/{id} and /spaces/{id}/nat

use crate::common::HttpClient;
use crate::error::HerokuError;
use crate::heroku_trait::HerokuClientTrait;
use crate::models::*;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent sent with every request
pub const USER_AGENT: &str = concat!("heroku-client/", env!("CARGO_PKG_VERSION"));

/// Heroku Platform API client
#[derive(Clone)]
pub struct HerokuClient {
    http: HttpClient,
}

impl HerokuClient {
    /// Create a new Heroku client
    ///
    /// # Arguments
    /// * `base_url` - Platform API base URL (e.g., "https://api.heroku.com")
    /// * `token` - API key sent as a bearer token
    pub fn new(base_url: String, token: String) -> Result<Self, HerokuError> {
        Self::with_timeout(base_url, token, DEFAULT_TIMEOUT)
    }

    /// Create a new Heroku client with an explicit per-request timeout
    pub fn with_timeout(base_url: String, token: String, timeout: Duration) -> Result<Self, HerokuError> {
        if token.is_empty() {
            return Err(HerokuError::InvalidRequest("API key must not be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(HerokuError::Http)?;

        Ok(Self {
            http: HttpClient::new(client, base_url, token),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Validate the API key by fetching the current account.
    ///
    /// # Returns
    /// * `Ok(())` - Key is valid and the API is reachable
    /// * `Err(HerokuError)` - Key is invalid or the API is unreachable
    pub async fn validate_token(&self) -> Result<(), HerokuError> {
        debug!("Validating Heroku API key and connectivity");
        let _account: serde_json::Value = self.http.get("/account").await?;
        debug!("API key validated successfully");
        Ok(())
    }

    /// Create a space
    ///
    /// # Returns
    /// * `Ok(Space)` - The space as accepted by Heroku (usually still allocating)
    /// * `Err(HerokuError)` - If the request fails
    pub async fn create_space(
        &self,
        name: &str,
        organization: &str,
        region: &str,
        shield: bool,
    ) -> Result<Space, HerokuError> {
        let request = CreateSpaceRequest {
            name: name.to_string(),
            organization: organization.to_string(),
            region: Some(region.to_string()),
            shield: Some(shield),
        };
        debug!("Creating space {} in organization {} ({})", name, organization, region);
        self.http.post("/spaces", &serde_json::to_value(&request)?).await
    }

    /// Get a space by id or name
    pub async fn get_space(&self, id: &str) -> Result<Space, HerokuError> {
        debug!("Fetching space {} from Heroku", id);
        self.http.get(&format!("/spaces/{}", HttpClient::encode_segment(id))).await
    }

    /// Rename a space
    pub async fn update_space(&self, id: &str, name: &str) -> Result<Space, HerokuError> {
        let request = UpdateSpaceRequest {
            name: Some(name.to_string()),
        };
        debug!("Renaming space {} to {}", id, name);
        self.http
            .patch(&format!("/spaces/{}", HttpClient::encode_segment(id)), &serde_json::to_value(&request)?)
            .await
    }

    /// Delete a space
    pub async fn delete_space(&self, id: &str) -> Result<Space, HerokuError> {
        debug!("Deleting space {}", id);
        self.http.delete(&format!("/spaces/{}", HttpClient::encode_segment(id))).await
    }

    /// Get the outbound NAT sources of an allocated space
    pub async fn get_space_nat(&self, id: &str) -> Result<SpaceNat, HerokuError> {
        debug!("Fetching NAT sources of space {}", id);
        self.http.get(&format!("/spaces/{}/nat", HttpClient::encode_segment(id))).await
    }
}

#[async_trait::async_trait]
impl HerokuClientTrait for HerokuClient {
    fn base_url(&self) -> &str {
        HerokuClient::base_url(self)
    }

    async fn validate_token(&self) -> Result<(), HerokuError> {
        HerokuClient::validate_token(self).await
    }

    async fn create_space(&self, name: &str, organization: &str, region: &str, shield: bool) -> Result<Space, HerokuError> {
        HerokuClient::create_space(self, name, organization, region, shield).await
    }

    async fn get_space(&self, id: &str) -> Result<Space, HerokuError> {
        HerokuClient::get_space(self, id).await
    }

    async fn update_space(&self, id: &str, name: &str) -> Result<Space, HerokuError> {
        HerokuClient::update_space(self, id, name).await
    }

    async fn delete_space(&self, id: &str) -> Result<Space, HerokuError> {
        HerokuClient::delete_space(self, id).await
    }

    async fn get_space_nat(&self, id: &str) -> Result<SpaceNat, HerokuError> {
        HerokuClient::get_space_nat(self, id).await
    }
}
