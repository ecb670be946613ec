//! HerokuClient trait for mocking
//!
//! This trait abstracts the HerokuClient so the space controller can be driven
//! by the real API or by an in-memory mock in unit tests.

use crate::error::HerokuError;
use crate::models::*;

/// Trait for the remote space operations of the Heroku Platform API
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait HerokuClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Validate the API key
    async fn validate_token(&self) -> Result<(), HerokuError>;

    // Space Operations
    async fn create_space(&self, name: &str, organization: &str, region: &str, shield: bool) -> Result<Space, HerokuError>;
    async fn get_space(&self, id: &str) -> Result<Space, HerokuError>;
    async fn update_space(&self, id: &str, name: &str) -> Result<Space, HerokuError>;
    async fn delete_space(&self, id: &str) -> Result<Space, HerokuError>;

    // NAT Operations
    async fn get_space_nat(&self, id: &str) -> Result<SpaceNat, HerokuError>;
}
