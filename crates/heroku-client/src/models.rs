//! Heroku Platform API models
//!
//! These models match the Platform API v3 schema for spaces.
//! See: https://devcenter.heroku.com/articles/platform-api-reference#space

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Space model matching the Platform API `space` resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Space {
    pub id: String,
    pub name: String,
    pub organization: NestedOrganization,
    pub region: NestedRegion,
    #[serde(default)]
    pub shield: bool,
    pub state: SpaceState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Organization reference embedded in a space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedOrganization {
    pub name: String,
}

/// Region reference embedded in a space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedRegion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// Provisioning state of a space as reported by Heroku
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceState {
    Allocating,
    Allocated,
    Deleting,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for SpaceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SpaceState::Allocating => "allocating",
            SpaceState::Allocated => "allocated",
            SpaceState::Deleting => "deleting",
            SpaceState::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Outbound NAT configuration of a space (`/spaces/{id}/nat`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SpaceNat {
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<NatState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// State of the NAT sub-resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NatState {
    Disabled,
    Updating,
    Enabled,
    #[serde(other)]
    Unknown,
}

/// Request body for creating a space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSpaceRequest {
    pub name: String,
    pub organization: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shield: Option<bool>,
}

/// Request body for updating a space. Only the name is mutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSpaceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Error body returned by the Platform API on failures
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
