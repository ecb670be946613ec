//! Helper functions for building space fixtures

use crate::models::*;

/// Helper functions for creating spaces in mock implementations and tests
#[derive(Debug, Clone)]
pub struct Helpers {
    base_url: String,
}

impl Helpers {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    /// Base URL the fixtures belong to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Helper to create NestedOrganization
    pub fn create_nested_organization(&self, name: &str) -> NestedOrganization {
        NestedOrganization {
            name: name.to_string(),
        }
    }

    /// Helper to create NestedRegion
    ///
    /// Region ids are derived from the name so repeated fixtures agree.
    pub fn create_nested_region(&self, name: &str) -> NestedRegion {
        NestedRegion {
            id: Some(format!("region-{}", name.to_lowercase().replace(' ', "-"))),
            name: name.to_string(),
        }
    }

    /// Helper to create a Space in the given state
    pub fn create_space(
        &self,
        id: &str,
        name: &str,
        organization: &str,
        region: &str,
        shield: bool,
        state: SpaceState,
    ) -> Space {
        let now = chrono::Utc::now();
        Space {
            id: id.to_string(),
            name: name.to_string(),
            organization: self.create_nested_organization(organization),
            region: self.create_nested_region(region),
            shield,
            state,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}
