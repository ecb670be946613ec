//! Test utilities for unit testing the space controller
//!
//! This module provides helpers for creating test data and setting up test scenarios.

use crate::controller::{DeletePolicy, SpaceController};
use heroku_client::{MockHerokuClient, SpaceState};
use space_state::SpaceDesiredState;

/// NAT sources used by allocated test spaces
pub const TEST_NAT_SOURCES: [&str; 2] = ["52.0.0.1/32", "52.0.0.2/32"];

/// Helper to create a controller backed by a fresh mock.
///
/// The mock is returned alongside; both share the same in-memory store.
pub fn create_test_controller() -> (SpaceController, MockHerokuClient) {
    create_test_controller_with_policy(DeletePolicy::Idempotent)
}

/// Same as `create_test_controller` with an explicit delete policy
pub fn create_test_controller_with_policy(policy: DeletePolicy) -> (SpaceController, MockHerokuClient) {
    let mock = MockHerokuClient::new("http://test-heroku");
    let controller = SpaceController::new(Box::new(mock.clone())).with_delete_policy(policy);
    (controller, mock)
}

/// Helper to create the desired state used by most scenarios
pub fn create_test_desired(name: &str) -> SpaceDesiredState {
    SpaceDesiredState::new(name, "my-org", "us")
}

/// Helper to seed an existing space directly in the mock
pub fn seed_space(mock: &MockHerokuClient, id: &str, name: &str, state: SpaceState) {
    let space = heroku_client::mock::Helpers::new("http://test-heroku".to_string())
        .create_space(id, name, "my-org", "us", false, state);
    mock.add_space(space);
}

/// NAT sources as owned strings
pub fn test_nat_sources() -> Vec<String> {
    TEST_NAT_SOURCES.iter().map(|s| s.to_string()).collect()
}
