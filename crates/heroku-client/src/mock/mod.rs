//! Mock HerokuClient for unit testing
//!
//! This module provides a mock implementation of HerokuClientTrait that can be used
//! in unit tests without talking to the Platform API.
//!
//! The mock is organized into modules:
//! - `spaces.rs` - Space and NAT operations
//! - `helpers.rs` - Helper functions for building space fixtures
//!
//! Every call is recorded so tests can assert which remote operations a
//! reconciliation step issued, and a failure can be queued per operation.

mod helpers;
mod spaces;

use crate::error::HerokuError;
use crate::heroku_trait::HerokuClientTrait;
use crate::models::*;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub use helpers::Helpers;

/// Remote operations the mock can record and fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    CreateSpace,
    GetSpace,
    GetSpaceNat,
    UpdateSpace,
    DeleteSpace,
}

/// A recorded call against the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub operation: MockOperation,
    /// Space id or name the call targeted (the requested name for creates)
    pub target: String,
}

/// A failure queued for the next call of an operation
#[derive(Debug, Clone)]
pub enum InjectedFailure {
    Api { status: u16, message: String },
    Authentication(String),
    NotFound(String),
}

impl InjectedFailure {
    fn into_error(self) -> HerokuError {
        match self {
            InjectedFailure::Api { status, message } => HerokuError::Api { status, id: None, message },
            InjectedFailure::Authentication(message) => HerokuError::Authentication(message),
            InjectedFailure::NotFound(message) => HerokuError::NotFound(message),
        }
    }
}

/// Mock HerokuClient for testing
///
/// This mock stores spaces in memory. New spaces start in the
/// `allocating` state; tests drive them forward with `allocate_space`.
#[derive(Clone)]
pub struct MockHerokuClient {
    pub(crate) base_url: String,
    // In-memory storage, keyed by space id
    pub(crate) spaces: Arc<Mutex<HashMap<String, Space>>>,
    pub(crate) nat_sources: Arc<Mutex<HashMap<String, Vec<String>>>>,
    pub(crate) calls: Arc<Mutex<Vec<MockCall>>>,
    pub(crate) failures: Arc<Mutex<HashMap<MockOperation, VecDeque<InjectedFailure>>>>,
}

impl MockHerokuClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            spaces: Arc::new(Mutex::new(HashMap::new())),
            nat_sources: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a space to the mock store (for test setup)
    pub fn add_space(&self, space: Space) {
        self.spaces.lock().unwrap().insert(space.id.clone(), space);
    }

    /// Snapshot of a stored space
    pub fn space(&self, id: &str) -> Option<Space> {
        self.spaces.lock().unwrap().get(id).cloned()
    }

    /// Force the provisioning state of a stored space
    pub fn set_space_state(&self, id: &str, state: SpaceState) {
        if let Some(space) = self.spaces.lock().unwrap().get_mut(id) {
            space.state = state;
        }
    }

    /// Set the NAT sources Heroku reports for a space
    pub fn set_nat_sources(&self, id: &str, sources: Vec<String>) {
        self.nat_sources.lock().unwrap().insert(id.to_string(), sources);
    }

    /// Finish allocation of a space with the given NAT sources
    pub fn allocate_space(&self, id: &str, sources: Vec<String>) {
        self.set_space_state(id, SpaceState::Allocated);
        self.set_nat_sources(id, sources);
    }

    /// Remove a space behind the controller's back (out-of-band delete)
    pub fn remove_space(&self, id: &str) {
        self.spaces.lock().unwrap().remove(id);
        self.nat_sources.lock().unwrap().remove(id);
    }

    /// Queue a failure for the next call of `operation`
    pub fn fail_next(&self, operation: MockOperation, failure: InjectedFailure) {
        self.failures
            .lock()
            .unwrap()
            .entry(operation)
            .or_default()
            .push_back(failure);
    }

    /// All calls recorded so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls of one operation
    pub fn call_count(&self, operation: MockOperation) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Record a call and pop a queued failure for it, if any
    pub(crate) fn record(&self, operation: MockOperation, target: &str) -> Result<(), HerokuError> {
        self.calls.lock().unwrap().push(MockCall {
            operation,
            target: target.to_string(),
        });
        let failure = self
            .failures
            .lock()
            .unwrap()
            .get_mut(&operation)
            .and_then(VecDeque::pop_front);
        match failure {
            Some(failure) => Err(failure.into_error()),
            None => Ok(()),
        }
    }

    /// Get helpers instance
    pub(crate) fn helpers(&self) -> Helpers {
        Helpers::new(self.base_url.clone())
    }
}

#[async_trait::async_trait]
impl HerokuClientTrait for MockHerokuClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_token(&self) -> Result<(), HerokuError> {
        Ok(())
    }

    // Space Operations - delegated to spaces module
    async fn create_space(&self, name: &str, organization: &str, region: &str, shield: bool) -> Result<Space, HerokuError> {
        spaces::create_space(self, name, organization, region, shield).await
    }

    async fn get_space(&self, id: &str) -> Result<Space, HerokuError> {
        spaces::get_space(self, id).await
    }

    async fn update_space(&self, id: &str, name: &str) -> Result<Space, HerokuError> {
        spaces::update_space(self, id, name).await
    }

    async fn delete_space(&self, id: &str) -> Result<Space, HerokuError> {
        spaces::delete_space(self, id).await
    }

    async fn get_space_nat(&self, id: &str) -> Result<SpaceNat, HerokuError> {
        spaces::get_space_nat(self, id).await
    }
}
