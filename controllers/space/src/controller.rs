//! Space lifecycle controller.
//!
//! Maps a declared `SpaceDesiredState` onto Heroku API calls and folds the
//! responses back into a `SpaceObservedState`. Every write is followed by a
//! full read so derived fields (phase, NAT sources) always come from Heroku.

use crate::error::ControllerError;
use heroku_client::{HerokuClientTrait, SpaceState};
use space_state::{LifecyclePhase, SpaceDesiredState, SpaceObservedState};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

/// How `delete` treats a space that is already gone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// "Not found" on delete counts as success
    #[default]
    Idempotent,
    /// "Not found" on delete is reported as `ControllerError::NotFound`
    Strict,
}

impl FromStr for DeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "idempotent" => Ok(DeletePolicy::Idempotent),
            "strict" => Ok(DeletePolicy::Strict),
            other => Err(format!("unknown delete policy '{}' (expected idempotent or strict)", other)),
        }
    }
}

/// Map the Heroku provisioning state onto the observed lifecycle phase
pub fn lifecycle_phase(state: SpaceState) -> LifecyclePhase {
    match state {
        SpaceState::Allocating => LifecyclePhase::Provisioning,
        SpaceState::Allocated => LifecyclePhase::Allocated,
        SpaceState::Deleting => LifecyclePhase::Deprovisioning,
        SpaceState::Unknown => LifecyclePhase::Unknown,
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ControllerError> {
    if value.trim().is_empty() {
        return Err(ControllerError::Validation {
            field,
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Check the fields Heroku requires before any remote call is made
pub fn validate_desired(desired: &SpaceDesiredState) -> Result<(), ControllerError> {
    require_non_empty("name", &desired.name)?;
    require_non_empty("organization", &desired.organization)?;
    require_non_empty("region", &desired.region)?;
    Ok(())
}

/// Reconciles a single Heroku private space.
pub struct SpaceController {
    pub(crate) heroku_client: Box<dyn HerokuClientTrait + Send + Sync>,
    delete_policy: DeletePolicy,
}

impl fmt::Debug for SpaceController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpaceController")
            .field("base_url", &self.heroku_client.base_url())
            .field("delete_policy", &self.delete_policy)
            .finish()
    }
}

impl SpaceController {
    /// Creates a controller driving the given client.
    pub fn new(heroku_client: Box<dyn HerokuClientTrait + Send + Sync>) -> Self {
        Self {
            heroku_client,
            delete_policy: DeletePolicy::default(),
        }
    }

    /// Sets how deletes of already-absent spaces are reported.
    #[must_use]
    pub fn with_delete_policy(mut self, delete_policy: DeletePolicy) -> Self {
        self.delete_policy = delete_policy;
        self
    }

    /// The policy applied to deletes of already-absent spaces.
    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Creates a space and reads it back.
    ///
    /// If the read-back fails the space still exists on Heroku; the error is
    /// `ControllerError::PartialCreate` and carries the new id.
    pub async fn create(&self, desired: &SpaceDesiredState) -> Result<SpaceObservedState, ControllerError> {
        validate_desired(desired)?;

        info!(
            "Creating space {} in organization {} (region: {}, shield: {})",
            desired.name, desired.organization, desired.region, desired.shield
        );

        let space = match self.heroku_client.create_space(
            &desired.name,
            &desired.organization,
            &desired.region,
            desired.shield,
        ).await {
            Ok(space) => space,
            Err(e) => {
                error!("Failed to create space {} in Heroku: {}", desired.name, e);
                return Err(ControllerError::Heroku(e));
            }
        };

        info!("Created space {} in Heroku (ID: {})", space.name, space.id);

        match self.read(&space.id).await {
            Ok(observed) => Ok(observed),
            Err(e) => {
                error!("Space {} was created but reading it back failed: {}", space.id, e);
                Err(ControllerError::PartialCreate {
                    id: space.id,
                    source: Box::new(e),
                })
            }
        }
    }

    /// Rebuilds the observed state of a space from Heroku.
    ///
    /// NAT sources are fetched only for allocated spaces.
    pub async fn read(&self, id: &str) -> Result<SpaceObservedState, ControllerError> {
        require_non_empty("id", id)?;
        debug!("Reading space {}", id);

        let space = match self.heroku_client.get_space(id).await {
            Ok(space) => space,
            Err(e) if e.is_not_found() => {
                warn!("Space {} no longer exists in Heroku", id);
                return Err(ControllerError::from_heroku(id, e));
            }
            Err(e) => {
                error!("Failed to read space {} from Heroku: {}", id, e);
                return Err(ControllerError::Heroku(e));
            }
        };

        let lifecycle_phase = lifecycle_phase(space.state);
        let nat_sources = if lifecycle_phase == LifecyclePhase::Allocated {
            let nat = self.heroku_client
                .get_space_nat(&space.id)
                .await
                .map_err(|e| {
                    // The space itself was just returned; a NAT failure never means it is gone
                    error!("Failed to read NAT sources of space {}: {}", space.id, e);
                    ControllerError::Heroku(e)
                })?;
            nat.sources
        } else {
            debug!("Space {} is {}, NAT sources not available yet", space.id, lifecycle_phase);
            Vec::new()
        };

        Ok(SpaceObservedState {
            id: space.id,
            name: space.name,
            organization: space.organization.name,
            region: space.region.name,
            shield: space.shield,
            lifecycle_phase,
            nat_sources,
        })
    }

    /// Renames a space and reads it back.
    ///
    /// Only the name is sent. Organization, region and shield are force-new
    /// and must never reach this path.
    pub async fn update(&self, id: &str, desired: &SpaceDesiredState) -> Result<SpaceObservedState, ControllerError> {
        require_non_empty("id", id)?;
        require_non_empty("name", &desired.name)?;

        info!("Updating space {} (name: {})", id, desired.name);

        let space = self.heroku_client
            .update_space(id, &desired.name)
            .await
            .map_err(|e| {
                error!("Failed to update space {} in Heroku: {}", id, e);
                ControllerError::from_heroku(id, e)
            })?;

        self.read(&space.id).await
    }

    /// Deletes a space.
    ///
    /// On success the caller drops its record of the space.
    pub async fn delete(&self, id: &str) -> Result<(), ControllerError> {
        require_non_empty("id", id)?;

        info!("Deleting space {}", id);

        match self.heroku_client.delete_space(id).await {
            Ok(space) => {
                info!("Deleted space {} (ID: {}, state: {})", space.name, space.id, space.state);
                Ok(())
            }
            Err(e) if e.is_not_found() && self.delete_policy == DeletePolicy::Idempotent => {
                warn!("Space {} already absent in Heroku, treating delete as complete", id);
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete space {} in Heroku: {}", id, e);
                Err(ControllerError::from_heroku(id, e))
            }
        }
    }

    /// Adopts an existing space by id (or name).
    pub async fn import(&self, id: &str) -> Result<SpaceObservedState, ControllerError> {
        info!("Importing space {}", id);
        self.read(id).await
    }
}
