//! CLI command handlers.
//!
//! These play the caller's role around `SpaceController`: they decide between
//! create and update, keep the state file in step with Heroku, and drop the
//! record once the space is gone.

use crate::controller::SpaceController;
use crate::error::ControllerError;
use crate::store::{FileStateStore, StoredSpace};
use space_state::{SpaceDesiredState, SpaceObservedState};
use tracing::{info, warn};

fn managed_id(record: &StoredSpace) -> Result<String, ControllerError> {
    record.id.clone().ok_or_else(|| ControllerError::Store(
        "no space is recorded in the state file".to_string()
    ))
}

/// Converge the recorded space on `desired`.
///
/// Creates the space when nothing is recorded (or the recorded space is gone),
/// renames it when only the name differs, and refuses force-new changes.
pub async fn apply(
    controller: &SpaceController,
    store: &FileStateStore,
    desired: SpaceDesiredState,
) -> Result<SpaceObservedState, ControllerError> {
    let mut record = store.load()?;

    let current = match record.id.clone() {
        Some(id) => match controller.read(&id).await {
            Ok(observed) => Some(observed),
            Err(e) if e.is_not_found() => {
                warn!("Recorded space {} is gone, it will be recreated", id);
                record = StoredSpace::default();
                None
            }
            Err(e) => return Err(e),
        },
        None => None,
    };

    let observed = match current {
        None => match controller.create(&desired).await {
            Ok(observed) => observed,
            Err(e) => {
                if let Some(id) = e.created_id() {
                    warn!("Recording space {} despite failed read-back; run refresh to retry", id);
                    store.save(&StoredSpace {
                        id: Some(id.to_string()),
                        desired: Some(desired),
                        observed: None,
                    })?;
                }
                return Err(e);
            }
        },
        Some(current) => {
            let changed = desired.force_new_changes(&current);
            if !changed.is_empty() {
                return Err(ControllerError::ReplacementRequired {
                    id: current.id,
                    fields: changed.join(", "),
                });
            }
            if desired.needs_rename(&current) {
                controller.update(&current.id, &desired).await?
            } else {
                info!("Space {} is up to date", current.id);
                current
            }
        }
    };

    record.id = Some(observed.id.clone());
    record.desired = Some(desired);
    record.observed = Some(observed.clone());
    store.save(&record)?;
    Ok(observed)
}

/// Re-read the recorded space.
///
/// Returns `Ok(None)` and clears the state file when the space no longer exists.
pub async fn refresh(
    controller: &SpaceController,
    store: &FileStateStore,
) -> Result<Option<SpaceObservedState>, ControllerError> {
    let mut record = store.load()?;
    let id = managed_id(&record)?;

    match controller.read(&id).await {
        Ok(observed) => {
            record.id = Some(observed.id.clone());
            record.observed = Some(observed.clone());
            store.save(&record)?;
            Ok(Some(observed))
        }
        Err(e) if e.is_not_found() => {
            warn!("Space {} no longer exists, dropping it from state", id);
            store.clear()?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Delete the recorded space and clear the state file
pub async fn destroy(controller: &SpaceController, store: &FileStateStore) -> Result<String, ControllerError> {
    let record = store.load()?;
    let id = managed_id(&record)?;

    controller.delete(&id).await?;
    store.clear()?;
    Ok(id)
}

/// Adopt an existing space into an empty state file
pub async fn import(
    controller: &SpaceController,
    store: &FileStateStore,
    id: &str,
) -> Result<SpaceObservedState, ControllerError> {
    let record = store.load()?;
    if let Some(existing) = record.id {
        return Err(ControllerError::Store(format!(
            "state file already manages space {}",
            existing
        )));
    }

    let observed = controller.import(id).await?;
    let desired = SpaceDesiredState::new(&observed.name, &observed.organization, &observed.region)
        .with_shield(observed.shield);
    store.save(&StoredSpace {
        id: Some(observed.id.clone()),
        desired: Some(desired),
        observed: Some(observed.clone()),
    })?;
    Ok(observed)
}
