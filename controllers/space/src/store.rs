//! JSON file state store used by the CLI.
//!
//! Holds the identity of the managed space together with the last desired and
//! observed records. The controller itself never touches this file.

use crate::error::ControllerError;
use serde::{Deserialize, Serialize};
use space_state::{SpaceDesiredState, SpaceObservedState};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persisted record of the managed space
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSpace {
    /// Heroku space id. Set as soon as a create succeeds, even if the
    /// follow-up read failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Last applied desired state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired: Option<SpaceDesiredState>,

    /// Last observed state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<SpaceObservedState>,
}

impl StoredSpace {
    /// True when nothing is managed
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }
}

/// State store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record; a missing file is an empty record
    pub fn load(&self) -> Result<StoredSpace, ControllerError> {
        if !self.path.exists() {
            debug!("State file {} does not exist, starting empty", self.path.display());
            return Ok(StoredSpace::default());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(StoredSpace::default());
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the record, replacing the file atomically
    pub fn save(&self, record: &StoredSpace) -> Result<(), ControllerError> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(record)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Saved state to {}", self.path.display());
        Ok(())
    }

    /// Forget the managed space
    pub fn clear(&self) -> Result<(), ControllerError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            debug!("Removed state file {}", self.path.display());
        }
        Ok(())
    }
}
