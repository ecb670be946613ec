//! Heroku Space Controller
//!
//! Reconciles a single Heroku private space against its declared state:
//! - `SpaceController`: create, read, update, delete and import against the Platform API
//! - `commands`: the caller side used by the CLI (create-or-update, refresh, destroy)
//! - `store`: JSON file holding the managed space between invocations

pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod store;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod commands_test;

pub use config::ControllerConfig;
pub use controller::{DeletePolicy, SpaceController};
pub use error::ControllerError;
pub use store::{FileStateStore, StoredSpace};
