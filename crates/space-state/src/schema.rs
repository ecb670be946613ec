//! JSON schema export
//!
//! The external schema/validation engine consumes these documents to validate
//! declared spaces before they reach the controller.

use crate::space::{FORCE_NEW_FIELDS, SpaceDesiredState, SpaceObservedState};

/// JSON schema of `SpaceDesiredState`, annotated with force-new fields
pub fn desired_state_schema() -> Result<serde_json::Value, serde_json::Error> {
    let mut value = serde_json::to_value(schemars::schema_for!(SpaceDesiredState))?;
    if let Some(object) = value.as_object_mut() {
        object.insert("x-force-new".to_string(), serde_json::to_value(FORCE_NEW_FIELDS)?);
    }
    Ok(value)
}

/// JSON schema of `SpaceObservedState`
pub fn observed_state_schema() -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(schemars::schema_for!(SpaceObservedState))
}
