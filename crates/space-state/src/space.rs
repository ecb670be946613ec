//! Space desired/observed state
//!
//! `SpaceDesiredState` is what the operator declares. `SpaceObservedState` is
//! rebuilt by the controller from Heroku on every read.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fields that can only be set when the space is created.
/// Changing any of them requires destroying and recreating the space.
pub const FORCE_NEW_FIELDS: &[&str] = &["organization", "region", "shield"];

/// SpaceDesiredState defines the desired state of a Heroku private space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceDesiredState {
    /// Space name (can be changed in place)
    pub name: String,

    /// Organization (team) that owns the space. Fixed at creation.
    pub organization: String,

    /// Region the space runs in, e.g. "us" or "virginia". Fixed at creation.
    pub region: String,

    /// Shield (stricter isolation) mode. Fixed at creation.
    #[serde(default)]
    pub shield: bool,
}

impl SpaceDesiredState {
    /// Create a desired state with shield disabled
    pub fn new(name: impl Into<String>, organization: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            organization: organization.into(),
            region: region.into(),
            shield: false,
        }
    }

    /// Builder-style shield toggle
    #[must_use]
    pub fn with_shield(mut self, shield: bool) -> Self {
        self.shield = shield;
        self
    }

    /// Force-new fields whose desired value differs from what Heroku reports.
    ///
    /// A non-empty result means the change cannot be applied by an update.
    pub fn force_new_changes(&self, observed: &SpaceObservedState) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.organization != observed.organization {
            changed.push("organization");
        }
        if self.region != observed.region {
            changed.push("region");
        }
        if self.shield != observed.shield {
            changed.push("shield");
        }
        changed
    }

    /// True when only the in-place updatable name differs
    pub fn needs_rename(&self, observed: &SpaceObservedState) -> bool {
        self.name != observed.name
    }
}

/// Lifecycle phase of a space as observed from Heroku
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum LifecyclePhase {
    /// Network resources are still being allocated
    Provisioning,
    /// Fully allocated; NAT sources are known
    Allocated,
    /// Being torn down
    Deprovisioning,
    #[default]
    Unknown,
}

impl std::fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LifecyclePhase::Provisioning => "provisioning",
            LifecyclePhase::Allocated => "allocated",
            LifecyclePhase::Deprovisioning => "deprovisioning",
            LifecyclePhase::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// SpaceObservedState defines the observed state of a Heroku private space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceObservedState {
    /// Heroku space id, assigned at creation
    pub id: String,

    /// Space name
    pub name: String,

    /// Owning organization
    pub organization: String,

    /// Region name
    pub region: String,

    /// Shield mode
    pub shield: bool,

    /// Provisioning phase reported by Heroku
    #[serde(default)]
    pub lifecycle_phase: LifecyclePhase,

    /// Outbound NAT sources. Always empty before the space is allocated.
    #[serde(default)]
    pub nat_sources: Vec<String>,
}

impl SpaceObservedState {
    /// True once Heroku has finished allocating the space
    pub fn is_allocated(&self) -> bool {
        self.lifecycle_phase == LifecyclePhase::Allocated
    }

    /// NAT sources, or `None` while they are not yet known.
    ///
    /// An empty list from an allocated space means "no sources"; an empty list
    /// from any other phase means nothing.
    pub fn known_nat_sources(&self) -> Option<&[String]> {
        self.is_allocated().then_some(self.nat_sources.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observed(phase: LifecyclePhase, nat: Vec<&str>) -> SpaceObservedState {
        SpaceObservedState {
            id: "sp_123".to_string(),
            name: "tftest-abc".to_string(),
            organization: "my-org".to_string(),
            region: "us".to_string(),
            shield: false,
            lifecycle_phase: phase,
            nat_sources: nat.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_shield_defaults_to_false() {
        let desired: SpaceDesiredState = serde_json::from_value(serde_json::json!({
            "name": "tftest-abc",
            "organization": "my-org",
            "region": "us"
        }))
        .unwrap();
        assert!(!desired.shield);
    }

    #[test]
    fn test_known_nat_sources_only_when_allocated() {
        assert_eq!(observed(LifecyclePhase::Provisioning, vec![]).known_nat_sources(), None);
        assert_eq!(observed(LifecyclePhase::Unknown, vec![]).known_nat_sources(), None);

        let allocated = observed(LifecyclePhase::Allocated, vec!["52.0.0.1/32"]);
        assert_eq!(allocated.known_nat_sources(), Some(&["52.0.0.1/32".to_string()][..]));

        let allocated_empty = observed(LifecyclePhase::Allocated, vec![]);
        assert_eq!(allocated_empty.known_nat_sources(), Some(&[][..]));
    }

    #[test]
    fn test_force_new_changes() {
        let current = observed(LifecyclePhase::Allocated, vec![]);

        let rename_only = SpaceDesiredState::new("tftest-renamed", "my-org", "us");
        assert!(rename_only.force_new_changes(&current).is_empty());
        assert!(rename_only.needs_rename(&current));

        let moved = SpaceDesiredState::new("tftest-abc", "other-org", "eu").with_shield(true);
        assert_eq!(moved.force_new_changes(&current), vec!["organization", "region", "shield"]);
        assert!(!moved.needs_rename(&current));
    }

    #[test]
    fn test_observed_state_uses_camel_case() {
        let value = serde_json::to_value(observed(LifecyclePhase::Allocated, vec!["52.0.0.1/32"])).unwrap();
        assert_eq!(value["lifecyclePhase"], "allocated");
        assert_eq!(value["natSources"][0], "52.0.0.1/32");
    }
}
