//! Controller configuration.
//!
//! Values come from environment variables; the CLI may override them with
//! flags. The API key is only required once a client is built, so commands
//! that never talk to Heroku work without credentials.

use crate::controller::DeletePolicy;
use crate::error::ControllerError;
use heroku_client::HerokuClient;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default Platform API endpoint
pub const DEFAULT_API_URL: &str = "https://api.heroku.com";

/// Default state file used by the CLI
pub const DEFAULT_STATE_FILE: &str = "space-state.json";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration of the space controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub delete_policy: DeletePolicy,
    pub state_file: PathBuf,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            delete_policy: DeletePolicy::default(),
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables
    ///
    /// - `HEROKU_API_URL` (default `https://api.heroku.com`)
    /// - `HEROKU_API_KEY`
    /// - `HEROKU_TIMEOUT_SECS` (default 30)
    /// - `SPACE_DELETE_POLICY` (`idempotent` or `strict`)
    /// - `SPACE_STATE_FILE` (default `space-state.json`)
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ControllerError> {
        let mut config = Self::default();

        if let Some(url) = lookup("HEROKU_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_url = url;
        }
        config.api_key = lookup("HEROKU_API_KEY").filter(|v| !v.trim().is_empty());

        if let Some(raw) = lookup("HEROKU_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| ControllerError::InvalidConfig(
                format!("HEROKU_TIMEOUT_SECS must be a positive integer, got '{}'", raw)
            ))?;
            if secs == 0 {
                return Err(ControllerError::InvalidConfig(
                    "HEROKU_TIMEOUT_SECS must be greater than zero".to_string()
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("SPACE_DELETE_POLICY") {
            config.delete_policy = raw.parse().map_err(ControllerError::InvalidConfig)?;
        }

        if let Some(path) = lookup("SPACE_STATE_FILE").filter(|v| !v.trim().is_empty()) {
            config.state_file = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Build the Heroku client described by this configuration
    pub fn build_client(&self) -> Result<HerokuClient, ControllerError> {
        let api_key = self.api_key.clone().ok_or_else(|| ControllerError::InvalidConfig(
            "HEROKU_API_KEY environment variable (or --api-key) is required".to_string()
        ))?;
        Ok(HerokuClient::with_timeout(self.api_url.clone(), api_key, self.timeout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ControllerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ControllerConfig::default());
        assert_eq!(config.api_url, "https://api.heroku.com");
        assert_eq!(config.delete_policy, DeletePolicy::Idempotent);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = ControllerConfig::from_lookup(lookup_from(&[
            ("HEROKU_API_URL", "http://localhost:5000"),
            ("HEROKU_API_KEY", "secret"),
            ("HEROKU_TIMEOUT_SECS", "5"),
            ("SPACE_DELETE_POLICY", "strict"),
            ("SPACE_STATE_FILE", "/tmp/space.json"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.delete_policy, DeletePolicy::Strict);
        assert_eq!(config.state_file, PathBuf::from("/tmp/space.json"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ControllerConfig::from_lookup(lookup_from(&[("HEROKU_TIMEOUT_SECS", "soon")])).is_err());
        assert!(ControllerConfig::from_lookup(lookup_from(&[("HEROKU_TIMEOUT_SECS", "0")])).is_err());
        assert!(ControllerConfig::from_lookup(lookup_from(&[("SPACE_DELETE_POLICY", "maybe")])).is_err());
    }

    #[test]
    fn test_build_client_requires_api_key() {
        let config = ControllerConfig::default();
        assert!(matches!(config.build_client(), Err(ControllerError::InvalidConfig(_))));

        let config = ControllerConfig {
            api_key: Some("secret".to_string()),
            ..ControllerConfig::default()
        };
        assert!(config.build_client().is_ok());
    }
}
