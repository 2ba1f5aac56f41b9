//! Suite globals: target console, credentials and fixture URLs

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{E2eError, E2eResult};

/// Values the scenarios take from the environment under test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteGlobals {
    /// Console front page
    pub launch_url: String,

    pub login_username: String,
    pub login_password: String,

    /// Client whose services the suite manages, as listed on the clients tab
    #[serde(default = "default_test_client")]
    pub test_client: String,

    pub rest_url_1: String,
    pub rest_url_2: String,

    #[serde(default)]
    pub openapi_url_1: String,
    #[serde(default)]
    pub openapi_url_2: String,

    /// Style fragment of the lock icon when TLS verification is on
    pub service_ssl_auth_on_style: String,
    /// Style fragment of the lock icon when TLS verification is off
    pub service_ssl_auth_off_style: String,

    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Minimum age of a description before a save refreshes its timestamp
    #[serde(default = "default_refresh_window_secs")]
    pub refresh_window_secs: u64,
}

fn default_test_client() -> String {
    "TestService".to_string()
}

fn default_wait_timeout_ms() -> u64 {
    10_000
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_refresh_window_secs() -> u64 {
    60
}

pub const ENV_USERNAME: &str = "SS_CONSOLE_USERNAME";
pub const ENV_PASSWORD: &str = "SS_CONSOLE_PASSWORD";

impl SuiteGlobals {
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        let globals: Self = serde_yaml::from_str(yaml)?;
        globals.validate()?;
        Ok(globals)
    }

    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Credentials from the environment win over the file
    pub fn apply_env(&mut self) {
        if let Ok(user) = std::env::var(ENV_USERNAME) {
            debug!("Using console username from {}", ENV_USERNAME);
            self.login_username = user;
        }
        if let Ok(password) = std::env::var(ENV_PASSWORD) {
            self.login_password = password;
        }
    }

    fn validate(&self) -> E2eResult<()> {
        for (name, value) in [
            ("launch_url", &self.launch_url),
            ("rest_url_1", &self.rest_url_1),
            ("rest_url_2", &self.rest_url_2),
        ] {
            if value.trim().is_empty() {
                return Err(E2eError::Config(format!("{} must not be empty", name)));
            }
        }
        if self.rest_url_1 == self.rest_url_2 {
            return Err(E2eError::Config(
                "rest_url_1 and rest_url_2 must differ".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(E2eError::Config("poll_interval_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// OpenAPI document URLs; only the OpenAPI scenarios need them
    pub fn openapi_urls(&self) -> E2eResult<(&str, &str)> {
        for (name, value) in [
            ("openapi_url_1", &self.openapi_url_1),
            ("openapi_url_2", &self.openapi_url_2),
        ] {
            if value.trim().is_empty() {
                return Err(E2eError::Config(format!(
                    "{} must be set to run the OpenAPI scenarios",
                    name
                )));
            }
        }
        if self.openapi_url_1 == self.openapi_url_2 {
            return Err(E2eError::Config(
                "openapi_url_1 and openapi_url_2 must differ".to_string(),
            ));
        }
        Ok((&self.openapi_url_1, &self.openapi_url_2))
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn refresh_window(&self) -> Duration {
        Duration::from_secs(self.refresh_window_secs)
    }
}

#[cfg(test)]
pub(crate) fn test_globals() -> SuiteGlobals {
    SuiteGlobals::from_yaml(include_str!("../tests/e2e/globals.example.yaml"))
        .expect("example globals parse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_example_globals() {
        let globals = test_globals();
        assert_eq!(globals.test_client, "TestService");
        assert_eq!(globals.wait_timeout(), Duration::from_secs(10));
        assert_eq!(globals.refresh_window(), Duration::from_secs(60));
        assert!(globals.rest_url_2.starts_with("https://"));
    }

    #[test]
    fn test_defaults_apply() {
        let yaml = r#"
launch_url: https://localhost:4000
login_username: xrd
login_password: secret
rest_url_1: https://example.org/a/
rest_url_2: https://example.org/b/
service_ssl_auth_on_style: "color: green"
service_ssl_auth_off_style: "color: red"
"#;
        let globals = SuiteGlobals::from_yaml(yaml).unwrap();
        assert_eq!(globals.poll_interval_ms, 500);
        assert!(globals.openapi_url_1.is_empty());
        let err = globals.openapi_urls().unwrap_err();
        assert!(err.to_string().contains("openapi_url_1"));
    }

    #[test]
    fn test_openapi_urls_from_example() {
        let globals = test_globals();
        let (first, second) = globals.openapi_urls().unwrap();
        assert!(first.ends_with("petstore.yaml"));
        assert!(second.ends_with("petstore-expanded.yaml"));

        let mut same = globals.clone();
        same.openapi_url_2 = same.openapi_url_1.clone();
        assert!(matches!(same.openapi_urls(), Err(E2eError::Config(_))));
    }

    #[test]
    fn test_identical_rest_urls_rejected() {
        let yaml = r#"
launch_url: https://localhost:4000
login_username: xrd
login_password: secret
rest_url_1: https://example.org/a/
rest_url_2: https://example.org/a/
service_ssl_auth_on_style: "color: green"
service_ssl_auth_off_style: "color: red"
"#;
        let err = SuiteGlobals::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, E2eError::Config(_)));
    }
}
