//! Server configuration
//!
//! Loaded from a TOML file at startup. Collaborator base URLs, sampling
//! windows, and timeouts come from the file; credentials may come from the
//! file or be overridden with `CROPSIGHT_CLIENT_ID` / `CROPSIGHT_CLIENT_SECRET`
//! so secrets can stay out of checked-in configuration.

use cropsight_clients::Credentials;
use cropsight_core::SamplingWindow;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Collaborator base URLs
    pub services: ServicesConfig,
    /// Imagery provider credentials
    pub credentials: Credentials,
    /// Sampling windows
    #[serde(default)]
    pub windows: WindowsConfig,
    /// Outbound call and whole-run timeouts
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

/// Base URLs of the five remote collaborators
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// OAuth2 token issuer
    pub auth_url: String,
    /// Coordinate directory
    pub directory_url: String,
    /// Imagery provider
    pub imagery_url: String,
    /// NDVI comparator service
    pub comparator_url: String,
    /// Snapshot upload service
    pub uploader_url: String,
}

/// Before/after sampling windows
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WindowsConfig {
    /// Earlier window
    pub before: SamplingWindow,
    /// Later window
    pub after: SamplingWindow,
}

impl Default for WindowsConfig {
    fn default() -> Self {
        Self {
            before: SamplingWindow::new(2023, 5),
            after: SamplingWindow::new(2023, 6),
        }
    }
}

/// Timeout configuration, in seconds
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TimeoutsConfig {
    /// Per outbound HTTP call
    #[serde(default = "default_call_secs")]
    pub call_secs: u64,
    /// Whole pipeline run; absent means no run-level bound
    #[serde(default)]
    pub run_secs: Option<u64>,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            call_secs: default_call_secs(),
            run_secs: None,
        }
    }
}

fn default_listen() -> SocketAddr {
    "127.0.0.1:8080".parse().expect("static listen address")
}

fn default_call_secs() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from a TOML file, applying environment overrides.
    ///
    /// # Errors
    /// `ConfigError` when the file is unreadable or malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let mut config: AppConfig =
            toml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(client_id) = std::env::var("CROPSIGHT_CLIENT_ID") {
            self.credentials.client_id = client_id;
        }
        if let Ok(client_secret) = std::env::var("CROPSIGHT_CLIENT_SECRET") {
            self.credentials.client_secret = client_secret;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        listen = "0.0.0.0:9090"

        [services]
        auth_url = "https://issuer.example"
        directory_url = "https://directory.example"
        imagery_url = "https://imagery.example"
        comparator_url = "https://comparator.example"
        uploader_url = "https://uploader.example"

        [credentials]
        client_id = "id-1"
        client_secret = "secret-1"

        [windows]
        before = { year = 2024, month = 3 }
        after = { year = 2024, month = 4 }

        [timeouts]
        call_secs = 10
        run_secs = 60
    "#;

    #[test]
    fn full_config_parses() {
        let config: AppConfig = toml::from_str(SAMPLE).unwrap();

        assert_eq!(config.listen, "0.0.0.0:9090".parse().unwrap());
        assert_eq!(config.services.imagery_url, "https://imagery.example");
        assert_eq!(config.credentials.client_id, "id-1");
        assert_eq!(config.windows.before, SamplingWindow::new(2024, 3));
        assert_eq!(config.timeouts.call_secs, 10);
        assert_eq!(config.timeouts.run_secs, Some(60));
    }

    #[test]
    fn optional_sections_default() {
        let minimal = r#"
            [services]
            auth_url = "https://issuer.example"
            directory_url = "https://directory.example"
            imagery_url = "https://imagery.example"
            comparator_url = "https://comparator.example"
            uploader_url = "https://uploader.example"

            [credentials]
            client_id = "id-1"
            client_secret = "secret-1"
        "#;

        let config: AppConfig = toml::from_str(minimal).unwrap();
        assert_eq!(config.listen, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.windows.before, SamplingWindow::new(2023, 5));
        assert_eq!(config.windows.after, SamplingWindow::new(2023, 6));
        assert_eq!(config.timeouts.call_secs, 30);
        assert_eq!(config.timeouts.run_secs, None);
    }
}
