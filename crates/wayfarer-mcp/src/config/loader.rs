//! Server configuration: defaults, TOML file, environment overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable holding the admin key, overriding any file value.
const ADMIN_KEY_ENV: &str = "WAYFARER_ADMIN_KEY";

/// Authentication configuration consumed by the gatekeeper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// When false, every method bypasses the gatekeeper entirely.
    pub require_auth: bool,
    /// Admin key accepted without any storage read.
    pub admin_key: Option<String>,
    /// Enable direct index lookup of supplied keys.
    pub enable_key_index: bool,
    /// Enable the budget-capped linear key scan.
    pub enable_fallback_scan: bool,
    /// Maximum fallback scans per 60-second window.
    pub fallback_scan_rate_limit: u64,
    /// Maximum fallback scans for the process lifetime.
    pub fallback_scan_budget: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            require_auth: false,
            admin_key: None,
            enable_key_index: true,
            enable_fallback_scan: false,
            fallback_scan_rate_limit: 10,
            fallback_scan_budget: 1000,
        }
    }
}

/// Full server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Authentication settings.
    pub auth: AuthConfig,
    /// Default log level when RUST_LOG is unset.
    pub log_level: Option<String>,
    /// JSON file of key/value pairs to seed the in-memory store.
    pub data_file: Option<String>,
}

/// Load configuration from an optional TOML file, then apply environment
/// overrides. A missing path argument yields the defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<ServerConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(Path::new(path))
                .map_err(|e| anyhow::anyhow!("cannot read config file {path}: {e}"))?;
            toml::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("cannot parse config file {path}: {e}"))?
        }
        None => ServerConfig::default(),
    };

    if let Ok(admin_key) = std::env::var(ADMIN_KEY_ENV) {
        if !admin_key.is_empty() {
            config.auth.admin_key = Some(admin_key);
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_disable_auth() {
        let config = ServerConfig::default();
        assert!(!config.auth.require_auth);
        assert!(config.auth.enable_key_index);
        assert!(!config.auth.enable_fallback_scan);
    }

    #[test]
    fn parses_auth_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[auth]\nrequire_auth = true\nadmin_key = \"sekrit\"\n\
             enable_fallback_scan = true\nfallback_scan_budget = 5\n\
             fallback_scan_rate_limit = 2"
        )
        .unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert!(config.auth.require_auth);
        assert_eq!(config.auth.admin_key.as_deref(), Some("sekrit"));
        assert!(config.auth.enable_fallback_scan);
        assert_eq!(config.auth.fallback_scan_budget, 5);
        assert_eq!(config.auth.fallback_scan_rate_limit, 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Some("/nonexistent/wayfarer.toml")).is_err());
    }
}
