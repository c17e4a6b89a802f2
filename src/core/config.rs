//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.fleetdeck/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FleetdeckConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub feeds: FeedsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub items_per_page: Option<usize>,
    /// Artificial delay before publishing fetch results, in milliseconds.
    /// Useful for exercising the loading state against a local feed server
    /// that responds instantly. 0 (the default) disables it.
    pub simulate_latency_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FeedsConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub items_per_page: usize,
    pub simulate_latency_ms: u64,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.fleetdeck/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".fleetdeck").join("config.toml"))
}

/// Load config from `~/.fleetdeck/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FleetdeckConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FleetdeckConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FleetdeckConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(FleetdeckConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: FleetdeckConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Fleetdeck Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# items_per_page = 20
# simulate_latency_ms = 0      # Delay before publishing fetched data (dev only)

# [feeds]
# base_url = "http://localhost:5001"   # Or set FLEETDECK_BASE_URL env var
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// The `cli_*` parameters come from CLI flags (None = not specified).
pub fn resolve(
    config: &FleetdeckConfig,
    cli_base_url: Option<&str>,
    cli_items_per_page: Option<usize>,
    cli_simulate_latency_ms: Option<u64>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("FLEETDECK_BASE_URL").ok())
        .or_else(|| config.feeds.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Items per page: CLI → config → default
    let items_per_page = cli_items_per_page
        .or(config.general.items_per_page)
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
        .max(1);

    // Simulated latency: CLI → config → off
    let simulate_latency_ms = cli_simulate_latency_ms
        .or(config.general.simulate_latency_ms)
        .unwrap_or(0);

    ResolvedConfig {
        base_url,
        items_per_page,
        simulate_latency_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = FleetdeckConfig::default();
        assert!(config.general.items_per_page.is_none());
        assert!(config.feeds.base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = FleetdeckConfig::default();
        let resolved = resolve(&config, None, None, None);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.items_per_page, DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(resolved.simulate_latency_ms, 0);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = FleetdeckConfig {
            general: GeneralConfig {
                items_per_page: Some(10),
                simulate_latency_ms: Some(2000),
            },
            feeds: FeedsConfig {
                base_url: Some("http://fleet.internal:8080".to_string()),
            },
        };
        let resolved = resolve(&config, None, None, None);
        assert_eq!(resolved.base_url, "http://fleet.internal:8080");
        assert_eq!(resolved.items_per_page, 10);
        assert_eq!(resolved.simulate_latency_ms, 2000);
    }

    #[test]
    fn test_resolve_cli_flags_win() {
        let config = FleetdeckConfig {
            feeds: FeedsConfig {
                base_url: Some("http://fleet.internal:8080".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("http://localhost:9999"), Some(5), None);
        assert_eq!(resolved.base_url, "http://localhost:9999");
        assert_eq!(resolved.items_per_page, 5);
    }

    #[test]
    fn test_resolve_clamps_zero_items_per_page() {
        // A zero page size would make pagination degenerate
        let resolved = resolve(&FleetdeckConfig::default(), None, Some(0), None);
        assert_eq!(resolved.items_per_page, 1);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
items_per_page = 50
"#;
        let config: FleetdeckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.items_per_page, Some(50));
        assert!(config.general.simulate_latency_ms.is_none());
        assert!(config.feeds.base_url.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
items_per_page = 25
simulate_latency_ms = 500

[feeds]
base_url = "http://localhost:5001"
"#;
        let config: FleetdeckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.items_per_page, Some(25));
        assert_eq!(config.general.simulate_latency_ms, Some(500));
        assert_eq!(config.feeds.base_url.as_deref(), Some("http://localhost:5001"));
    }
}
