//! # Floor Configuration
//!
//! Deployment settings for one restaurant floor.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TABLESIDE_LAYOUT_FILE=/srv/floor/main.json                         │
//! │     TABLESIDE_PLACEMENT_SCHEME=anchored                                │
//! │     TABLESIDE_CURRENCY=$                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/tableside/floor.toml (Linux)                             │
//! │     ~/Library/Application Support/com.tableside.floor/floor.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     table_layout.json, sided tables, €                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # floor.toml
//! [layout]
//! file = "table_layout.json"
//! scheme = "sided"        # sided | anchored
//!
//! [geometry]
//! unit = 36
//! min_side = 80
//! seat_offset = 24
//! seat_radius = 12
//! table_diameter = 60
//!
//! [billing]
//! currency_symbol = "€"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tableside_core::{Geometry, PlacementScheme};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// Layout file used when nothing else is configured.
pub const DEFAULT_LAYOUT_FILE: &str = "table_layout.json";

/// Environment variable overriding [`LayoutSettings::file`].
pub const ENV_LAYOUT_FILE: &str = "TABLESIDE_LAYOUT_FILE";

/// Environment variable overriding [`LayoutSettings::scheme`].
pub const ENV_PLACEMENT_SCHEME: &str = "TABLESIDE_PLACEMENT_SCHEME";

/// Environment variable overriding [`BillingSettings::currency_symbol`].
pub const ENV_CURRENCY: &str = "TABLESIDE_CURRENCY";

// =============================================================================
// Layout Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Layout file read at startup and written by save.
    #[serde(default = "default_layout_file")]
    pub file: PathBuf,

    /// Placement form for newly placed tables and the bootstrap layout.
    #[serde(default)]
    pub scheme: PlacementScheme,
}

fn default_layout_file() -> PathBuf {
    PathBuf::from(DEFAULT_LAYOUT_FILE)
}

impl Default for LayoutSettings {
    fn default() -> Self {
        LayoutSettings {
            file: default_layout_file(),
            scheme: PlacementScheme::default(),
        }
    }
}

// =============================================================================
// Billing Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSettings {
    /// Printed after every amount on receipts and bills.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

impl Default for BillingSettings {
    fn default() -> Self {
        BillingSettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Main Floor Configuration
// =============================================================================

/// Complete floor configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorConfig {
    #[serde(default)]
    pub layout: LayoutSettings,

    /// Table and seat dimensions, in map pixels.
    #[serde(default)]
    pub geometry: Geometry,

    #[serde(default)]
    pub billing: BillingSettings,
}

impl FloorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (floor.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading floor config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| StoreError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load floor config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file as pretty TOML.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::io(&path, e))?;

        info!(?path, "Floor config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        let geometry = &self.geometry;
        for (name, value) in [
            ("geometry.unit", geometry.unit),
            ("geometry.min_side", geometry.min_side),
            ("geometry.table_diameter", geometry.table_diameter),
        ] {
            if value == 0 {
                return Err(StoreError::InvalidConfig(format!(
                    "{} must be greater than 0",
                    name
                )));
            }
        }

        if self.billing.currency_symbol.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "billing.currency_symbol must not be empty".into(),
            ));
        }

        if self.layout.file.as_os_str().is_empty() {
            return Err(StoreError::InvalidConfig("layout.file must not be empty".into()));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`FloorConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(file) = lookup(ENV_LAYOUT_FILE) {
            debug!(file = %file, "Overriding layout file from environment");
            self.layout.file = PathBuf::from(file);
        }

        if let Some(scheme) = lookup(ENV_PLACEMENT_SCHEME) {
            match scheme.parse() {
                Ok(parsed) => {
                    debug!(scheme = %scheme, "Overriding placement scheme from environment");
                    self.layout.scheme = parsed;
                }
                Err(_) => warn!(scheme = %scheme, "Unknown placement scheme in environment"),
            }
        }

        if let Some(symbol) = lookup(ENV_CURRENCY) {
            self.billing.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tableside", "floor")
            .map(|dirs| dirs.config_dir().join("floor.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn layout_file(&self) -> &PathBuf {
        &self.layout.file
    }

    pub fn scheme(&self) -> PlacementScheme {
        self.layout.scheme
    }

    pub fn currency_symbol(&self) -> &str {
        &self.billing.currency_symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = FloorConfig::default();
        assert_eq!(config.layout_file(), &PathBuf::from("table_layout.json"));
        assert_eq!(config.scheme(), PlacementScheme::Sided);
        assert_eq!(config.currency_symbol(), "€");
        assert_eq!(config.geometry.unit, 36);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: FloorConfig = toml::from_str(
            r#"
            [layout]
            scheme = "anchored"

            [geometry]
            unit = 40
            "#,
        )
        .unwrap();

        assert_eq!(config.scheme(), PlacementScheme::Anchored);
        assert_eq!(config.geometry.unit, 40);
        assert_eq!(config.geometry.min_side, 80);
        assert_eq!(config.layout_file(), &PathBuf::from("table_layout.json"));
        assert_eq!(config.currency_symbol(), "€");
    }

    #[test]
    fn test_config_validation() {
        let mut config = FloorConfig::default();
        config.geometry.unit = 0;
        assert!(config.validate().is_err());

        let mut config = FloorConfig::default();
        config.billing.currency_symbol = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = FloorConfig::default();
        config.geometry.seat_offset = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_LAYOUT_FILE, "/tmp/terrace.json"),
            (ENV_PLACEMENT_SCHEME, "anchored"),
            (ENV_CURRENCY, "$"),
        ]
        .into_iter()
        .collect();

        let mut config = FloorConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.layout_file(), &PathBuf::from("/tmp/terrace.json"));
        assert_eq!(config.scheme(), PlacementScheme::Anchored);
        assert_eq!(config.currency_symbol(), "$");
    }

    #[test]
    fn test_unknown_scheme_override_is_ignored() {
        let mut config = FloorConfig::default();
        config.apply_overrides(|key| (key == ENV_PLACEMENT_SCHEME).then(|| "hexagon".to_string()));
        assert_eq!(config.scheme(), PlacementScheme::Sided);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("floor.toml");

        let mut config = FloorConfig::default();
        config.billing.currency_symbol = "kr".to_string();
        config.geometry.seat_offset = 30;
        config.save(Some(path.clone())).unwrap();

        let loaded: FloorConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("floor.toml");
        std::fs::write(&path, "[geometry]\nunit = \"wide\"\n").unwrap();

        assert!(matches!(
            FloorConfig::load(Some(path.clone())),
            Err(StoreError::ConfigLoadFailed(_))
        ));
        assert_eq!(FloorConfig::load_or_default(Some(path)).geometry.unit, 36);
    }
}
