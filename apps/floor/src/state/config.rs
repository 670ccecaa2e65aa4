//! # Configuration State
//!
//! Settings the commands need at runtime, taken from [`FloorConfig`] at
//! startup.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::Serialize;
use tableside_core::{Geometry, PlacementScheme};
use tableside_store::FloorConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Table and seat dimensions
    pub geometry: Geometry,

    /// Placement form for new tables
    pub scheme: PlacementScheme,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState::from(&FloorConfig::default())
    }
}

impl From<&FloorConfig> for ConfigState {
    fn from(config: &FloorConfig) -> Self {
        ConfigState {
            geometry: config.geometry,
            scheme: config.scheme(),
            currency_symbol: config.currency_symbol().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_floor_config() {
        let mut floor = FloorConfig::default();
        floor.billing.currency_symbol = "$".to_string();
        floor.layout.scheme = PlacementScheme::Anchored;

        let config = ConfigState::from(&floor);
        assert_eq!(config.scheme, PlacementScheme::Anchored);
        assert_eq!(config.currency_symbol, "$");
    }
}
