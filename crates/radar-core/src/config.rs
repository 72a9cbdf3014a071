// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::{RadarError, Result};

/// Plugin identifier the native side registers under.
pub const DEFAULT_MODULE_ID: &str = "Radar";

/// Which native action `offError` dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffErrorRouting {
    /// `offError` dispatches its own `"offError"` action.
    #[default]
    Distinct,
    /// `offError` dispatches `"offEvents"`, matching older plugin scripts.
    /// Tearing down the error stream then also tears down the events stream.
    AliasOffEvents,
}

impl OffErrorRouting {
    /// Map an action onto the one actually sent to the native side.
    pub fn route(self, action: Action) -> Action {
        match (self, action) {
            (Self::AliasOffEvents, Action::OffError) => Action::OffEvents,
            _ => action,
        }
    }
}

/// Settings for an `ActionDispatcher`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Target module identifier attached to every submission.
    pub module_id: String,
    /// Routing for the `offError` teardown.
    pub off_error_routing: OffErrorRouting,
    /// Include argument and result payloads in trace-level logs.
    /// Off by default: payloads carry user ids and coordinates.
    pub log_payloads: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            module_id: DEFAULT_MODULE_ID.to_owned(),
            off_error_routing: OffErrorRouting::default(),
            log_payloads: false,
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.module_id.trim().is_empty() {
            return Err(RadarError::Config("module_id must not be empty".into()));
        }
        Ok(())
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_radar_with_distinct_off_error() {
        let config = BridgeConfig::default();
        assert_eq!(config.module_id, "Radar");
        assert_eq!(config.off_error_routing, OffErrorRouting::Distinct);
        assert!(!config.log_payloads);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn routing_only_touches_off_error() {
        let alias = OffErrorRouting::AliasOffEvents;
        assert_eq!(alias.route(Action::OffError), Action::OffEvents);
        assert_eq!(alias.route(Action::OffLocation), Action::OffLocation);
        assert_eq!(OffErrorRouting::Distinct.route(Action::OffError), Action::OffError);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bridge.json");
        let config = BridgeConfig {
            module_id: "RadarStaging".into(),
            off_error_routing: OffErrorRouting::AliasOffEvents,
            log_payloads: true,
        };
        config.save(&path).expect("save");
        assert_eq!(BridgeConfig::load(&path).expect("load"), config);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bridge.json");
        std::fs::write(&path, r#"{ "off_error_routing": "alias_off_events" }"#).unwrap();
        let config = BridgeConfig::load(&path).expect("load");
        assert_eq!(config.module_id, "Radar");
        assert_eq!(config.off_error_routing, OffErrorRouting::AliasOffEvents);
    }

    #[test]
    fn empty_module_id_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bridge.json");
        std::fs::write(&path, r#"{ "module_id": "  " }"#).unwrap();
        assert!(matches!(BridgeConfig::load(&path), Err(RadarError::Config(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = BridgeConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, RadarError::Io(_)));
    }
}
