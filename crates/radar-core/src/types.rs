// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core data types carried across the native bridge.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::action::Action;
use crate::error::Result;

/// Opaque value exchanged with the native side: arguments, results, and
/// failure payloads alike.
pub type Payload = Value;

/// Unique identifier for a single bridge submission, used for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One request submitted to the native channel.
///
/// Built synchronously per call and handed to the channel by value; nothing
/// keeps it once the channel has accepted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeRequest {
    pub id: RequestId,
    /// Target plugin identifier on the native side (e.g. `"Radar"`).
    pub module: String,
    pub action: Action,
    /// Positional arguments, forwarded exactly as the caller supplied them.
    pub args: Vec<Payload>,
    pub submitted_at: DateTime<Utc>,
}

impl BridgeRequest {
    pub fn new(module: impl Into<String>, action: Action, args: Vec<Payload>) -> Self {
        Self {
            id: RequestId::new(),
            module: module.into(),
            action,
            args,
            submitted_at: Utc::now(),
        }
    }

    /// Arguments encoded as the JSON array the native plugin expects.
    pub fn args_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.args)?)
    }
}

/// Deserialize a native payload into a caller-chosen type.
pub fn decode<T: DeserializeOwned>(payload: Payload) -> Result<T> {
    Ok(serde_json::from_value(payload)?)
}

/// SDK log verbosity accepted by `setLogLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl From<LogLevel> for Value {
    fn from(level: LogLevel) -> Self {
        Value::from(level.as_str())
    }
}

/// Location accuracy requested from `getLocation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredAccuracy {
    Low,
    Medium,
    High,
}

impl DesiredAccuracy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl From<DesiredAccuracy> for Value {
    fn from(accuracy: DesiredAccuracy) -> Self {
        Value::from(accuracy.as_str())
    }
}

/// Location permission state reported by `getPermissionsStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionsStatus {
    GrantedBackground,
    GrantedForeground,
    Denied,
    NotDetermined,
    #[serde(other)]
    Unknown,
}

impl PermissionsStatus {
    /// Whether any location access has been granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::GrantedBackground | Self::GrantedForeground)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_carries_args_verbatim() {
        let options = json!({ "interval": 60, "sync": "all" });
        let req = BridgeRequest::new("Radar", Action::StartTrackingCustom, vec![options.clone()]);
        assert_eq!(req.module, "Radar");
        assert_eq!(req.args, vec![options]);
        assert_eq!(req.args_json().unwrap(), r#"[{"interval":60,"sync":"all"}]"#);
    }

    #[test]
    fn request_ids_are_unique() {
        let a = BridgeRequest::new("Radar", Action::GetUserId, vec![]);
        let b = BridgeRequest::new("Radar", Action::GetUserId, vec![]);
        assert_ne!(a.id, b.id);
        assert_eq!(a.args_json().unwrap(), "[]");
    }

    #[test]
    fn typed_arguments_use_native_spellings() {
        assert_eq!(Value::from(LogLevel::Warning), json!("warning"));
        assert_eq!(Value::from(DesiredAccuracy::High), json!("high"));
        assert_eq!(serde_json::to_value(LogLevel::Debug).unwrap(), json!("debug"));
    }

    #[test]
    fn desired_accuracy_matches_get_location_values() {
        assert_eq!(Value::from(DesiredAccuracy::Low), json!("low"));
        assert_eq!(Value::from(DesiredAccuracy::Medium), json!("medium"));
        assert!(serde_json::from_value::<DesiredAccuracy>(json!("none")).is_err());
    }

    #[test]
    fn permissions_status_decodes_native_strings() {
        let status: PermissionsStatus = decode(json!("GRANTED_FOREGROUND")).unwrap();
        assert_eq!(status, PermissionsStatus::GrantedForeground);
        assert!(status.is_granted());

        let status: PermissionsStatus = decode(json!("DENIED")).unwrap();
        assert!(!status.is_granted());

        let status: PermissionsStatus = decode(json!("RESTRICTED")).unwrap();
        assert_eq!(status, PermissionsStatus::Unknown);
    }

    #[test]
    fn decode_reports_shape_errors() {
        let result: Result<bool> = decode(json!({ "status": "SUCCESS" }));
        assert!(result.is_err());
    }
}
