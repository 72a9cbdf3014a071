// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the Radar bridge.

use serde_json::Value;
use thiserror::Error;

use crate::action::{Action, Shape};

/// Top-level error type for all bridge operations.
#[derive(Debug, Error)]
pub enum RadarError {
    // -- Native outcomes --
    /// The native action reported failure. The payload is exactly what the
    /// native side sent; nothing is translated or wrapped.
    #[error("native action failed: {0}")]
    Native(Value),

    /// The native side dropped the completion without ever calling it.
    #[error("native side released `{action}` without settling it")]
    Abandoned { action: Action },

    // -- Dispatch --
    #[error("unknown native action: {0}")]
    UnknownAction(String),

    #[error("`{action}` is not a {expected:?} action")]
    ShapeMismatch { action: Action, expected: Shape },

    #[error("no pending callback with id {0}")]
    UnknownCallback(u64),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RadarError {
    /// The native failure payload, if this error came from the native side.
    pub fn native_payload(&self) -> Option<&Value> {
        match self {
            Self::Native(payload) => Some(payload),
            _ => None,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RadarError>;
