// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Radar bridge — action table, core types, and error definitions shared
// across all crates.

pub mod action;
pub mod config;
pub mod error;
pub mod types;

pub use action::{Action, Arity, Category, Shape, Stream};
pub use config::{BridgeConfig, OffErrorRouting};
pub use error::{RadarError, Result};
pub use types::*;
