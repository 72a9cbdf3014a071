// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Radar — native action bridge.
//!
//! Every public entry point maps a symbolic action name and a positional
//! argument list onto one submission through a [`traits::NativeChannel`].
//! Single-result actions come back as a [`dispatcher::Deferred`]; event
//! streams keep the caller's raw data/error handler pair.
//!
//! The channel is injected, so tests substitute `fake::ScriptedChannel`
//! (behind the `test-util` feature) and desktop builds get `stub::StubChannel`.

pub mod api;
pub mod callbacks;
pub mod dispatcher;
pub mod traits;

#[cfg(any(test, feature = "test-util"))]
pub mod fake;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

use std::sync::{Arc, Once};

pub use api::Radar;
pub use dispatcher::{ActionDispatcher, Deferred};
pub use traits::{Completion, NativeChannel};

/// Channel implementation for the target operating system.
pub fn platform_channel() -> Arc<dyn traits::NativeChannel> {
    #[cfg(target_os = "android")]
    {
        // Android: JNI calls into the Java plugin host.
        Arc::new(android::AndroidChannel::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: refuses every submission so non-native builds still link.
        Arc::new(stub::StubChannel)
    }
}

static LOGGING: Once = Once::new();

/// Install a `tracing` fmt subscriber filtered by `RUST_LOG` (default
/// `info`). Safe to call more than once; only the first call has an effect,
/// and an already-installed global subscriber is left alone.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let installed = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .try_init()
            .is_ok();
        if installed {
            tracing::info!("radar bridge logging initialised");
        }
    });
}
