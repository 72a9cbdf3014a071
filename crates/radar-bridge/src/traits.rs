// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic contract for the native action channel.
//
// The channel is owned by the host runtime and shared by every caller in the
// process. Implementations live in `android` (JNI), `stub` (desktop/CI), and
// `fake` (scripted, for tests).

use radar_core::error::Result;
use radar_core::types::{BridgeRequest, Payload};

/// Handler invoked by the native side with a result or failure payload.
pub type Handler = Box<dyn FnMut(Payload) + Send + 'static>;

/// The success/failure handler pair submitted alongside a request.
///
/// For single-result actions the native side calls exactly one of the two
/// handlers once. For stream actions it may call either any number of times.
pub struct Completion {
    on_success: Handler,
    on_failure: Handler,
}

impl Completion {
    pub fn new<S, F>(on_success: S, on_failure: F) -> Self
    where
        S: FnMut(Payload) + Send + 'static,
        F: FnMut(Payload) + Send + 'static,
    {
        Self {
            on_success: Box::new(on_success),
            on_failure: Box::new(on_failure),
        }
    }

    pub fn succeed(&mut self, payload: Payload) {
        (self.on_success)(payload);
    }

    pub fn fail(&mut self, payload: Payload) {
        (self.on_failure)(payload);
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion").finish_non_exhaustive()
    }
}

/// A process-wide channel into native plugin code.
///
/// `execute` mirrors `execute(onSuccess, onFailure, moduleId, actionName,
/// args)`: the module id, action name, and arguments travel in `request`,
/// the handlers in `completion`. An `Err` return means the channel refused
/// the submission locally and will never call the handlers.
pub trait NativeChannel: Send + Sync {
    /// Human-readable platform name (e.g. "Android", "Desktop (stub)").
    fn platform_name(&self) -> &str;

    fn execute(&self, request: BridgeRequest, completion: Completion) -> Result<()>;
}
