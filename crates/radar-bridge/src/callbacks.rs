// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Callback-id registry for hosts that report completions asynchronously.
//
// Plugin hosts cannot hold Rust closures. Instead, a submission carries a
// numeric callback id, and the host later reports `(id, ok, payload,
// keep_callback)`. Single-result completions clear the entry; stream
// deliveries set `keep_callback` so the entry survives.
//
// Stream registrations never get a final result from the host: teardown
// and re-registration just drop the host's handle. `HostCallbacks` tracks
// which id each stream owns so those entries are released here instead.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use radar_core::action::{Action, Stream};
use radar_core::error::{RadarError, Result};
use radar_core::types::{BridgeRequest, Payload};
use tracing::{debug, warn};

use crate::traits::Completion;

/// Identifier handed to the host for one registered completion.
pub type CallbackId = u64;

/// Which handler a host result is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeStatus {
    Ok,
    Error,
}

/// One completion report from the host.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeResult {
    pub status: NativeStatus,
    pub payload: Payload,
    /// Keep the callback registered for further deliveries.
    pub keep_callback: bool,
}

impl NativeResult {
    pub fn ok(payload: Payload) -> Self {
        Self {
            status: NativeStatus::Ok,
            payload,
            keep_callback: false,
        }
    }

    pub fn error(payload: Payload) -> Self {
        Self {
            status: NativeStatus::Error,
            payload,
            keep_callback: false,
        }
    }

    pub fn keep(mut self) -> Self {
        self.keep_callback = true;
        self
    }

    /// Build a result from the JSON text a host passes across FFI.
    /// Empty text means "no payload" and maps to `null`.
    pub fn from_json(ok: bool, payload_json: &str, keep_callback: bool) -> Result<Self> {
        let payload = if payload_json.trim().is_empty() {
            Payload::Null
        } else {
            serde_json::from_str(payload_json)
                .map_err(|e| RadarError::Bridge(format!("malformed payload from host: {e}")))?
        };
        Ok(Self {
            status: if ok { NativeStatus::Ok } else { NativeStatus::Error },
            payload,
            keep_callback,
        })
    }
}

/// Pending completions keyed by callback id.
#[derive(Default)]
pub struct CallbackRegistry {
    next_id: AtomicU64,
    pending: Mutex<HashMap<CallbackId, Arc<Mutex<Completion>>>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn pending(&self) -> Result<MutexGuard<'_, HashMap<CallbackId, Arc<Mutex<Completion>>>>> {
        self.pending
            .lock()
            .map_err(|_| RadarError::Bridge("callback registry poisoned".into()))
    }

    /// Store `completion` and return the id the host must report back.
    pub fn register(&self, completion: Completion) -> Result<CallbackId> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.pending()?.insert(id, Arc::new(Mutex::new(completion)));
        debug!(callback_id = id, "registered native callback");
        Ok(id)
    }

    /// Route a host report to the registered handlers.
    ///
    /// The handler runs without the registry lock held, so it may register
    /// new callbacks.
    pub fn complete(&self, id: CallbackId, result: NativeResult) -> Result<()> {
        let completion = {
            let mut pending = self.pending()?;
            if result.keep_callback {
                pending.get(&id).cloned()
            } else {
                pending.remove(&id)
            }
        }
        .ok_or(RadarError::UnknownCallback(id))?;

        let mut completion = completion
            .lock()
            .map_err(|_| RadarError::Bridge(format!("callback {id} poisoned")))?;
        match result.status {
            NativeStatus::Ok => completion.succeed(result.payload),
            NativeStatus::Error => completion.fail(result.payload),
        }
        Ok(())
    }

    /// Forget a callback without calling it. Returns whether it existed.
    pub fn release(&self, id: CallbackId) -> bool {
        match self.pending() {
            Ok(mut pending) => pending.remove(&id).is_some(),
            Err(err) => {
                warn!(callback_id = id, error = %err, "could not release callback");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.pending().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ids currently owned by one stream.
#[derive(Debug, Default)]
struct StreamIds {
    subscription: Option<CallbackId>,
    /// Teardown actions are never answered by the host.
    teardown: Option<CallbackId>,
}

/// Callback registry plus per-stream ownership, for hosts that address
/// completions by id.
#[derive(Default)]
pub struct HostCallbacks {
    registry: CallbackRegistry,
    streams: Mutex<HashMap<Stream, StreamIds>>,
}

impl HostCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `completion`, then hand `request` and its id to `call`.
    ///
    /// If `call` fails the host never saw the id, so the entry is released
    /// and the error returned. On success a stream action takes over its
    /// stream's slot and the ids it supersedes are released.
    pub fn submit<F>(&self, request: BridgeRequest, completion: Completion, call: F) -> Result<()>
    where
        F: FnOnce(&BridgeRequest, CallbackId) -> Result<()>,
    {
        let id = self.registry.register(completion)?;
        debug!(
            request_id = %request.id,
            action = %request.action,
            callback_id = id,
            "handing request to host"
        );

        match call(&request, id) {
            Ok(()) => {
                self.track(request.action, id);
                Ok(())
            }
            Err(err) => {
                self.registry.release(id);
                Err(err)
            }
        }
    }

    /// Route a host report to the registered handlers.
    pub fn complete(&self, id: CallbackId, result: NativeResult) -> Result<()> {
        self.registry.complete(id, result)
    }

    /// Id currently registered for `stream`'s handlers, if any.
    pub fn subscription(&self, stream: Stream) -> Option<CallbackId> {
        self.streams().get(&stream).and_then(|ids| ids.subscription)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    fn streams(&self) -> MutexGuard<'_, HashMap<Stream, StreamIds>> {
        self.streams.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn track(&self, action: Action, id: CallbackId) {
        let Some(stream) = Stream::for_action(action) else {
            return;
        };
        let superseded = {
            let mut streams = self.streams();
            let ids = streams.entry(stream).or_default();
            let previous_teardown = ids.teardown.take();
            let previous_subscription = if action == stream.subscribe_action() {
                ids.subscription.replace(id)
            } else {
                ids.teardown = Some(id);
                ids.subscription.take()
            };
            [previous_subscription, previous_teardown]
        };

        // Released outside the stream lock; dropping handlers may re-enter.
        for old in superseded.into_iter().flatten() {
            if self.registry.release(old) {
                debug!(callback_id = old, ?stream, %action, "released superseded stream callback");
            }
        }
    }
}
