// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Generic action dispatch over a `NativeChannel`.
//
// `invoke` adapts the two-handler completion protocol into a `Deferred` that
// settles at most once. `subscribe` hands the caller's handlers straight to
// the channel, since stream handlers may fire any number of times.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use radar_core::action::{Action, Shape, Stream};
use radar_core::config::BridgeConfig;
use radar_core::error::{RadarError, Result};
use radar_core::types::{BridgeRequest, Payload, RequestId};
use tokio::sync::oneshot;
use tracing::{debug, trace, warn};

use crate::traits::{Completion, NativeChannel};

/// Pending outcome of a single-result action.
///
/// Resolves to the native success payload, or to `RadarError::Native` with
/// the failure payload exactly as sent. There is no timeout: if the native
/// side holds the handlers and never calls them, this never resolves.
/// Dropping a `Deferred` does not recall the native call.
#[derive(Debug)]
#[must_use = "a Deferred does nothing unless awaited"]
pub struct Deferred {
    action: Action,
    rx: oneshot::Receiver<Result<Payload>>,
}

impl Deferred {
    fn settled(action: Action, outcome: Result<Payload>) -> Self {
        let (tx, rx) = oneshot::channel();
        // The receiver is alive, so this cannot fail.
        let _ = tx.send(outcome);
        Self { action, rx }
    }

    /// Action this result belongs to.
    pub fn action(&self) -> Action {
        self.action
    }
}

impl Future for Deferred {
    type Output = Result<Payload>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let action = self.action;
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|outcome| outcome.unwrap_or_else(|_| Err(RadarError::Abandoned { action })))
    }
}

/// Translates an action plus positional arguments into one submission on the
/// injected channel.
#[derive(Clone)]
pub struct ActionDispatcher {
    channel: Arc<dyn NativeChannel>,
    config: Arc<BridgeConfig>,
}

impl ActionDispatcher {
    pub fn new(channel: Arc<dyn NativeChannel>, config: BridgeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            channel,
            config: Arc::new(config),
        })
    }

    /// Dispatcher with the default configuration (module `"Radar"`).
    pub fn with_channel(channel: Arc<dyn NativeChannel>) -> Self {
        Self {
            channel,
            config: Arc::new(BridgeConfig::default()),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn platform_name(&self) -> &str {
        self.channel.platform_name()
    }

    /// Submit a single-result action. Arguments pass through untouched.
    pub fn invoke(&self, action: Action, args: Vec<Payload>) -> Deferred {
        if action.shape() != Shape::SingleResult {
            return Deferred::settled(
                action,
                Err(RadarError::ShapeMismatch {
                    action,
                    expected: Shape::SingleResult,
                }),
            );
        }
        if !action.arity().accepts(args.len()) {
            // The native side decides what a malformed call means.
            warn!(%action, count = args.len(), arity = ?action.arity(), "unexpected argument count");
        }

        let routed = self.config.off_error_routing.route(action);
        let request = BridgeRequest::new(self.config.module_id.as_str(), routed, args);
        self.log_submission(&request);

        let (tx, rx) = oneshot::channel();
        let slot = Arc::new(Mutex::new(Some(tx)));
        let on_failure_slot = Arc::clone(&slot);
        let log_payloads = self.config.log_payloads;
        let request_id = request.id;

        let completion = Completion::new(
            move |payload| {
                if log_payloads {
                    trace!(%request_id, ?payload, "native success");
                }
                settle_once(&slot, request_id, Ok(payload));
            },
            move |payload| {
                debug!(%request_id, "native failure");
                settle_once(&on_failure_slot, request_id, Err(RadarError::Native(payload)));
            },
        );

        match self.channel.execute(request, completion) {
            Ok(()) => Deferred { action, rx },
            Err(err) => {
                warn!(%action, error = %err, "channel refused submission");
                Deferred::settled(action, Err(err))
            }
        }
    }

    /// Like `invoke`, addressing the action by its wire name.
    ///
    /// Names outside the action table fail here, before anything is
    /// submitted.
    pub fn invoke_named(&self, name: &str, args: Vec<Payload>) -> Result<Deferred> {
        let action = name.parse::<Action>()?;
        Ok(self.invoke(action, args))
    }

    /// Register long-lived handlers for a native event stream.
    ///
    /// Either handler may be called any number of times, in any order, until
    /// the stream is torn down with `unsubscribe`. Registering again does not
    /// cancel an earlier registration here; the native side decides.
    pub fn subscribe<D, E>(&self, stream: Stream, on_data: D, on_error: E) -> Result<()>
    where
        D: FnMut(Payload) + Send + 'static,
        E: FnMut(Payload) + Send + 'static,
    {
        let request = BridgeRequest::new(
            self.config.module_id.as_str(),
            stream.subscribe_action(),
            Vec::new(),
        );
        self.log_submission(&request);
        self.channel
            .execute(request, Completion::new(on_data, on_error))
            .inspect_err(|err| warn!(?stream, error = %err, "channel refused subscription"))
    }

    /// Dispatch the teardown action for `stream`.
    pub fn unsubscribe(&self, stream: Stream) -> Deferred {
        self.invoke(stream.teardown_action(), Vec::new())
    }

    fn log_submission(&self, request: &BridgeRequest) {
        debug!(
            request_id = %request.id,
            module = %request.module,
            action = %request.action,
            platform = self.channel.platform_name(),
            "submitting native action"
        );
        if self.config.log_payloads {
            trace!(request_id = %request.id, args = ?request.args, "native action arguments");
        }
    }
}

type Settlement = Mutex<Option<oneshot::Sender<Result<Payload>>>>;

fn settle_once(slot: &Settlement, request_id: RequestId, outcome: Result<Payload>) {
    let sender = match slot.lock() {
        Ok(mut guard) => guard.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    };
    match sender {
        Some(tx) => {
            if tx.send(outcome).is_err() {
                debug!(%request_id, "result dropped by caller");
            }
        }
        None => debug!(%request_id, "ignoring completion for settled action"),
    }
}
