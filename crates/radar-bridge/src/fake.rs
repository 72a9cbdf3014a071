// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scripted in-process channel for tests.
//
// Records every submission and keeps its completion so a test can play the
// native side: settle a call, push stream deliveries, or drop the handlers.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use radar_core::action::{Action, Stream};
use radar_core::error::{RadarError, Result};
use radar_core::types::{BridgeRequest, Payload};

use crate::traits::{Completion, NativeChannel};

#[derive(Debug, Clone)]
enum Scripted {
    Resolve(Payload),
    Reject(Payload),
}

#[derive(Default)]
struct Inner {
    requests: Vec<BridgeRequest>,
    completions: Vec<Option<Completion>>,
    scripted: HashMap<Action, Scripted>,
    refuse: bool,
}

/// A `NativeChannel` driven by the test instead of a platform SDK.
#[derive(Default)]
pub struct ScriptedChannel {
    inner: Mutex<Inner>,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panicking handler inside a test must not hide later assertions.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Answer every future submission of `action` with a success payload.
    pub fn auto_resolve(&self, action: Action, payload: Payload) {
        self.lock().scripted.insert(action, Scripted::Resolve(payload));
    }

    /// Answer every future submission of `action` with a failure payload.
    pub fn auto_reject(&self, action: Action, payload: Payload) {
        self.lock().scripted.insert(action, Scripted::Reject(payload));
    }

    /// Refuse all further submissions, like a channel with no native host.
    pub fn refuse_submissions(&self) {
        self.lock().refuse = true;
    }

    /// Forget recorded requests and pending completions; scripts stay.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.requests.clear();
        inner.completions.clear();
    }

    /// Snapshot of every request accepted so far, in submission order.
    pub fn requests(&self) -> Vec<BridgeRequest> {
        self.lock().requests.clone()
    }

    pub fn submissions(&self) -> usize {
        self.lock().requests.len()
    }

    /// Index of the most recent submission of `action`.
    pub fn latest(&self, action: Action) -> Option<usize> {
        self.lock().requests.iter().rposition(|r| r.action == action)
    }

    /// Index of the most recent registration for `stream`.
    pub fn subscription(&self, stream: Stream) -> Option<usize> {
        self.latest(stream.subscribe_action())
    }

    /// Call the success handler of submission `index` once and release it.
    pub fn resolve(&self, index: usize, payload: Payload) -> bool {
        self.settle(index, |c| c.succeed(payload))
    }

    /// Call the failure handler of submission `index` once and release it.
    pub fn reject(&self, index: usize, payload: Payload) -> bool {
        self.settle(index, |c| c.fail(payload))
    }

    /// Call the success handler of submission `index`, keeping it registered.
    pub fn deliver(&self, index: usize, payload: Payload) -> bool {
        self.keep(index, |c| c.succeed(payload))
    }

    /// Call the failure handler of submission `index`, keeping it registered.
    pub fn deliver_error(&self, index: usize, payload: Payload) -> bool {
        self.keep(index, |c| c.fail(payload))
    }

    /// Drop the handlers of submission `index` without calling either.
    pub fn abandon(&self, index: usize) -> bool {
        self.take(index).is_some()
    }

    fn take(&self, index: usize) -> Option<Completion> {
        self.lock().completions.get_mut(index).and_then(Option::take)
    }

    fn settle(&self, index: usize, f: impl FnOnce(&mut Completion)) -> bool {
        match self.take(index) {
            Some(mut completion) => {
                f(&mut completion);
                true
            }
            None => false,
        }
    }

    fn keep(&self, index: usize, f: impl FnOnce(&mut Completion)) -> bool {
        let Some(mut completion) = self.take(index) else {
            return false;
        };
        // Handlers run without the lock held so they may submit again.
        f(&mut completion);
        if let Some(slot) = self.lock().completions.get_mut(index) {
            *slot = Some(completion);
        }
        true
    }
}

impl NativeChannel for ScriptedChannel {
    fn platform_name(&self) -> &str {
        "Scripted"
    }

    fn execute(&self, request: BridgeRequest, completion: Completion) -> Result<()> {
        let answer = {
            let mut inner = self.lock();
            if inner.refuse {
                return Err(RadarError::PlatformUnavailable);
            }
            let scripted = inner.scripted.get(&request.action).cloned();
            inner.requests.push(request);
            match scripted {
                Some(scripted) => {
                    inner.completions.push(None);
                    Some((scripted, completion))
                }
                None => {
                    inner.completions.push(Some(completion));
                    None
                }
            }
        };

        match answer {
            Some((Scripted::Resolve(payload), mut completion)) => completion.succeed(payload),
            Some((Scripted::Reject(payload), mut completion)) => completion.fail(payload),
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn recorder() -> (Arc<Mutex<Vec<Payload>>>, Completion) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let ok = Arc::clone(&seen);
        let err = Arc::clone(&seen);
        let completion = Completion::new(
            move |p| ok.lock().unwrap().push(json!({ "ok": p })),
            move |p| err.lock().unwrap().push(json!({ "err": p })),
        );
        (seen, completion)
    }

    #[test]
    fn records_requests_in_order() {
        let channel = ScriptedChannel::new();
        for action in [Action::GetUserId, Action::IsTracking] {
            let (_, completion) = recorder();
            channel
                .execute(BridgeRequest::new("Radar", action, vec![]), completion)
                .unwrap();
        }
        let actions: Vec<_> = channel.requests().iter().map(|r| r.action).collect();
        assert_eq!(actions, vec![Action::GetUserId, Action::IsTracking]);
        assert_eq!(channel.latest(Action::IsTracking), Some(1));
    }

    #[test]
    fn resolve_consumes_but_deliver_keeps() {
        let channel = ScriptedChannel::new();
        let (seen, completion) = recorder();
        channel
            .execute(BridgeRequest::new("Radar", Action::OnLocation, vec![]), completion)
            .unwrap();

        assert!(channel.deliver(0, json!(1)));
        assert!(channel.deliver_error(0, json!(2)));
        assert!(channel.resolve(0, json!(3)));
        assert!(!channel.resolve(0, json!(4)));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![json!({"ok": 1}), json!({"err": 2}), json!({"ok": 3})]
        );
    }

    #[test]
    fn scripted_answers_fire_immediately() {
        let channel = ScriptedChannel::new();
        channel.auto_reject(Action::Geocode, json!({ "status": "ERROR_SERVER" }));
        let (seen, completion) = recorder();
        channel
            .execute(
                BridgeRequest::new("Radar", Action::Geocode, vec![json!("20 jay st")]),
                completion,
            )
            .unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![json!({ "err": { "status": "ERROR_SERVER" } })]
        );
        assert!(!channel.resolve(0, json!(null)));
    }

    #[test]
    fn refusal_records_nothing() {
        let channel = ScriptedChannel::new();
        channel.refuse_submissions();
        let (_, completion) = recorder();
        let err = channel
            .execute(BridgeRequest::new("Radar", Action::GetUserId, vec![]), completion)
            .unwrap_err();
        assert!(matches!(err, RadarError::PlatformUnavailable));
        assert_eq!(channel.submissions(), 0);
    }
}
