// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for action table lookup, dispatch through the scripted
// channel, and callback-id routing in the radar-bridge crate.

use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;

use radar_bridge::callbacks::{CallbackRegistry, NativeResult};
use radar_bridge::fake::ScriptedChannel;
use radar_bridge::{ActionDispatcher, Completion};
use radar_core::action::Action;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_action_lookup(c: &mut Criterion) {
    c.bench_function("action_from_wire_name", |b| {
        b.iter(|| black_box("setForegroundServiceOptions").parse::<Action>())
    });
}

fn bench_invoke(c: &mut Criterion) {
    let channel = Arc::new(ScriptedChannel::new());
    channel.auto_resolve(Action::StartTrackingCustom, json!(null));
    let dispatcher = ActionDispatcher::with_channel(channel.clone());
    let options = json!({ "desiredStoppedUpdateInterval": 0, "desiredMovingUpdateInterval": 60 });

    c.bench_function("invoke_start_tracking_custom", |b| {
        b.iter(|| {
            let deferred = dispatcher.invoke(Action::StartTrackingCustom, vec![options.clone()]);
            channel.clear();
            black_box(deferred)
        })
    });
}

fn bench_callback_routing(c: &mut Criterion) {
    let registry = CallbackRegistry::new();
    let id = registry
        .register(Completion::new(|p| drop(black_box(p)), |_| {}))
        .expect("register");

    c.bench_function("callback_keep_delivery", |b| {
        b.iter(|| {
            registry
                .complete(id, NativeResult::ok(json!({ "stopped": false })).keep())
                .expect("complete")
        })
    });
}

criterion_group!(benches, bench_action_lookup, bench_invoke, bench_callback_routing);
criterion_main!(benches);
