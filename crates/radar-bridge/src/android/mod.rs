// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android native channel via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Submissions call the static Java entry point
// `io.radar.cordova.RadarBridge.execute`, which forwards them to the Radar
// plugin. Completions come back through the exported `nativeComplete`.
//
// ## Java side contract
//
// ```java
// package io.radar.cordova;
// final class RadarBridge {
//     static { System.loadLibrary("radar_bridge"); nativeInstall(); }
//     static native void nativeInstall();
//     static native void nativeComplete(long callbackId, boolean ok,
//                                       String payloadJson, boolean keepCallback);
//     static void execute(String module, String action, String argsJson,
//                         long callbackId) { ... }
// }
// ```
//
// `nativeInstall` must run on a thread with the app class loader (the static
// initialiser does), because `FindClass` on natively attached threads only
// sees system classes.

#![cfg(target_os = "android")]

use std::sync::OnceLock;

use jni::objects::{GlobalRef, JClass, JString, JValue};
use jni::sys::{jboolean, jlong, JNI_FALSE};
use jni::{JNIEnv, JavaVM};

use radar_core::error::{RadarError, Result};
use radar_core::types::BridgeRequest;

use crate::callbacks::{CallbackId, HostCallbacks, NativeResult};
use crate::traits::{Completion, NativeChannel};

/// JNI signature of `RadarBridge.execute(String, String, String, long)`.
const EXECUTE_SIG: &str = "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;J)V";

static VM: OnceLock<JavaVM> = OnceLock::new();
static BRIDGE_CLASS: OnceLock<GlobalRef> = OnceLock::new();
static CALLBACKS: OnceLock<HostCallbacks> = OnceLock::new();

/// Process-wide callbacks shared by every `AndroidChannel`; completions
/// arrive through a static JNI entry point with no channel handle.
fn callbacks() -> &'static HostCallbacks {
    CALLBACKS.get_or_init(HostCallbacks::new)
}

/// Obtain a [`JNIEnv`] for the current thread.
///
/// The `JavaVM*` comes from `ndk_context::android_context()`, set by
/// `android_main` or `ANativeActivity_onCreate`. The thread stays attached.
fn jni_env() -> Result<JNIEnv<'static>> {
    let vm = match VM.get() {
        Some(vm) => vm,
        None => {
            let ctx = ndk_context::android_context();
            // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
            // The pointer is guaranteed valid for the lifetime of the process.
            let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
                .map_err(|e| jni_err("failed to obtain JavaVM", e))?;
            VM.get_or_init(|| vm)
        }
    };
    vm.attach_current_thread_permanently()
        .map_err(|e| jni_err("failed to attach JNI thread", e))
}

/// Convenience: map any `jni::errors::Error` into `RadarError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> RadarError {
    RadarError::Bridge(format!("{context}: {e}"))
}

/// Android implementation of the native action channel.
///
/// Zero-sized; pending completions live in the process-wide registry.
pub struct AndroidChannel;

impl AndroidChannel {
    /// Create a new Android channel.
    ///
    /// This does **not** touch JNI; the first JNI call happens on the first
    /// submission.
    pub fn new() -> Self {
        Self
    }

    fn call_execute(request: &BridgeRequest, id: CallbackId) -> Result<()> {
        let args_json = request.args_json()?;
        let class = BRIDGE_CLASS.get().ok_or_else(|| {
            RadarError::Bridge("RadarBridge.nativeInstall has not run".into())
        })?;
        let mut env = jni_env()?;

        let module = env
            .new_string(&request.module)
            .map_err(|e| jni_err("new_string(module)", e))?;
        let action = env
            .new_string(request.action.name())
            .map_err(|e| jni_err("new_string(action)", e))?;
        let args = env
            .new_string(&args_json)
            .map_err(|e| jni_err("new_string(args)", e))?;

        let class: &JClass = class.as_obj().into();
        env.call_static_method(
            class,
            "execute",
            EXECUTE_SIG,
            &[
                JValue::Object(&module),
                JValue::Object(&action),
                JValue::Object(&args),
                JValue::Long(id as jlong),
            ],
        )
        .map_err(|e| jni_err("RadarBridge.execute", e))?;
        Ok(())
    }
}

impl Default for AndroidChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeChannel for AndroidChannel {
    fn platform_name(&self) -> &str {
        "Android"
    }

    fn execute(&self, request: BridgeRequest, completion: Completion) -> Result<()> {
        callbacks().submit(request, completion, Self::call_execute)
    }
}

// ---------------------------------------------------------------------------
// Exported JNI entry points
// ---------------------------------------------------------------------------

/// `RadarBridge.nativeInstall()`: remember the bridge class and the VM.
#[unsafe(no_mangle)]
pub extern "system" fn Java_io_radar_cordova_RadarBridge_nativeInstall<'local>(
    env: JNIEnv<'local>,
    class: JClass<'local>,
) {
    match env.get_java_vm() {
        Ok(vm) => {
            let _ = VM.set(vm);
        }
        Err(e) => tracing::error!(error = %e, "nativeInstall: no JavaVM"),
    }
    match env.new_global_ref(&class) {
        Ok(global) => {
            if BRIDGE_CLASS.set(global).is_err() {
                tracing::debug!("nativeInstall called more than once");
            }
        }
        Err(e) => tracing::error!(error = %e, "nativeInstall: cannot pin RadarBridge class"),
    }
}

/// `RadarBridge.nativeComplete(long, boolean, String, boolean)`: route a
/// plugin result back to the registered handlers.
#[unsafe(no_mangle)]
pub extern "system" fn Java_io_radar_cordova_RadarBridge_nativeComplete<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    callback_id: jlong,
    ok: jboolean,
    payload_json: JString<'local>,
    keep_callback: jboolean,
) {
    // Java passes null for results without a payload.
    let text = if payload_json.is_null() {
        String::new()
    } else {
        match env.get_string(&payload_json) {
            Ok(s) => s.into(),
            Err(e) => {
                tracing::error!(callback_id, error = %e, "nativeComplete: unreadable payload");
                return;
            }
        }
    };

    let result = NativeResult::from_json(ok != JNI_FALSE, &text, keep_callback != JNI_FALSE)
        .and_then(|result| callbacks().complete(callback_id as CallbackId, result));
    if let Err(e) = result {
        tracing::warn!(callback_id, error = %e, "nativeComplete: dropped host result");
    }
}
