// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub channel for desktop/CI builds where no native plugin host exists.
//
// Every submission is refused with `PlatformUnavailable`; the real channel
// lives in the `android` module.

use radar_core::error::{RadarError, Result};
use radar_core::types::BridgeRequest;

use crate::traits::{Completion, NativeChannel};

/// No-op channel returned on non-mobile platforms.
pub struct StubChannel;

impl NativeChannel for StubChannel {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn execute(&self, request: BridgeRequest, _completion: Completion) -> Result<()> {
        tracing::warn!(action = %request.action, "native action submitted to stub channel");
        Err(RadarError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Radar;
    use std::sync::Arc;

    #[tokio::test]
    async fn every_call_is_refused() {
        let radar = Radar::with_channel(Arc::new(StubChannel));
        assert_eq!(radar.dispatcher().platform_name(), "Desktop (stub)");
        assert!(matches!(
            radar.get_user_id().await,
            Err(RadarError::PlatformUnavailable)
        ));
        assert!(matches!(
            radar.on_location(|_| {}, |_| {}),
            Err(RadarError::PlatformUnavailable)
        ));
    }
}
