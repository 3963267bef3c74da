//! Persistent-suggestion strategy.
//!
//! Publishes a single suggestion the platform may auto-join (optionally
//! after user confirmation) and lets the post-connection broadcast race a
//! bounded timer for the attempt's gate. Both terminal paths re-verify
//! ground truth against the association probe before declaring success;
//! the broadcast is trusted optimistically but not blindly.

use futures::StreamExt;
use futures::stream::BoxStream;
use log::{debug, warn};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::arbiter::{Arbiter, AttemptToken};
use crate::gate::CompletionGate;
use crate::models::{ConnectOptions, PublishStatus};
use crate::platform::{NetworkSuggestion, SuggestionEvent, WifiPlatform};
use crate::probe;

pub(crate) async fn run<P: WifiPlatform>(
    arbiter: &Arc<Arbiter<P>>,
    token: AttemptToken,
    opts: &ConnectOptions,
) {
    // Also doubles as the supersede check: a stale fallback must not touch
    // the live attempt's suggestion set.
    if !arbiter.clear_suggestions_for(token).await {
        return;
    }

    let suggestion = NetworkSuggestion::for_target(opts);
    let status = match arbiter.platform().publish_suggestion(&suggestion).await {
        Ok(status) => status,
        Err(e) => {
            warn!("publishing suggestion for '{}' failed: {e}", opts.ssid);
            arbiter.resolve(false, Some(token)).await;
            return;
        }
    };
    if status != PublishStatus::Success {
        warn!("suggestion for '{}' not accepted: {status}", opts.ssid);
        arbiter.resolve(false, Some(token)).await;
        return;
    }

    // The broadcast receiver lives for the whole process; if the platform
    // cannot hand it out, the timer below still bounds the attempt.
    if let Err(e) = arbiter.ensure_receiver().await {
        warn!("suggestion broadcast unavailable: {e}");
    }

    let gate = CompletionGate::new();
    if !arbiter
        .install_suggestion(token, &opts.ssid, gate.clone())
        .await
    {
        debug!("suggestion attempt for '{}' superseded mid-publish", opts.ssid);
        return;
    }

    if let Err(e) = arbiter.platform().show_wifi_picker().await {
        // Non-fatal: the suggestion may still auto-join silently.
        debug!("wifi picker not shown: {e}");
    }

    sleep(arbiter.config().suggestion_timeout).await;
    if gate.try_claim() {
        debug!("suggestion attempt for '{}' timed out, verifying", opts.ssid);
        finish(arbiter, token, &opts.ssid).await;
    }
}

/// Terminal path shared by the timer and the broadcast receiver: verify
/// ground truth, clear the suggestion set, deliver.
async fn finish<P: WifiPlatform>(arbiter: &Arc<Arbiter<P>>, token: AttemptToken, target: &str) {
    let connected = probe::matches_target(arbiter.platform(), target).await;
    arbiter.clear_suggestions_for(token).await;
    arbiter.resolve(connected, Some(token)).await;
}

/// Pumps the platform's post-connection broadcast for the process lifetime.
/// Spawned once by the arbiter; stale or unexpected broadcasts fall through
/// the gate/token checks and are ignored.
pub(crate) fn spawn_receiver<P: WifiPlatform>(
    arbiter: Arc<Arbiter<P>>,
    mut events: BoxStream<'static, SuggestionEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.next().await {
            match event {
                SuggestionEvent::PostConnection => {
                    let Some((token, target)) = arbiter.claim_suggestion().await else {
                        debug!("suggestion broadcast with nothing pending");
                        continue;
                    };
                    debug!("suggestion broadcast for '{target}', verifying");
                    finish(&arbiter, token, &target).await;
                }
            }
        }
    })
}
