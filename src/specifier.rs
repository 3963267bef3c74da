//! Scoped ephemeral request strategy.
//!
//! Issues a one-shot network request restricted to the exact target and
//! races its event stream against a bounded timer. Exactly one of
//! {available, unavailable, lost, timeout} may act: the platform can deliver
//! more than one of these for the same request, so every terminal path goes
//! through a shared [`CompletionGate`].

use futures::StreamExt;
use log::{debug, warn};
use std::sync::Arc;
use tokio::time::sleep;

use crate::arbiter::{Arbiter, AttemptToken};
use crate::gate::CompletionGate;
use crate::models::ConnectOptions;
use crate::platform::{NetworkHandle, NetworkSpec, SpecifierEvent, WifiPlatform};
use crate::suggestion;

pub(crate) async fn run<P: WifiPlatform>(
    arbiter: Arc<Arbiter<P>>,
    token: AttemptToken,
    opts: ConnectOptions,
    allow_fallback: bool,
) {
    let spec = NetworkSpec::for_target(&opts);

    // A security failure registering the request counts as unavailable,
    // without waiting for the timer.
    let scoped = match arbiter.platform().request_network(&spec).await {
        Ok(scoped) => scoped,
        Err(e) => {
            warn!("scoped request for '{}' rejected: {e}", opts.ssid);
            arbiter.release_scoped_for(token).await;
            abandon(&arbiter, token, &opts, allow_fallback).await;
            return;
        }
    };

    if !arbiter.adopt_scoped(token, scoped.token).await {
        debug!("scoped request for '{}' superseded before it settled", opts.ssid);
        return;
    }

    let mut events = scoped.events;
    let gate = CompletionGate::new();
    let deadline = sleep(arbiter.config().specifier_timeout);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            event = events.next() => match event {
                Some(SpecifierEvent::Available(network)) => {
                    if !gate.try_claim() {
                        continue;
                    }
                    debug!("network available for '{}'", opts.ssid);
                    if let Err(e) = arbiter
                        .platform()
                        .bind_process_to_network(Some(network))
                        .await
                    {
                        warn!("binding process to network failed: {e}");
                    }
                    arbiter.resolve(true, Some(token)).await;
                    // Keep draining so a later loss still clears the route
                    // override.
                }
                Some(SpecifierEvent::Unavailable) => {
                    if !gate.try_claim() {
                        continue;
                    }
                    debug!("network unavailable for '{}'", opts.ssid);
                    arbiter.release_scoped_for(token).await;
                    abandon(&arbiter, token, &opts, allow_fallback).await;
                    return;
                }
                Some(SpecifierEvent::Lost(network)) => {
                    unbind_if_bound(arbiter.platform(), network).await;
                    if gate.try_claim() {
                        debug!("network lost before availability for '{}'", opts.ssid);
                        arbiter.release_scoped_for(token).await;
                        abandon(&arbiter, token, &opts, allow_fallback).await;
                        return;
                    }
                }
                None => {
                    // Registration released out from under us (superseded or
                    // disconnected).
                    if gate.try_claim() {
                        arbiter.release_scoped_for(token).await;
                        abandon(&arbiter, token, &opts, allow_fallback).await;
                    }
                    return;
                }
            },
            _ = &mut deadline, if !gate.fired() => {
                if gate.try_claim() {
                    debug!("scoped request for '{}' timed out", opts.ssid);
                    arbiter.release_scoped_for(token).await;
                    abandon(&arbiter, token, &opts, allow_fallback).await;
                }
                return;
            }
        }
    }
}

/// Restores the default route if the process is bound to the lost network.
async fn unbind_if_bound<P: WifiPlatform>(platform: &P, lost: NetworkHandle) {
    if platform.bound_network().await == Some(lost) {
        if let Err(e) = platform.bind_process_to_network(None).await {
            debug!("clearing route override after loss failed: {e}");
        }
    }
}

async fn abandon<P: WifiPlatform>(
    arbiter: &Arc<Arbiter<P>>,
    token: AttemptToken,
    opts: &ConnectOptions,
    allow_fallback: bool,
) {
    if allow_fallback {
        suggestion::run(arbiter, token, opts).await;
    } else {
        arbiter.resolve(false, Some(token)).await;
    }
}
