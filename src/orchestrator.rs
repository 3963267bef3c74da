use log::{debug, info};
use std::sync::Arc;

use crate::Result;
use crate::arbiter::Arbiter;
use crate::models::{ConnectOptions, OrchestratorConfig, PlatformTier, WifiError};
use crate::platform::WifiPlatform;
use crate::{legacy, probe, specifier};

/// High-level interface to the connection orchestration state machine.
///
/// Cheap to clone; clones share the same pending-request slot and platform,
/// so a `connect` on one clone supersedes a `connect` in flight on another.
#[derive(Clone)]
pub struct WifiOrchestrator<P: WifiPlatform> {
    arbiter: Arc<Arbiter<P>>,
    tier: PlatformTier,
}

impl<P: WifiPlatform> WifiOrchestrator<P> {
    /// Creates an orchestrator with the default attempt timeouts.
    pub fn new(platform: P) -> Self {
        Self::with_config(platform, OrchestratorConfig::default())
    }

    /// Creates an orchestrator with custom attempt timeouts.
    pub fn with_config(platform: P, config: OrchestratorConfig) -> Self {
        let tier = platform.tier();
        debug!("platform tier: {tier:?}");
        Self {
            arbiter: Arc::new(Arbiter::new(platform, config)),
            tier,
        }
    }

    /// Connects to the named network.
    ///
    /// Resolves `true` once the device is associated (or, on legacy
    /// platforms, once the reassociation calls were accepted), `false` when
    /// every permitted strategy failed or timed out. Exactly one answer is
    /// delivered per request; a new `connect` supersedes an in-flight one,
    /// which then resolves `false`.
    ///
    /// # Errors
    ///
    /// `WifiError::InvalidSsid` for a blank SSID, rejected before any
    /// strategy runs. Every other failure resolves as `Ok(false)`.
    pub async fn connect(&self, opts: ConnectOptions) -> Result<bool> {
        if opts.ssid.trim().is_empty() {
            return Err(WifiError::InvalidSsid);
        }
        info!(
            "connect requested for '{}' (hidden={}, open={})",
            opts.ssid,
            opts.hidden,
            opts.open()
        );

        let (token, reply) = self.arbiter.begin_attempt().await;
        match self.tier {
            PlatformTier::Legacy => {
                let success = legacy::run(self.arbiter.platform(), &opts).await;
                self.arbiter.resolve(success, Some(token)).await;
            }
            PlatformTier::Modern => {
                let fallback = opts.suggestion_fallback;
                tokio::spawn(specifier::run(
                    Arc::clone(&self.arbiter),
                    token,
                    opts,
                    fallback,
                ));
            }
        }

        // A superseding connect fails this slot rather than dropping it, so
        // the channel closing without a value should not happen; treat it as
        // failure anyway.
        Ok(reply.await.unwrap_or(false))
    }

    /// SSID of the current association, unquoted, or `None` when there is no
    /// association (or no permission to read it).
    pub async fn current_ssid(&self) -> Option<String> {
        probe::current_ssid(self.arbiter.platform()).await
    }

    /// Releases the scoped network binding, restores the default route, and
    /// clears published suggestions. Idempotent; safe to call at any time.
    pub async fn disconnect(&self) {
        debug!("disconnect requested");
        self.arbiter.disconnect().await;
    }

    /// Full teardown for process shutdown: `disconnect` plus unregistering
    /// the suggestion broadcast receiver and force-failing any still-pending
    /// connect. Profiles and suggestions outlive the process, so skipping
    /// this leaks state into future runs.
    pub async fn shutdown(&self) {
        debug!("shutting down orchestrator");
        self.arbiter.shutdown().await;
    }
}
