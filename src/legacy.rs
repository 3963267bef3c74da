//! Direct-configuration strategy for platforms without scoped requests.
//!
//! Registers (or updates) a saved profile for the target and forces a
//! reassociation. The platform gives no completion signal for this path, so
//! success is the AND of the three low-level calls: a best-effort guarantee,
//! not a verified association.

use log::{debug, warn};

use crate::models::ConnectOptions;
use crate::platform::{NetworkProfile, ProfileId, WifiPlatform};
use crate::ssid;

/// Runs the legacy connect flow. Platform failures are logged and fold into
/// `false`; nothing propagates to the caller as an error.
pub(crate) async fn run<P: WifiPlatform>(platform: &P, opts: &ConnectOptions) -> bool {
    match platform.radio_enabled().await {
        Ok(true) => {}
        Ok(false) => {
            debug!("radio is off, enabling");
            if let Err(e) = platform.set_radio_enabled(true).await {
                warn!("failed to enable radio: {e}");
                return false;
            }
        }
        Err(e) => {
            warn!("failed to read radio state: {e}");
            return false;
        }
    }

    let Some(id) = resolve_profile(platform, opts).await else {
        return false;
    };

    let disconnected = match platform.disconnect().await {
        Ok(accepted) => accepted,
        Err(e) => {
            warn!("disconnect failed: {e}");
            false
        }
    };
    let enabled = match platform.enable_profile(id, true).await {
        Ok(accepted) => accepted,
        Err(e) => {
            warn!("enabling profile failed: {e}");
            false
        }
    };
    let reconnected = match platform.reconnect().await {
        Ok(accepted) => accepted,
        Err(e) => {
            warn!("reconnect failed: {e}");
            false
        }
    };

    debug!(
        "legacy attempt for '{}': disconnected={disconnected} enabled={enabled} reconnected={reconnected}",
        opts.ssid
    );
    disconnected && enabled && reconnected
}

/// Finds a saved profile matching the quoted target and refreshes its hidden
/// flag, or registers a fresh one. `None` when the platform rejects the
/// registration.
async fn resolve_profile<P: WifiPlatform>(
    platform: &P,
    opts: &ConnectOptions,
) -> Option<ProfileId> {
    let quoted = ssid::quote(&opts.ssid);

    let profiles = match platform.saved_profiles().await {
        Ok(profiles) => profiles,
        Err(e) => {
            warn!("failed to list saved profiles: {e}");
            return None;
        }
    };

    match profiles.into_iter().find(|p| p.ssid == quoted) {
        Some(mut profile) => {
            debug!("reusing saved profile for '{}'", opts.ssid);
            profile.hidden = opts.hidden;
            if let Err(e) = platform.update_profile(&profile).await {
                warn!("failed to update saved profile: {e}");
                return None;
            }
            if !profile.id.is_valid() {
                return None;
            }
            Some(profile.id)
        }
        None => {
            let profile = NetworkProfile::for_target(opts);
            match platform.register_profile(&profile).await {
                Ok(id) if id.is_valid() => {
                    debug!("registered new profile for '{}'", opts.ssid);
                    Some(id)
                }
                Ok(_) => {
                    warn!("profile registration for '{}' rejected", opts.ssid);
                    None
                }
                Err(e) => {
                    warn!("profile registration for '{}' failed: {e}", opts.ssid);
                    None
                }
            }
        }
    }
}
