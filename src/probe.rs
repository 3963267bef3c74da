//! Association probe: "what network are we currently on".

use crate::constants::sentinel;
use crate::platform::WifiPlatform;
use crate::ssid;

/// Returns the normalized SSID of the current association, if any.
///
/// The unknown-SSID sentinel is interpreted as "no real association", as is
/// a missing permission (the platform reports `None` for both). Read-only;
/// never fails hard.
pub(crate) async fn current_ssid<P: WifiPlatform>(platform: &P) -> Option<String> {
    let raw = platform.association_info().await?;
    if raw.trim().eq_ignore_ascii_case(sentinel::UNKNOWN_SSID) {
        return None;
    }
    let normalized = ssid::normalize(&raw);
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Whether the current association matches the target, both normalized.
///
/// Ground truth for the suggestion strategy: a broadcast or an expired timer
/// only count as success when the device actually sits on the target.
pub(crate) async fn matches_target<P: WifiPlatform>(platform: &P, target: &str) -> bool {
    match current_ssid(platform).await {
        Some(current) => current == ssid::normalize(target),
        None => false,
    }
}
