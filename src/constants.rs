//! Constants for attempt timeouts and platform sentinel values.

/// Timeout constants for the asynchronous connection strategies.
pub mod timeouts {
    use std::time::Duration;

    pub const SPECIFIER_TIMEOUT_SECS: u64 = 15;
    pub const SUGGESTION_TIMEOUT_SECS: u64 = 30;

    pub fn specifier() -> Duration {
        Duration::from_secs(SPECIFIER_TIMEOUT_SECS)
    }

    pub fn suggestion() -> Duration {
        Duration::from_secs(SUGGESTION_TIMEOUT_SECS)
    }
}

/// Saved-profile constants for the legacy strategy.
pub mod profile {
    /// Priority stamped on profiles this crate registers. Non-default so the
    /// target is preferred without permanently overriding user-chosen
    /// networks.
    pub const PRIORITY: i32 = 40;

    /// Handle value the platform returns when profile registration fails.
    pub const INVALID_ID: i32 = -1;
}

/// Sentinel values reported by the platform.
pub mod sentinel {
    /// Association info placeholder meaning "no real association" (also what
    /// the platform reports when the caller lacks the location-adjacent
    /// permission).
    pub const UNKNOWN_SSID: &str = "<unknown ssid>";
}
