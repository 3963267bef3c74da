use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::Duration;
use thiserror::Error;

use crate::constants::timeouts;

/// Options for a single connect request.
///
/// An empty password means an open network. `suggestion_fallback` controls
/// whether a failed scoped request may fall back to the suggestion strategy
/// (it does by default).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectOptions {
    pub ssid: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "default_fallback")]
    pub suggestion_fallback: bool,
}

fn default_fallback() -> bool {
    true
}

impl ConnectOptions {
    pub fn new(ssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            password: String::new(),
            hidden: false,
            suggestion_fallback: true,
        }
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn suggestion_fallback(mut self, fallback: bool) -> Self {
        self.suggestion_fallback = fallback;
        self
    }

    /// Open network: the caller supplied no password.
    pub fn open(&self) -> bool {
        self.password.is_empty()
    }
}

/// Platform capability tier, detected once at orchestrator construction.
///
/// Selects the strategy chain for every connect request; no other code
/// branches on platform version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformTier {
    /// No scoped ephemeral requests; only direct profile configuration.
    Legacy,
    /// Scoped ephemeral requests and network suggestions are available.
    Modern,
}

/// Status codes returned when publishing a network suggestion.
///
/// Use `PublishStatus::from(code)` to convert from the raw u32 values the
/// platform reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    /// The suggestion was accepted.
    Success,
    /// Internal platform failure.
    Internal,
    /// The app is not allowed to publish suggestions.
    AppDisallowed,
    /// An identical suggestion is already published.
    Duplicate,
    /// The per-app suggestion limit was exceeded.
    ExceedsLimit,
    /// A removal referenced a suggestion that was never published.
    RemoveInvalid,
    /// Publishing is not allowed right now.
    NotAllowed,
    /// The suggestion itself was malformed.
    Invalid,
    /// Unknown status code not mapped to a specific variant.
    Other(u32),
}

impl From<u32> for PublishStatus {
    fn from(code: u32) -> Self {
        match code {
            0 => Self::Success,
            1 => Self::Internal,
            2 => Self::AppDisallowed,
            3 => Self::Duplicate,
            4 => Self::ExceedsLimit,
            5 => Self::RemoveInvalid,
            6 => Self::NotAllowed,
            7 => Self::Invalid,
            v => Self::Other(v),
        }
    }
}

impl Display for PublishStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Internal => write!(f, "internal failure"),
            Self::AppDisallowed => write!(f, "app disallowed"),
            Self::Duplicate => write!(f, "duplicate suggestion"),
            Self::ExceedsLimit => write!(f, "suggestion limit exceeded"),
            Self::RemoveInvalid => write!(f, "removal of unknown suggestion"),
            Self::NotAllowed => write!(f, "not allowed"),
            Self::Invalid => write!(f, "invalid suggestion"),
            Self::Other(v) => write!(f, "unknown status ({v})"),
        }
    }
}

/// Errors surfaced by the orchestrator and the platform boundary.
#[derive(Debug, Error)]
pub enum WifiError {
    /// The caller supplied a blank SSID. Rejected before any strategy runs;
    /// the only error a connect request surfaces instead of a boolean.
    #[error("SSID is required")]
    InvalidSsid,

    /// A platform call was rejected for missing permissions.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// A platform call failed.
    #[error("platform call failed: {0}")]
    Platform(String),
}

/// Timeout configuration for the asynchronous strategies.
///
/// Defaults to 15 s for scoped-request negotiation and 30 s for suggestion
/// confirmation.
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorConfig {
    pub specifier_timeout: Duration,
    pub suggestion_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            specifier_timeout: timeouts::specifier(),
            suggestion_timeout: timeouts::suggestion(),
        }
    }
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_specifier_timeout(mut self, timeout: Duration) -> Self {
        self.specifier_timeout = timeout;
        self
    }

    pub fn with_suggestion_timeout(mut self, timeout: Duration) -> Self {
        self.suggestion_timeout = timeout;
        self
    }
}
