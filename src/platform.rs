//! The seam between the orchestration state machine and the host platform.
//!
//! Everything the orchestrator needs from the OS (saved profiles, scoped
//! ephemeral requests, network suggestions, route binding, association info)
//! goes through [`WifiPlatform`]. Production code implements it against the
//! real platform services; tests implement it with scripted behavior.
//!
//! Asynchronous platform callbacks are modeled as event streams consumed
//! with `StreamExt::next`, so the orchestrator never blocks a thread waiting
//! for the platform.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::Result;
use crate::constants::profile;
use crate::models::{ConnectOptions, PlatformTier, PublishStatus};
use crate::ssid;

/// Opaque handle to a platform network object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkHandle(pub u64);

/// Identifies one scoped network request registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(pub u64);

/// Handle to a registered saved network profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileId(pub i32);

impl ProfileId {
    /// Sentinel the platform returns when profile registration fails.
    pub const INVALID: ProfileId = ProfileId(profile::INVALID_ID);

    pub fn is_valid(self) -> bool {
        self.0 != profile::INVALID_ID
    }
}

/// Security mode of a saved network profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSecurity {
    /// Open authentication, no key.
    Open,
    /// Pre-shared key authentication. The key is quote-encoded.
    WpaPsk { psk: String },
}

/// A saved network profile as the legacy configuration API sees it.
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    pub id: ProfileId,
    /// Quoted-string encoded SSID, as profile matching requires.
    pub ssid: String,
    pub security: ProfileSecurity,
    pub hidden: bool,
    pub priority: i32,
}

impl NetworkProfile {
    /// Builds a fresh profile for the target: open auth when the password is
    /// empty, WPA-PSK with a quote-encoded key otherwise.
    pub fn for_target(opts: &ConnectOptions) -> Self {
        let security = if opts.open() {
            ProfileSecurity::Open
        } else {
            ProfileSecurity::WpaPsk {
                psk: ssid::quote(&opts.password),
            }
        };
        Self {
            id: ProfileId::INVALID,
            ssid: ssid::quote(&opts.ssid),
            security,
            hidden: opts.hidden,
            priority: profile::PRIORITY,
        }
    }
}

/// A scoped, non-persistent request that the device temporarily associate
/// with one exact network for this process's use.
///
/// The request asks for Wi-Fi transport with the not-restricted capability;
/// the target may have no upstream, so availability must not be gated on
/// internet reachability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSpec {
    pub ssid: String,
    pub passphrase: Option<String>,
    pub hidden: bool,
    pub require_internet: bool,
    pub not_restricted: bool,
}

impl NetworkSpec {
    pub fn for_target(opts: &ConnectOptions) -> Self {
        Self {
            ssid: opts.ssid.clone(),
            passphrase: (!opts.password.is_empty()).then(|| opts.password.clone()),
            hidden: opts.hidden,
            require_internet: false,
            not_restricted: true,
        }
    }
}

/// A persistent hint that the platform may autonomously join the given
/// network, optionally after user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSuggestion {
    pub ssid: String,
    pub passphrase: Option<String>,
    pub hidden: bool,
}

impl NetworkSuggestion {
    pub fn for_target(opts: &ConnectOptions) -> Self {
        Self {
            ssid: opts.ssid.clone(),
            passphrase: (!opts.password.is_empty()).then(|| opts.password.clone()),
            hidden: opts.hidden,
        }
    }
}

/// Events delivered for a scoped network request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierEvent {
    /// The requested network came up.
    Available(NetworkHandle),
    /// The platform gave up on the request.
    Unavailable,
    /// A previously available network went away.
    Lost(NetworkHandle),
}

/// Events from the platform's suggestion broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionEvent {
    /// The platform connected to a published suggestion.
    PostConnection,
}

/// A live scoped request registration: the token identifying it plus its
/// event stream. Dropping the stream does not release the registration;
/// callers must pass the token to [`WifiPlatform::release_request`].
pub struct ScopedRequest {
    pub token: RequestToken,
    pub events: BoxStream<'static, SpecifierEvent>,
}

/// Host platform surface the orchestrator drives.
///
/// Implementations are expected to fail soft on read paths (`None` instead
/// of an error) and to treat cleanup calls as best-effort.
#[async_trait]
pub trait WifiPlatform: Send + Sync + 'static {
    /// Capability tier, read once at orchestrator construction.
    fn tier(&self) -> PlatformTier;

    /// Live association info, raw as the platform reports it (possibly
    /// quoted, possibly the unknown-SSID sentinel). `None` when there is no
    /// association or the caller lacks the required permission.
    async fn association_info(&self) -> Option<String>;

    // Legacy direct-configuration surface.

    async fn radio_enabled(&self) -> Result<bool>;
    async fn set_radio_enabled(&self, enabled: bool) -> Result<()>;
    async fn saved_profiles(&self) -> Result<Vec<NetworkProfile>>;
    /// Registers a new profile. Returns [`ProfileId::INVALID`] on rejection.
    async fn register_profile(&self, profile: &NetworkProfile) -> Result<ProfileId>;
    async fn update_profile(&self, profile: &NetworkProfile) -> Result<()>;
    /// Drops the current association. Returns whether the call was accepted.
    async fn disconnect(&self) -> Result<bool>;
    async fn enable_profile(&self, id: ProfileId, disable_others: bool) -> Result<bool>;
    async fn reconnect(&self) -> Result<bool>;

    // Scoped ephemeral requests.

    /// Issues a scoped request. May fail synchronously with a
    /// permission/security error.
    async fn request_network(&self, spec: &NetworkSpec) -> Result<ScopedRequest>;
    /// Releases a registration. Best-effort; unknown tokens are ignored.
    async fn release_request(&self, token: RequestToken);
    /// Overrides (or, with `None`, restores) the process default route.
    async fn bind_process_to_network(&self, network: Option<NetworkHandle>) -> Result<()>;
    async fn bound_network(&self) -> Option<NetworkHandle>;

    // Network suggestions.

    async fn publish_suggestion(&self, suggestion: &NetworkSuggestion) -> Result<PublishStatus>;
    /// Removes every suggestion this process has published. Best-effort.
    async fn remove_suggestions(&self) -> Result<()>;
    /// Subscribes to the post-connection broadcast. Registered at most once
    /// per process lifetime by the orchestrator.
    async fn suggestion_events(&self) -> Result<BoxStream<'static, SuggestionEvent>>;
    async fn unregister_suggestion_events(&self);
    /// Surfaces the system Wi-Fi picker so the user can confirm a suggested
    /// network. Best-effort; the suggestion may still auto-join silently.
    async fn show_wifi_picker(&self) -> Result<()>;
}
