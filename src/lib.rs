//! An async orchestrator for joining a named Wi-Fi network on behalf of a
//! calling application.
//!
//! The crate drives a chain of connection strategies against a host platform
//! and guarantees that every connect request receives **exactly one**
//! success/failure answer:
//!
//! - On modern platforms: a scoped ephemeral network request first, falling
//!   back to a persistent network suggestion the platform may auto-join.
//! - On legacy platforms: direct profile configuration with a forced
//!   reassociation, as a best-effort synchronous step.
//!
//! The host OS surface (profiles, scoped requests, suggestions, route
//! binding) is abstracted behind the [`platform::WifiPlatform`] trait, so the
//! orchestration state machine can be exercised against a scripted platform
//! in tests.
//!
//! # Example
//!
//! ```ignore
//! use wifijoin::{ConnectOptions, WifiOrchestrator};
//!
//! let orchestrator = WifiOrchestrator::new(platform);
//!
//! let joined = orchestrator
//!     .connect(ConnectOptions::new("HomeNet").password("secret123"))
//!     .await?;
//!
//! if joined {
//!     println!("associated with {:?}", orchestrator.current_ssid().await);
//! }
//! ```
//!
//! # Result delivery
//!
//! Several asynchronous sources race to finish one attempt: availability and
//! loss events from the scoped request, the suggestion broadcast, and the
//! attempt timers. Arbitration is serialized through a single pending-result
//! slot guarded by the orchestrator's internal lock; the first source to
//! claim an attempt's one-shot gate is authoritative and every later signal
//! for that attempt is discarded. A new `connect` supersedes an in-flight
//! one, which then resolves `false` rather than being silently dropped.
//!
//! # Error Handling
//!
//! Strategy-internal platform failures (a rejected profile, a security error
//! issuing the scoped request, a refused suggestion) are logged and folded
//! into the fallback/failure path; the caller sees `Ok(false)`. The only
//! distinct error surfaced from `connect` is [`WifiError::InvalidSsid`] for a
//! blank target name.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging. To
//! see log output, add a logging implementation like `env_logger`:
//!
//! ```no_run,ignore
//! env_logger::init();
//! // ...
//! ```

// Internal implementation modules
mod arbiter;
mod constants;
mod gate;
mod legacy;
mod probe;
mod specifier;
mod suggestion;

// Public API modules
pub mod models;
pub mod orchestrator;
pub mod platform;
pub mod ssid;

// Re-exported public API
pub use models::{ConnectOptions, OrchestratorConfig, PlatformTier, PublishStatus, WifiError};
pub use orchestrator::WifiOrchestrator;

/// A specialized `Result` type for orchestrator operations.
pub type Result<T> = std::result::Result<T, WifiError>;
