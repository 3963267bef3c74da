//! Single-result arbitration for connect attempts.
//!
//! The arbiter owns the one pending-result slot, the generation counter that
//! identifies the current attempt, the live scoped-request registration, and
//! the pending-suggestion state. All mutation is serialized through one lock;
//! events carrying a stale attempt token are discarded wherever they try to
//! act.

use log::debug;
use std::sync::Arc;
use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;

use crate::gate::CompletionGate;
use crate::models::OrchestratorConfig;
use crate::platform::{RequestToken, WifiPlatform};
use crate::suggestion;

/// Identity of one connect attempt: a monotonically increasing generation.
/// Comparing tokens at resolution time is the whole cancellation mechanism;
/// a stale strategy task can fire as late as it wants and resolves nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AttemptToken(u64);

struct PendingReply {
    tx: oneshot::Sender<bool>,
}

struct SuggestionState {
    target: String,
    gate: CompletionGate,
    token: AttemptToken,
}

#[derive(Default)]
struct ArbiterState {
    pending: Option<PendingReply>,
    generation: u64,
    scoped: Option<RequestToken>,
    suggestion: Option<SuggestionState>,
    receiver: Option<JoinHandle<()>>,
}

pub(crate) struct Arbiter<P: WifiPlatform> {
    platform: P,
    config: OrchestratorConfig,
    state: Mutex<ArbiterState>,
}

impl<P: WifiPlatform> Arbiter<P> {
    pub(crate) fn new(platform: P, config: OrchestratorConfig) -> Self {
        Self {
            platform,
            config,
            state: Mutex::new(ArbiterState::default()),
        }
    }

    pub(crate) fn platform(&self) -> &P {
        &self.platform
    }

    pub(crate) fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Supersedes any in-flight attempt and installs a fresh pending slot.
    ///
    /// The superseded caller receives `false`, never a silent drop.
    /// Partially established state from the prior attempt (scoped
    /// registration, route override, suggestion set) is torn down before the
    /// new attempt starts.
    pub(crate) async fn begin_attempt(&self) -> (AttemptToken, oneshot::Receiver<bool>) {
        let mut state = self.state.lock().await;
        if let Some(prev) = state.pending.take() {
            debug!("superseding pending attempt");
            let _ = prev.tx.send(false);
        }
        state.generation += 1;
        let token = AttemptToken(state.generation);
        self.release_scoped_locked(&mut state).await;
        self.clear_suggestions_locked(&mut state).await;
        let (tx, rx) = oneshot::channel();
        state.pending = Some(PendingReply { tx });
        (token, rx)
    }

    /// Delivers a result to the pending caller. No-op when `from` identifies
    /// a superseded attempt.
    pub(crate) async fn resolve(&self, success: bool, from: Option<AttemptToken>) {
        let mut state = self.state.lock().await;
        if let Some(token) = from
            && token.0 != state.generation
        {
            debug!("discarding stale resolution (success={success})");
            return;
        }
        if let Some(pending) = state.pending.take() {
            state.suggestion = None;
            if pending.tx.send(success).is_err() {
                debug!("connect caller went away before resolution");
            }
        }
    }

    /// Stores the live scoped registration for this attempt. Returns `false`
    /// and releases the registration if the attempt has been superseded.
    pub(crate) async fn adopt_scoped(&self, token: AttemptToken, request: RequestToken) -> bool {
        {
            let mut state = self.state.lock().await;
            if state.generation == token.0 {
                state.scoped = Some(request);
                return true;
            }
        }
        self.platform.release_request(request).await;
        false
    }

    /// Releases this attempt's scoped registration and restores the default
    /// route. No-op for superseded attempts.
    pub(crate) async fn release_scoped_for(&self, token: AttemptToken) {
        let mut state = self.state.lock().await;
        if state.generation != token.0 {
            return;
        }
        self.release_scoped_locked(&mut state).await;
    }

    async fn release_scoped_locked(&self, state: &mut ArbiterState) {
        if let Some(request) = state.scoped.take() {
            self.platform.release_request(request).await;
        }
        if let Err(e) = self.platform.bind_process_to_network(None).await {
            debug!("clearing route override failed: {e}");
        }
    }

    /// Empties the suggestion set on behalf of this attempt. Returns `false`
    /// if the attempt has been superseded.
    pub(crate) async fn clear_suggestions_for(&self, token: AttemptToken) -> bool {
        let mut state = self.state.lock().await;
        if state.generation != token.0 {
            return false;
        }
        self.clear_suggestions_locked(&mut state).await;
        true
    }

    async fn clear_suggestions_locked(&self, state: &mut ArbiterState) {
        state.suggestion = None;
        if let Err(e) = self.platform.remove_suggestions().await {
            // usually means "nothing published"
            debug!("removing suggestions failed: {e}");
        }
    }

    /// Records the pending suggestion (target + gate) for this attempt.
    /// Returns `false` if the attempt has been superseded.
    pub(crate) async fn install_suggestion(
        &self,
        token: AttemptToken,
        target: &str,
        gate: CompletionGate,
    ) -> bool {
        let mut state = self.state.lock().await;
        if state.generation != token.0 {
            return false;
        }
        state.suggestion = Some(SuggestionState {
            target: target.to_string(),
            gate,
            token,
        });
        true
    }

    /// Claims the pending suggestion's gate on behalf of the broadcast
    /// receiver. `None` when no suggestion is pending or another source
    /// already won the race.
    pub(crate) async fn claim_suggestion(&self) -> Option<(AttemptToken, String)> {
        let state = self.state.lock().await;
        let pending = state.suggestion.as_ref()?;
        if pending.gate.try_claim() {
            Some((pending.token, pending.target.clone()))
        } else {
            None
        }
    }

    /// Registers the suggestion broadcast receiver, once per process
    /// lifetime. Later calls are no-ops.
    pub(crate) async fn ensure_receiver(self: &Arc<Self>) -> crate::Result<()> {
        let mut state = self.state.lock().await;
        if state.receiver.is_some() {
            return Ok(());
        }
        let events = self.platform.suggestion_events().await?;
        state.receiver = Some(suggestion::spawn_receiver(Arc::clone(self), events));
        Ok(())
    }

    /// Tears down the bound network and published suggestions. Best-effort
    /// and idempotent.
    pub(crate) async fn disconnect(&self) {
        let mut state = self.state.lock().await;
        self.release_scoped_locked(&mut state).await;
        self.clear_suggestions_locked(&mut state).await;
    }

    /// Full teardown for process shutdown: additionally unregisters the
    /// broadcast receiver and force-fails any still-pending result.
    pub(crate) async fn shutdown(&self) {
        let mut state = self.state.lock().await;
        self.release_scoped_locked(&mut state).await;
        self.clear_suggestions_locked(&mut state).await;
        if let Some(receiver) = state.receiver.take() {
            receiver.abort();
        }
        self.platform.unregister_suggestion_events().await;
        if let Some(prev) = state.pending.take() {
            let _ = prev.tx.send(false);
        }
    }
}
