//! One-shot completion gate.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A one-shot flag guarding delivery of a result for one strategy attempt.
///
/// The platform can deliver more than one terminal event for the same
/// request, and the attempt timer races them all. The first claimer wins;
/// every later claim observes `false` and must take no further action.
#[derive(Clone, Debug, Default)]
pub(crate) struct CompletionGate {
    fired: Arc<AtomicBool>,
}

impl CompletionGate {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Attempts the false→true transition. Returns `true` exactly once per
    /// gate, no matter how many sources race.
    pub(crate) fn try_claim(&self) -> bool {
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether the gate has already been claimed.
    pub(crate) fn fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_exactly_once() {
        let gate = CompletionGate::new();
        assert!(!gate.fired());
        assert!(gate.try_claim());
        assert!(gate.fired());
        assert!(!gate.try_claim());
        assert!(!gate.try_claim());
    }

    #[test]
    fn clones_share_the_flag() {
        let gate = CompletionGate::new();
        let other = gate.clone();
        assert!(gate.try_claim());
        assert!(!other.try_claim());
        assert!(other.fired());
    }

    #[test]
    fn concurrent_claims_yield_one_winner() {
        let gate = CompletionGate::new();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let gate = gate.clone();
            handles.push(std::thread::spawn(move || gate.try_claim()));
        }
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
