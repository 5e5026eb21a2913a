use std::sync::RwLock;

use crate::domain::ClientError;

/// Lifecycle of one dialog-coordinated mutation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogPhase {
    /// Accepting input; nothing in flight.
    Editing,
    /// The mutation is in flight; further submissions are ignored.
    Submitting,
    /// The attempt failed; the dialog stays open showing the failure.
    Failed(ClientError),
    /// The mutation succeeded and transient input has been reset.
    Completed,
}

impl DialogPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Single-flight latch for a dialog's mutation.
///
/// `begin` succeeds at most once until the attempt settles through `fail`
/// or `complete`; a submission while one is in flight is ignored rather
/// than queued. Retry after failure is an explicit new `begin`.
#[derive(Debug)]
pub struct MutationGate {
    phase: RwLock<DialogPhase>,
}

impl MutationGate {
    pub fn new() -> Self {
        Self {
            phase: RwLock::new(DialogPhase::Editing),
        }
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase.read().unwrap().clone()
    }

    /// Try to enter `Submitting`. Returns false when an attempt is already
    /// in flight.
    pub fn begin(&self) -> bool {
        let mut phase = self.phase.write().unwrap();
        if matches!(*phase, DialogPhase::Submitting) {
            return false;
        }
        *phase = DialogPhase::Submitting;
        true
    }

    pub fn fail(&self, error: ClientError) {
        *self.phase.write().unwrap() = DialogPhase::Failed(error);
    }

    pub fn complete(&self) {
        *self.phase.write().unwrap() = DialogPhase::Completed;
    }

    /// Back to `Editing`, dropping any settled outcome.
    pub fn reset(&self) {
        *self.phase.write().unwrap() = DialogPhase::Editing;
    }
}

impl Default for MutationGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_is_single_flight() {
        let gate = MutationGate::new();
        assert!(gate.begin());
        assert!(!gate.begin());
        assert!(gate.phase().is_submitting());
    }

    #[test]
    fn test_begin_allowed_again_after_failure() {
        let gate = MutationGate::new();
        assert!(gate.begin());
        gate.fail(ClientError::transport("boom"));
        assert_eq!(gate.phase().error(), Some(&ClientError::transport("boom")));
        assert!(gate.begin());
    }

    #[test]
    fn test_complete_then_reset() {
        let gate = MutationGate::new();
        gate.begin();
        gate.complete();
        assert_eq!(gate.phase(), DialogPhase::Completed);

        gate.reset();
        assert_eq!(gate.phase(), DialogPhase::Editing);
    }
}
