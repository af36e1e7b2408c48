//! Refetch decision.

use crate::models::{Target, TargetSnapshot, ValidationErrors};

/// Decides whether a target change warrants re-running its query.
///
/// A refetch is warranted when the target differs from the last accepted
/// snapshot and has no validation errors. The gate holds no state: callers
/// keep the snapshot and replace it with [`commit`](Self::commit) after every
/// positive decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetChangeGate;

impl TargetChangeGate {
    /// `previous` is `None` until a refetch has been accepted once; no snapshot
    /// is unequal to every target.
    pub fn should_refetch(
        previous: Option<&TargetSnapshot>,
        current: &Target,
        errors: &ValidationErrors,
    ) -> bool {
        errors.is_empty() && previous.is_none_or(|snapshot| !snapshot.matches(current))
    }

    /// Snapshot to store after a positive decision.
    pub fn commit(current: &Target) -> TargetSnapshot {
        TargetSnapshot::capture(current)
    }
}
