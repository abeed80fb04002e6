use crate::core::parameters::{FieldSet, ParameterUpdate, Parameters};
use serde::{Deserialize, Serialize};

/// Owns the current [`Parameters`] snapshot and merges partial updates
/// into it.
///
/// The store knows nothing about the engine: applying an update only
/// produces the new snapshot and reports which fields changed. Deciding
/// whether that warrants a recomputation is the caller's job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterStore {
    current: Parameters,
}

/// Outcome of [`ParameterStore::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedUpdate {
    pub snapshot: Parameters,
    /// Fields whose value differs from the previous snapshot.
    pub changed: FieldSet,
}

impl ParameterStore {
    pub fn new(initial: Parameters) -> Self {
        Self { current: initial }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &Parameters {
        &self.current
    }

    /// Merge the supplied fields over the current snapshot.
    ///
    /// Fields absent from `update` are kept as they are. Writing a value
    /// equal to the stored one is accepted but not reported as a change.
    pub fn apply(&mut self, update: &ParameterUpdate) -> AppliedUpdate {
        let (next, changed) = self.current.merged(update);
        self.current = next;
        AppliedUpdate {
            snapshot: self.current.clone(),
            changed,
        }
    }
}
