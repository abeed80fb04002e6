use crate::core::breakdown::CostBreakdown;
use crate::core::parameters::{Field, ParameterUpdate, Parameters, WATCHED_FIELDS};
use crate::engine::feedback::customs_feedback;
use crate::engine::pipeline::CostEngine;
use crate::state::store::ParameterStore;
use log::{debug, trace, warn};
use rust_decimal::Decimal;

/// One calculator session: the parameter store, the latest breakdown,
/// and the rule tying them together.
///
/// Every caller update goes through [`Session::apply_update`]. When it
/// changes a field in [`WATCHED_FIELDS`], the engine runs exactly once
/// and the derived levy is written back into the store. That write only
/// touches `customs_tax`, which is not watched, so it never schedules a
/// second run.
///
/// # Examples
///
/// ```
/// use landed_cost::core::parameters::{Field, ParameterUpdate, Parameters};
/// use landed_cost::state::session::Session;
/// use rust_decimal_macros::dec;
///
/// let mut session = Session::new(Parameters::default());
/// session.apply_update(ParameterUpdate::new().set(Field::UsdNeeded, dec!(200)));
///
/// assert_eq!(session.breakdown().base_kwanza, dec!(194800));
/// assert_eq!(session.parameters().customs_tax, dec!(31168));
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    store: ParameterStore,
    breakdown: CostBreakdown,
    recomputations: u64,
    feedback_writes: u64,
}

impl Session {
    /// Start a session and run the initial computation.
    pub fn new(initial: Parameters) -> Self {
        let mut session = Self {
            store: ParameterStore::new(initial),
            breakdown: CostBreakdown::default(),
            recomputations: 0,
            feedback_writes: 0,
        };
        session.recompute();
        session
    }

    pub fn parameters(&self) -> &Parameters {
        self.store.snapshot()
    }

    pub fn breakdown(&self) -> &CostBreakdown {
        &self.breakdown
    }

    /// The customs levy as stored alongside the parameters.
    pub fn customs_tax(&self) -> Decimal {
        self.store.snapshot().customs_tax
    }

    /// Number of engine runs since the session started, the initial one
    /// included.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Number of customs levy write-backs since the session started.
    pub fn feedback_writes(&self) -> u64 {
        self.feedback_writes
    }

    /// Apply a caller update and recompute if any watched field changed.
    ///
    /// `customs_tax` is read-only from the caller's side: a value supplied
    /// for it is dropped.
    pub fn apply_update(&mut self, mut update: ParameterUpdate) -> &CostBreakdown {
        if let Some(ignored) = update.take(Field::CustomsTax) {
            warn!("ignoring caller write of customs_tax = {}; it is derived", ignored);
        }

        let applied = self.store.apply(&update);
        if applied.changed.intersects(&WATCHED_FIELDS) {
            debug!("fields changed {}, recomputing", applied.changed);
            self.recompute();
        } else {
            trace!("update changed no watched field");
        }
        &self.breakdown
    }

    /// Apply raw text typed into a single input field.
    pub fn apply_text(&mut self, field: Field, text: &str) -> &CostBreakdown {
        self.apply_update(ParameterUpdate::new().set_text(field, text))
    }

    fn recompute(&mut self) {
        let computation = CostEngine::compute(self.store.snapshot());
        self.recomputations += 1;

        if let Some(write) = customs_feedback(self.store.snapshot(), &computation) {
            let applied = self.store.apply(&write);
            debug_assert!(!applied.changed.intersects(&WATCHED_FIELDS));
            self.feedback_writes += 1;
            debug!("customs_tax synced to {}", applied.snapshot.customs_tax);
        }

        let (breakdown, _) = computation.into_parts();
        self.breakdown = breakdown;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_initial_computation_syncs_customs() {
        let session = Session::default();
        assert_eq!(session.recomputations(), 1);
        assert_eq!(session.feedback_writes(), 1);
        assert_eq!(session.customs_tax(), dec!(18700.80));
        assert_eq!(session.breakdown().base_kwanza, dec!(116880));
    }

    #[test]
    fn test_watched_change_recomputes_once() {
        let mut session = Session::default();
        session.apply_update(ParameterUpdate::new().set(Field::ExchangeRate, dec!(1000)));
        assert_eq!(session.recomputations(), 2);
        assert_eq!(session.feedback_writes(), 2);
        assert_eq!(session.customs_tax(), dec!(19200));
    }

    #[test]
    fn test_change_not_affecting_levy_skips_feedback() {
        let mut session = Session::default();
        session.apply_update(ParameterUpdate::new().set(Field::ShippingUsd, dec!(40)));
        assert_eq!(session.recomputations(), 2);
        assert_eq!(session.feedback_writes(), 1);
        assert_eq!(session.breakdown().shipping_kwanza, dec!(42856.00));
    }

    #[test]
    fn test_unchanged_value_does_not_recompute() {
        let mut session = Session::default();
        session.apply_update(ParameterUpdate::new().set(Field::UsdNeeded, dec!(120.00)));
        assert_eq!(session.recomputations(), 1);
    }

    #[test]
    fn test_caller_customs_write_is_dropped() {
        let mut session = Session::default();
        session.apply_update(ParameterUpdate::customs_tax(dec!(1)));
        assert_eq!(session.customs_tax(), dec!(18700.80));
        assert_eq!(session.recomputations(), 1);
    }

    #[test]
    fn test_apply_text_coerces_garbage_to_zero() {
        let mut session = Session::default();
        session.apply_text(Field::UsdNeeded, "oops");
        assert_eq!(session.parameters().usd_needed, Decimal::ZERO);
        assert_eq!(session.breakdown().total_final_cost, Decimal::ZERO);
        assert_eq!(session.customs_tax(), Decimal::ZERO);
    }
}
