//! Write-back of the derived customs levy.
//!
//! After each computation the levy is copied into
//! [`Parameters::customs_tax`] so callers can read it next to the inputs.
//! The write is skipped when the stored value already matches, which is
//! what makes a recomputation reach its fixed point in a single step.

use crate::core::parameters::{ParameterUpdate, Parameters};
use crate::engine::pipeline::Computation;

/// The update that brings `params.customs_tax` in line with
/// `computation`, or `None` when it already is.
///
/// # Examples
///
/// ```
/// use landed_cost::core::parameters::Parameters;
/// use landed_cost::engine::feedback::customs_feedback;
/// use landed_cost::engine::pipeline::CostEngine;
///
/// let params = Parameters::default();
/// let computation = CostEngine::compute(&params);
/// let update = customs_feedback(&params, &computation).unwrap();
///
/// let (synced, _) = params.merged(&update);
/// assert!(customs_feedback(&synced, &CostEngine::compute(&synced)).is_none());
/// ```
pub fn customs_feedback(params: &Parameters, computation: &Computation) -> Option<ParameterUpdate> {
    let derived = computation.customs_tax();
    if params.customs_tax == derived {
        None
    } else {
        Some(ParameterUpdate::customs_tax(derived))
    }
}
