//! Exchange-rate shock scenarios.
//!
//! The primary rate is entered by hand and goes stale quickly. These
//! helpers show how much the landed cost moves if the rate drifts by a
//! given percentage before the card is loaded.

use crate::core::currency::round_cents;
use crate::core::parameters::Parameters;
use crate::engine::pipeline::CostEngine;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of one FX shock scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FxShockResult {
    /// Description of the shock applied.
    pub scenario: String,
    /// Rate change in percent (10 = the local currency weakens by 10%).
    pub shock_pct: Decimal,
    pub baseline_rate: Decimal,
    pub shocked_rate: Decimal,
    /// Final cost before the shock.
    pub baseline_total: Decimal,
    /// Final cost after the shock.
    pub shocked_total: Decimal,
    /// `shocked_total - baseline_total`.
    pub impact: Decimal,
}

pub struct FxShock;

impl FxShock {
    /// Scale the primary exchange rate by `1 + shock_pct / 100` and
    /// recompute.
    ///
    /// Only the primary rate moves. The shipping rate is quoted
    /// separately and stays as it is.
    pub fn apply(params: &Parameters, shock_pct: Decimal) -> FxShockResult {
        let baseline = CostEngine::compute(params);

        let factor = Decimal::ONE.saturating_add(shock_pct / Decimal::ONE_HUNDRED);
        let shocked_params = Parameters {
            exchange_rate: params.exchange_rate.saturating_mul(factor),
            ..params.clone()
        };
        let shocked = CostEngine::compute(&shocked_params);

        let baseline_total = baseline.breakdown().total_final_cost;
        let shocked_total = shocked.breakdown().total_final_cost;

        FxShockResult {
            scenario: format!("exchange rate {:+}%", shock_pct.normalize()),
            shock_pct,
            baseline_rate: params.exchange_rate,
            shocked_rate: shocked_params.exchange_rate,
            baseline_total,
            shocked_total,
            impact: shocked_total.saturating_sub(baseline_total),
        }
    }

    /// Apply each shock independently against the same baseline.
    pub fn rate_sweep(params: &Parameters, shocks: &[Decimal]) -> Vec<FxShockResult> {
        shocks.iter().map(|s| Self::apply(params, *s)).collect()
    }
}

impl std::fmt::Display for FxShockResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<24} rate {:>10.2} -> {:>10.2}  total {:>16.2} -> {:>16.2}  impact {:>+14.2}",
            self.scenario,
            round_cents(self.baseline_rate),
            round_cents(self.shocked_rate),
            round_cents(self.baseline_total),
            round_cents(self.shocked_total),
            round_cents(self.impact)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_shock_has_no_impact() {
        let result = FxShock::apply(&Parameters::default(), Decimal::ZERO);
        assert_eq!(result.impact, Decimal::ZERO);
        assert_eq!(result.shocked_rate, dec!(974));
    }

    #[test]
    fn test_shock_scales_everything_but_shipping() {
        let params = Parameters {
            shipping_usd: dec!(10),
            ..Parameters::default()
        };
        let result = FxShock::apply(&params, dec!(10));

        assert_eq!(result.shocked_rate, dec!(1071.4));
        // every rate-dependent term grows by 10%, shipping does not
        let baseline = CostEngine::compute(&params);
        let rate_dependent = baseline.breakdown().total_final_cost - baseline.breakdown().shipping_kwanza;
        assert_eq!(result.impact, rate_dependent * dec!(0.1));
    }

    #[test]
    fn test_negative_shock_lowers_cost() {
        let result = FxShock::apply(&Parameters::default(), dec!(-5));
        assert!(result.impact < Decimal::ZERO);
        assert_eq!(result.scenario, "exchange rate -5%");
    }

    #[test]
    fn test_sweep_preserves_order() {
        let shocks = [dec!(5), dec!(-5), dec!(20)];
        let results = FxShock::rate_sweep(&Parameters::default(), &shocks);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].scenario, "exchange rate +5%");
        assert!(results[2].impact > results[0].impact);
        assert!(results.iter().all(|r| r.baseline_total == results[0].baseline_total));
    }

    #[test]
    fn test_display_rounds_totals() {
        let result = FxShock::apply(&Parameters::default(), dec!(10));
        let text = result.to_string();
        assert!(text.contains("164457.47"), "{}", text);
        assert!(text.contains("+14950.68"), "{}", text);
    }
}
