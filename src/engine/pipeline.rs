use crate::core::breakdown::CostBreakdown;
use crate::core::parameters::Parameters;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Import duty charged on the foreign-currency principal.
///
/// A fixed policy constant, not derived from any input.
pub const CUSTOMS_LEVY_RATE: Decimal = dec!(0.16);

/// Output of one engine run: the breakdown plus the derived customs levy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Computation {
    breakdown: CostBreakdown,
    customs_tax: Decimal,
}

impl Computation {
    pub fn breakdown(&self) -> &CostBreakdown {
        &self.breakdown
    }

    /// The levy derived from the inputs, to be written back into
    /// [`Parameters::customs_tax`] by the caller.
    pub fn customs_tax(&self) -> Decimal {
        self.customs_tax
    }

    pub fn into_parts(self) -> (CostBreakdown, Decimal) {
        (self.breakdown, self.customs_tax)
    }
}

/// The landed-cost engine.
///
/// A pure function from [`Parameters`] to a [`Computation`]. It holds no
/// state, performs no I/O and cannot fail.
pub struct CostEngine;

impl CostEngine {
    /// Compute the full cost breakdown.
    ///
    /// # Algorithm
    ///
    /// Each step depends only on earlier ones:
    ///
    /// 1. `base = usd_needed × exchange_rate`
    /// 2. `purchase_fee = base × purchase_fee_pct%`
    /// 3. `purchase_commission = purchase_fee × commission_pct%`
    /// 4. `conversion_fee = base × conversion_fee_pct%`
    /// 5. `visa_load = base + purchase_fee + purchase_commission + conversion_fee`
    /// 6. `loading_fee = visa_load × loading_fee_pct%`
    /// 7. `loading_commission = loading_fee × commission_pct%`
    /// 8. `device_expense = visa_load + loading_fee + loading_commission`
    /// 9. `shipping = shipping_usd × shipping_exchange_rate`
    /// 10. `customs = usd_needed × 16% × exchange_rate`
    /// 11. `final = device_expense + shipping + customs`
    ///
    /// Commissions are charged on the fee they accompany, never on the
    /// principal. The customs levy uses the primary rate, not the shipping
    /// rate, and ignores every bank charge. The stored
    /// `params.customs_tax` is never read.
    ///
    /// Arithmetic saturates at the limits of [`Decimal`] instead of
    /// panicking, so every input produces a result.
    ///
    /// # Examples
    ///
    /// ```
    /// use landed_cost::core::parameters::Parameters;
    /// use landed_cost::engine::pipeline::CostEngine;
    /// use rust_decimal_macros::dec;
    ///
    /// let computation = CostEngine::compute(&Parameters::default());
    /// assert_eq!(computation.breakdown().base_kwanza, dec!(116880));
    /// assert_eq!(computation.customs_tax(), dec!(18700.80));
    /// ```
    pub fn compute(params: &Parameters) -> Computation {
        let base_kwanza = params.usd_needed.saturating_mul(params.exchange_rate);

        let purchase_fee = percent_of(base_kwanza, params.purchase_fee_pct);
        let purchase_commission = percent_of(purchase_fee, params.commission_pct);
        let conversion_fee = percent_of(base_kwanza, params.conversion_fee_pct);
        let total_visa_load = sum(&[base_kwanza, purchase_fee, purchase_commission, conversion_fee]);

        let loading_fee = percent_of(total_visa_load, params.loading_fee_pct);
        let loading_commission = percent_of(loading_fee, params.commission_pct);
        let total_device_expense = sum(&[total_visa_load, loading_fee, loading_commission]);

        let shipping_kwanza = params
            .shipping_usd
            .saturating_mul(params.shipping_exchange_rate);
        let customs_tax = Self::customs_levy(params);

        let total_final_cost = sum(&[total_device_expense, shipping_kwanza, customs_tax]);

        Computation {
            breakdown: CostBreakdown {
                base_kwanza,
                loading_fee,
                loading_commission,
                purchase_fee,
                purchase_commission,
                conversion_fee,
                total_visa_load,
                total_device_expense,
                shipping_kwanza,
                total_final_cost,
            },
            customs_tax,
        }
    }

    /// The customs levy alone: 16% of the foreign principal, converted at
    /// the primary exchange rate.
    pub fn customs_levy(params: &Parameters) -> Decimal {
        params
            .usd_needed
            .saturating_mul(CUSTOMS_LEVY_RATE)
            .saturating_mul(params.exchange_rate)
    }
}

/// `amount × pct / 100`.
fn percent_of(amount: Decimal, pct: Decimal) -> Decimal {
    amount.saturating_mul(pct) / Decimal::ONE_HUNDRED
}

fn sum(terms: &[Decimal]) -> Decimal {
    terms
        .iter()
        .fold(Decimal::ZERO, |acc, term| acc.saturating_add(*term))
}
