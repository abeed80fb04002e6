use crate::core::currency::round_cents;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full cost breakdown of one calculation, in local currency.
///
/// Every field is derived from [`Parameters`](crate::core::parameters::Parameters)
/// by the engine; a breakdown is always replaced as a whole, never patched.
/// The customs levy is not part of it, see
/// [`Computation`](crate::engine::pipeline::Computation).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Foreign principal converted at the primary rate.
    pub base_kwanza: Decimal,
    pub loading_fee: Decimal,
    pub loading_commission: Decimal,
    pub purchase_fee: Decimal,
    pub purchase_commission: Decimal,
    pub conversion_fee: Decimal,
    /// Amount debited to load the card: principal plus issuer charges.
    pub total_visa_load: Decimal,
    /// Card load plus loading charges.
    pub total_device_expense: Decimal,
    pub shipping_kwanza: Decimal,
    /// Device expense plus shipping plus customs levy.
    pub total_final_cost: Decimal,
}

impl CostBreakdown {
    /// Sum of every bank charge: the three issuer charges and the two
    /// loading charges.
    pub fn bank_fees(&self) -> Decimal {
        [
            self.purchase_commission,
            self.conversion_fee,
            self.loading_fee,
            self.loading_commission,
        ]
        .into_iter()
        .fold(self.purchase_fee, Decimal::saturating_add)
    }
}

impl fmt::Display for CostBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Cost Breakdown ===")?;
        writeln!(f, "Base:                 {:>16.2}", round_cents(self.base_kwanza))?;
        writeln!(f, "\n--- Card issuer ---")?;
        writeln!(f, "Purchase Fee:         {:>16.2}", round_cents(self.purchase_fee))?;
        writeln!(f, "Purchase Commission:  {:>16.2}", round_cents(self.purchase_commission))?;
        writeln!(f, "Conversion Fee:       {:>16.2}", round_cents(self.conversion_fee))?;
        writeln!(f, "Total Card Load:      {:>16.2}", round_cents(self.total_visa_load))?;
        writeln!(f, "\n--- Account debit ---")?;
        writeln!(f, "Loading Fee:          {:>16.2}", round_cents(self.loading_fee))?;
        writeln!(f, "Loading Commission:   {:>16.2}", round_cents(self.loading_commission))?;
        writeln!(f, "Total Device Expense: {:>16.2}", round_cents(self.total_device_expense))?;
        writeln!(f, "\n--- Logistics ---")?;
        writeln!(f, "Shipping:             {:>16.2}", round_cents(self.shipping_kwanza))?;
        writeln!(f, "Total Final Cost:     {:>16.2}", round_cents(self.total_final_cost))?;
        Ok(())
    }
}
