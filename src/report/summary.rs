use crate::core::breakdown::CostBreakdown;
use crate::core::currency::round_cents;
use crate::core::parameters::Parameters;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quick summary of the funds a purchase needs.
///
/// This is a display policy, not part of the engine's output: the
/// headline `summary_total` covers the card expense and shipping only and
/// leaves the customs levy out, showing it on its own line instead. Use
/// [`CostBreakdown::total_final_cost`] for the figure that includes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryView {
    /// Device expense plus shipping, customs excluded.
    pub summary_total: Decimal,
    pub device_expense: Decimal,
    /// Everything the banks charge on top of the converted principal.
    pub bank_charges: Decimal,
    pub shipping: Decimal,
    /// The levy as stored in the parameters.
    pub customs_tax: Decimal,
}

impl SummaryView {
    pub fn new(params: &Parameters, breakdown: &CostBreakdown) -> Self {
        SummaryView {
            summary_total: breakdown
                .total_device_expense
                .saturating_add(breakdown.shipping_kwanza),
            device_expense: breakdown.total_device_expense,
            bank_charges: breakdown
                .total_device_expense
                .saturating_sub(breakdown.base_kwanza),
            shipping: breakdown.shipping_kwanza,
            customs_tax: params.customs_tax,
        }
    }
}

impl std::fmt::Display for SummaryView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Import Summary ===")?;
        writeln!(f, "Total (card + shipping): {:>16.2}", round_cents(self.summary_total))?;
        writeln!(f, "  Card expense:          {:>16.2}", round_cents(self.device_expense))?;
        writeln!(f, "  Bank charges:          {:>16.2}", round_cents(self.bank_charges))?;
        writeln!(f, "  Shipping:              {:>16.2}", round_cents(self.shipping))?;
        writeln!(f, "Customs levy (separate): {:>16.2}", round_cents(self.customs_tax))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parameters::{Field, ParameterUpdate};
    use crate::state::session::Session;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_excludes_customs() {
        let mut session = Session::default();
        session.apply_update(ParameterUpdate::new().set(Field::ShippingUsd, dec!(10)));
        let summary = SummaryView::new(session.parameters(), session.breakdown());

        assert_eq!(summary.shipping, dec!(10714.00));
        assert_eq!(summary.summary_total, dec!(130805.9902688) + dec!(10714.00));
        assert_eq!(summary.customs_tax, dec!(18700.80));
        assert_eq!(
            summary.summary_total + summary.customs_tax,
            session.breakdown().total_final_cost
        );
    }

    #[test]
    fn test_bank_charges() {
        let session = Session::default();
        let summary = SummaryView::new(session.parameters(), session.breakdown());
        assert_eq!(summary.bank_charges, dec!(13925.9902688));
        assert_eq!(summary.bank_charges, session.breakdown().bank_fees());
    }

    #[test]
    fn test_display_rounds_to_cents() {
        let summary = SummaryView {
            summary_total: dec!(100.005),
            device_expense: dec!(90.004),
            bank_charges: dec!(0),
            shipping: dec!(10.001),
            customs_tax: dec!(16.005),
        };
        let text = summary.to_string();
        assert!(text.contains("Total (card + shipping):           100.01"));
        assert!(text.contains("Card expense:          ") && text.contains("90.00"));
        assert!(text.contains("Customs levy (separate):            16.01"));
    }
}
