use crate::core::breakdown::CostBreakdown;
use crate::core::currency::round_cents;
use crate::core::parameters::Parameters;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ratios describing how efficient an operation is.
///
/// Both ratios divide by an input-derived value, so each is `None` when
/// its denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationIndicators {
    /// Local currency actually spent per unit of foreign currency acquired,
    /// bank charges included.
    pub cost_per_foreign_unit: Option<Decimal>,
    /// Shipping as a percentage of the final cost.
    pub shipping_share_percent: Option<f64>,
}

impl OperationIndicators {
    pub fn new(params: &Parameters, breakdown: &CostBreakdown) -> Self {
        let cost_per_foreign_unit = breakdown
            .total_device_expense
            .checked_div(params.usd_needed);

        let shipping_share_percent = breakdown
            .shipping_kwanza
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(breakdown.total_final_cost))
            .and_then(|pct| pct.to_f64());

        OperationIndicators {
            cost_per_foreign_unit,
            shipping_share_percent,
        }
    }
}

impl std::fmt::Display for OperationIndicators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Operation Indicators ===")?;
        match self.cost_per_foreign_unit {
            Some(cost) => writeln!(f, "Cost per foreign unit: {:.2}", round_cents(cost))?,
            None => writeln!(f, "Cost per foreign unit: n/a")?,
        }
        match self.shipping_share_percent {
            Some(pct) => writeln!(f, "Shipping share:        {:.1}%", pct)?,
            None => writeln!(f, "Shipping share:        n/a")?,
        }
        Ok(())
    }
}

/// What a slice of the cost distribution represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    BankFees,
    Principal,
    Customs,
    Shipping,
}

impl CostCategory {
    pub fn label(self) -> &'static str {
        match self {
            CostCategory::BankFees => "Bank fees",
            CostCategory::Principal => "Principal",
            CostCategory::Customs => "Customs (16%)",
            CostCategory::Shipping => "Shipping",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSlice {
    pub category: CostCategory,
    pub amount: Decimal,
}

/// Split of the final cost into its four components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostDistribution {
    pub slices: Vec<CostSlice>,
}

impl CostDistribution {
    /// The customs slice uses the levy stored in `params`.
    pub fn new(params: &Parameters, breakdown: &CostBreakdown) -> Self {
        let slices = vec![
            CostSlice {
                category: CostCategory::BankFees,
                amount: breakdown.bank_fees(),
            },
            CostSlice {
                category: CostCategory::Principal,
                amount: breakdown.base_kwanza,
            },
            CostSlice {
                category: CostCategory::Customs,
                amount: params.customs_tax,
            },
            CostSlice {
                category: CostCategory::Shipping,
                amount: breakdown.shipping_kwanza,
            },
        ];
        CostDistribution { slices }
    }

    pub fn total(&self) -> Decimal {
        self.slices
            .iter()
            .fold(Decimal::ZERO, |acc, slice| acc.saturating_add(slice.amount))
    }

    pub fn amount(&self, category: CostCategory) -> Decimal {
        self.slices
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.amount)
            .unwrap_or(Decimal::ZERO)
    }
}

impl std::fmt::Display for CostDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Cost Distribution ===")?;
        for slice in &self.slices {
            writeln!(f, "  {:<14} {:>16.2}", slice.category.label(), round_cents(slice.amount))?;
        }
        Ok(())
    }
}
