//! Random parameter generation for benchmarks and stress tests.

use crate::core::parameters::Parameters;
use rand::Rng;
use rust_decimal::Decimal;

/// Ranges to draw each parameter from.
#[derive(Debug, Clone)]
pub struct ParameterRanges {
    /// Foreign amount range (min, max).
    pub usd_needed: (f64, f64),
    pub exchange_rate: (f64, f64),
    pub shipping_usd: (f64, f64),
    pub shipping_exchange_rate: (f64, f64),
    /// Shared range for all four percentage fields.
    pub percentage: (f64, f64),
}

impl Default for ParameterRanges {
    fn default() -> Self {
        Self {
            usd_needed: (1.0, 5_000.0),
            exchange_rate: (800.0, 1_200.0),
            shipping_usd: (0.0, 300.0),
            shipping_exchange_rate: (800.0, 1_200.0),
            percentage: (0.0, 20.0),
        }
    }
}

/// Generate a random parameter vector. `customs_tax` is left at zero.
pub fn generate_random_parameters(ranges: &ParameterRanges) -> Parameters {
    let mut rng = rand::thread_rng();
    let mut draw = |(min, max): (f64, f64)| -> Decimal {
        let value = if max > min { rng.gen_range(min..max) } else { min };
        Decimal::from_f64_retain(value)
            .unwrap_or(Decimal::ZERO)
            .round_dp(2)
    };

    Parameters {
        usd_needed: draw(ranges.usd_needed),
        exchange_rate: draw(ranges.exchange_rate),
        shipping_usd: draw(ranges.shipping_usd),
        shipping_exchange_rate: draw(ranges.shipping_exchange_rate),
        customs_tax: Decimal::ZERO,
        loading_fee_pct: draw(ranges.percentage),
        commission_pct: draw(ranges.percentage),
        purchase_fee_pct: draw(ranges.percentage),
        conversion_fee_pct: draw(ranges.percentage),
    }
}

/// Generate `count` random parameter vectors.
pub fn generate_batch(ranges: &ParameterRanges, count: usize) -> Vec<Parameters> {
    (0..count).map(|_| generate_random_parameters(ranges)).collect()
}
