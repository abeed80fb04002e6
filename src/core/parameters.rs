use crate::core::input::coerce_decimal;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The input vector of one landed-cost calculation.
///
/// Amounts are in the foreign currency unless the name says otherwise,
/// rates are local units per foreign unit, and `*_pct` fields are
/// percentages (2 means 2%).
///
/// `customs_tax` is not an input. It holds the last levy derived by the
/// engine so it can be read next to the rest of the state, and the engine
/// never reads it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub usd_needed: Decimal,
    pub exchange_rate: Decimal,
    pub shipping_usd: Decimal,
    pub shipping_exchange_rate: Decimal,
    pub customs_tax: Decimal,
    pub loading_fee_pct: Decimal,
    pub commission_pct: Decimal,
    pub purchase_fee_pct: Decimal,
    pub conversion_fee_pct: Decimal,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            usd_needed: dec!(120),
            exchange_rate: dec!(974.00),
            shipping_usd: dec!(0.00),
            shipping_exchange_rate: dec!(1071.40),
            customs_tax: Decimal::ZERO,
            loading_fee_pct: dec!(2),
            commission_pct: dec!(14),
            purchase_fee_pct: dec!(3),
            conversion_fee_pct: dec!(6),
        }
    }
}

impl Parameters {
    /// Read a single field.
    pub fn get(&self, field: Field) -> Decimal {
        match field {
            Field::UsdNeeded => self.usd_needed,
            Field::ExchangeRate => self.exchange_rate,
            Field::ShippingUsd => self.shipping_usd,
            Field::ShippingExchangeRate => self.shipping_exchange_rate,
            Field::CustomsTax => self.customs_tax,
            Field::LoadingFeePct => self.loading_fee_pct,
            Field::CommissionPct => self.commission_pct,
            Field::PurchaseFeePct => self.purchase_fee_pct,
            Field::ConversionFeePct => self.conversion_fee_pct,
        }
    }

    fn slot(&mut self, field: Field) -> &mut Decimal {
        match field {
            Field::UsdNeeded => &mut self.usd_needed,
            Field::ExchangeRate => &mut self.exchange_rate,
            Field::ShippingUsd => &mut self.shipping_usd,
            Field::ShippingExchangeRate => &mut self.shipping_exchange_rate,
            Field::CustomsTax => &mut self.customs_tax,
            Field::LoadingFeePct => &mut self.loading_fee_pct,
            Field::CommissionPct => &mut self.commission_pct,
            Field::PurchaseFeePct => &mut self.purchase_fee_pct,
            Field::ConversionFeePct => &mut self.conversion_fee_pct,
        }
    }

    /// Merge `update` over this snapshot, returning the merged snapshot
    /// and the set of fields whose value actually changed.
    pub fn merged(&self, update: &ParameterUpdate) -> (Parameters, FieldSet) {
        let mut next = self.clone();
        let mut changed = FieldSet::empty();
        for (field, value) in update.entries() {
            let slot = next.slot(field);
            if *slot != value {
                *slot = value;
                changed.insert(field);
            }
        }
        (next, changed)
    }

    /// Check the documented domain constraints.
    ///
    /// Advisory only: the engine is total and accepts every value, so the
    /// result is meant for warnings, never for rejecting input.
    pub fn validate(&self) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();
        for field in [Field::UsdNeeded, Field::ShippingUsd] {
            if self.get(field) < Decimal::ZERO {
                violations.push(ConstraintViolation::new(field, self.get(field), "must be >= 0"));
            }
        }
        for field in [Field::ExchangeRate, Field::ShippingExchangeRate] {
            if self.get(field) <= Decimal::ZERO {
                violations.push(ConstraintViolation::new(field, self.get(field), "must be > 0"));
            }
        }
        for field in Field::PERCENTAGES {
            let value = self.get(field);
            if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                violations.push(ConstraintViolation::new(field, value, "expected within [0, 100]"));
            }
        }
        violations
    }
}

/// Identifies one field of [`Parameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    UsdNeeded,
    ExchangeRate,
    ShippingUsd,
    ShippingExchangeRate,
    CustomsTax,
    LoadingFeePct,
    CommissionPct,
    PurchaseFeePct,
    ConversionFeePct,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::UsdNeeded,
        Field::ExchangeRate,
        Field::ShippingUsd,
        Field::ShippingExchangeRate,
        Field::CustomsTax,
        Field::LoadingFeePct,
        Field::CommissionPct,
        Field::PurchaseFeePct,
        Field::ConversionFeePct,
    ];

    pub const PERCENTAGES: [Field; 4] = [
        Field::LoadingFeePct,
        Field::CommissionPct,
        Field::PurchaseFeePct,
        Field::ConversionFeePct,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::UsdNeeded => "usd_needed",
            Field::ExchangeRate => "exchange_rate",
            Field::ShippingUsd => "shipping_usd",
            Field::ShippingExchangeRate => "shipping_exchange_rate",
            Field::CustomsTax => "customs_tax",
            Field::LoadingFeePct => "loading_fee_pct",
            Field::CommissionPct => "commission_pct",
            Field::PurchaseFeePct => "purchase_fee_pct",
            Field::ConversionFeePct => "conversion_fee_pct",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every field whose change must trigger a recomputation.
///
/// `customs_tax` is deliberately absent: it is written back by the
/// feedback rule, and watching it would schedule a new recomputation
/// after every recomputation.
pub const WATCHED_FIELDS: FieldSet = FieldSet::of(&[
    Field::UsdNeeded,
    Field::ExchangeRate,
    Field::ShippingUsd,
    Field::ShippingExchangeRate,
    Field::LoadingFeePct,
    Field::CommissionPct,
    Field::PurchaseFeePct,
    Field::ConversionFeePct,
]);

/// A small set of [`Field`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct FieldSet(u16);

impl FieldSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn of(fields: &[Field]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < fields.len() {
            bits |= 1 << (fields[i] as u16);
            i += 1;
        }
        Self(bits)
    }

    pub fn insert(&mut self, field: Field) {
        self.0 |= field.bit();
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn intersects(&self, other: &FieldSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Field::name).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// A partial update: only the fields set to `Some` are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterUpdate {
    pub usd_needed: Option<Decimal>,
    pub exchange_rate: Option<Decimal>,
    pub shipping_usd: Option<Decimal>,
    pub shipping_exchange_rate: Option<Decimal>,
    pub customs_tax: Option<Decimal>,
    pub loading_fee_pct: Option<Decimal>,
    pub commission_pct: Option<Decimal>,
    pub purchase_fee_pct: Option<Decimal>,
    pub conversion_fee_pct: Option<Decimal>,
}

impl ParameterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// An update touching only the stored customs levy.
    pub fn customs_tax(value: Decimal) -> Self {
        Self::new().set(Field::CustomsTax, value)
    }

    pub fn set(mut self, field: Field, value: Decimal) -> Self {
        *self.slot(field) = Some(value);
        self
    }

    /// Set a field from raw user text. Unparsable text becomes zero.
    pub fn set_text(self, field: Field, text: &str) -> Self {
        self.set(field, coerce_decimal(text))
    }

    pub fn get(&self, field: Field) -> Option<Decimal> {
        match field {
            Field::UsdNeeded => self.usd_needed,
            Field::ExchangeRate => self.exchange_rate,
            Field::ShippingUsd => self.shipping_usd,
            Field::ShippingExchangeRate => self.shipping_exchange_rate,
            Field::CustomsTax => self.customs_tax,
            Field::LoadingFeePct => self.loading_fee_pct,
            Field::CommissionPct => self.commission_pct,
            Field::PurchaseFeePct => self.purchase_fee_pct,
            Field::ConversionFeePct => self.conversion_fee_pct,
        }
    }

    /// Remove a field from the update, returning the value it carried.
    pub fn take(&mut self, field: Field) -> Option<Decimal> {
        self.slot(field).take()
    }

    fn slot(&mut self, field: Field) -> &mut Option<Decimal> {
        match field {
            Field::UsdNeeded => &mut self.usd_needed,
            Field::ExchangeRate => &mut self.exchange_rate,
            Field::ShippingUsd => &mut self.shipping_usd,
            Field::ShippingExchangeRate => &mut self.shipping_exchange_rate,
            Field::CustomsTax => &mut self.customs_tax,
            Field::LoadingFeePct => &mut self.loading_fee_pct,
            Field::CommissionPct => &mut self.commission_pct,
            Field::PurchaseFeePct => &mut self.purchase_fee_pct,
            Field::ConversionFeePct => &mut self.conversion_fee_pct,
        }
    }

    /// The fields carried by this update, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (Field, Decimal)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|value| (field, value)))
    }

    pub fn fields(&self) -> FieldSet {
        let mut set = FieldSet::empty();
        for (field, _) in self.entries() {
            set.insert(field);
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

/// A value outside its documented domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintViolation {
    pub field: Field,
    pub value: Decimal,
    pub expectation: &'static str,
}

impl ConstraintViolation {
    fn new(field: Field, value: Decimal, expectation: &'static str) -> Self {
        Self {
            field,
            value,
            expectation,
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} ({})", self.field, self.value, self.expectation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_preserves_unspecified_fields() {
        let params = Parameters::default();
        let update = ParameterUpdate::new().set(Field::UsdNeeded, dec!(200));
        let (next, changed) = params.merged(&update);

        assert_eq!(next.usd_needed, dec!(200));
        assert_eq!(next.exchange_rate, params.exchange_rate);
        assert_eq!(next.commission_pct, params.commission_pct);
        assert_eq!(changed, FieldSet::of(&[Field::UsdNeeded]));
    }

    #[test]
    fn test_merge_same_value_is_not_a_change() {
        let params = Parameters::default();
        // 974 and 974.00 are the same number
        let update = ParameterUpdate::new().set(Field::ExchangeRate, dec!(974));
        let (next, changed) = params.merged(&update);
        assert_eq!(next, params);
        assert!(changed.is_empty());
    }

    #[test]
    fn test_watched_fields_exclude_customs() {
        assert!(!WATCHED_FIELDS.contains(Field::CustomsTax));
        assert_eq!(WATCHED_FIELDS.len(), 8);
        for field in Field::ALL {
            if field != Field::CustomsTax {
                assert!(WATCHED_FIELDS.contains(field), "{} not watched", field);
            }
        }
    }

    #[test]
    fn test_update_set_text_coerces() {
        let update = ParameterUpdate::new()
            .set_text(Field::UsdNeeded, "abc")
            .set_text(Field::ExchangeRate, "980.5");
        assert_eq!(update.usd_needed, Some(Decimal::ZERO));
        assert_eq!(update.exchange_rate, Some(dec!(980.5)));
        assert_eq!(
            update.fields(),
            FieldSet::of(&[Field::UsdNeeded, Field::ExchangeRate])
        );
    }

    #[test]
    fn test_update_take() {
        let mut update = ParameterUpdate::customs_tax(dec!(10)).set(Field::ShippingUsd, dec!(5));
        assert_eq!(update.take(Field::CustomsTax), Some(dec!(10)));
        assert_eq!(update.fields(), FieldSet::of(&[Field::ShippingUsd]));
        assert_eq!(update.take(Field::CustomsTax), None);
    }

    #[test]
    fn test_validate_defaults_clean() {
        assert!(Parameters::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_out_of_domain_values() {
        let params = Parameters {
            usd_needed: dec!(-1),
            exchange_rate: Decimal::ZERO,
            commission_pct: dec!(140),
            ..Parameters::default()
        };
        let fields: Vec<Field> = params.validate().iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec![Field::UsdNeeded, Field::ExchangeRate, Field::CommissionPct]
        );
    }

    #[test]
    fn test_field_set_display() {
        let set = FieldSet::of(&[Field::CommissionPct, Field::UsdNeeded]);
        assert_eq!(set.to_string(), "{usd_needed, commission_pct}");
    }

    #[test]
    fn test_parameters_json_partial() {
        let params: Parameters = serde_json::from_str(r#"{ "usd_needed": "50" }"#).unwrap();
        assert_eq!(params.usd_needed, dec!(50));
        assert_eq!(params.exchange_rate, dec!(974.00));
    }
}
