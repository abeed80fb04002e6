use landed_cost::config::CalculatorConfig;
use landed_cost::core::parameters::{Field, ParameterUpdate, Parameters};
use landed_cost::engine::feedback::customs_feedback;
use landed_cost::engine::pipeline::CostEngine;
use landed_cost::report::indicators::{CostCategory, CostDistribution, OperationIndicators};
use landed_cost::report::summary::SummaryView;
use landed_cost::simulation::fx_shock::FxShock;
use landed_cost::state::session::Session;
use landed_cost::state::store::ParameterStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Full pipeline: defaults → edits → recomputation → feedback → reports.
#[test]
fn full_session_walkthrough() {
    let mut session = Session::new(CalculatorConfig::default().defaults);

    // Session start computes once and syncs the levy.
    assert_eq!(session.recomputations(), 1);
    assert_eq!(session.customs_tax(), dec!(18700.80));
    assert_eq!(session.breakdown().total_device_expense, dec!(130805.9902688));
    assert_eq!(session.breakdown().total_final_cost.round_dp(2), dec!(149506.79));

    // A user types a shipping cost.
    session.apply_text(Field::ShippingUsd, "25");
    assert_eq!(session.recomputations(), 2);
    assert_eq!(session.feedback_writes(), 1, "levy did not move, no write expected");
    assert_eq!(session.breakdown().shipping_kwanza, dec!(26785.00));

    // Then the amount: the levy follows.
    session.apply_text(Field::UsdNeeded, "300");
    assert_eq!(session.recomputations(), 3);
    assert_eq!(session.feedback_writes(), 2);
    assert_eq!(session.customs_tax(), dec!(46752.00));

    let params = session.parameters().clone();
    let breakdown = session.breakdown().clone();

    // The session's view always matches a fresh engine run.
    let fresh = CostEngine::compute(&params);
    assert_eq!(fresh.breakdown(), &breakdown);
    assert_eq!(fresh.customs_tax(), params.customs_tax);

    let summary = SummaryView::new(&params, &breakdown);
    assert_eq!(
        summary.summary_total,
        breakdown.total_device_expense + breakdown.shipping_kwanza
    );
    assert_eq!(summary.summary_total + summary.customs_tax, breakdown.total_final_cost);

    let distribution = CostDistribution::new(&params, &breakdown);
    assert_eq!(distribution.total(), breakdown.total_final_cost);
    assert_eq!(distribution.amount(CostCategory::Principal), dec!(292200.00));

    let indicators = OperationIndicators::new(&params, &breakdown);
    assert!(indicators.cost_per_foreign_unit.unwrap() > params.exchange_rate);
}

/// Driving the store and engine by hand, the way a UI binding would.
#[test]
fn manual_wiring_reaches_fixed_point_in_one_step() {
    let mut store = ParameterStore::new(Parameters::default());

    let applied = store.apply(&ParameterUpdate::new().set(Field::ExchangeRate, dec!(1010)));
    assert!(applied.changed.contains(Field::ExchangeRate));

    let computation = CostEngine::compute(store.snapshot());
    let write = customs_feedback(store.snapshot(), &computation).expect("levy changed");
    let synced = store.apply(&write);
    assert!(!synced.changed.intersects(&landed_cost::core::parameters::WATCHED_FIELDS));

    // The second pass would produce the same levy: nothing left to write.
    let again = CostEngine::compute(store.snapshot());
    assert_eq!(again.customs_tax(), computation.customs_tax());
    assert!(customs_feedback(store.snapshot(), &again).is_none());
}

#[test]
fn permissive_input_never_errors() {
    let mut session = Session::default();
    for (field, text) in [
        (Field::UsdNeeded, ""),
        (Field::ExchangeRate, "n/a"),
        (Field::LoadingFeePct, "2,5"),
        (Field::CommissionPct, "--"),
    ] {
        session.apply_text(field, text);
    }
    let params = session.parameters();
    assert_eq!(params.usd_needed, Decimal::ZERO);
    assert_eq!(params.exchange_rate, Decimal::ZERO);
    // "2,5" keeps its leading "2"
    assert_eq!(params.loading_fee_pct, dec!(2));
    assert_eq!(params.commission_pct, Decimal::ZERO);
    assert_eq!(session.breakdown().total_final_cost, Decimal::ZERO);
}

#[test]
fn shock_on_session_parameters() {
    let session = Session::default();
    let results = FxShock::rate_sweep(session.parameters(), &[dec!(10), dec!(-10)]);
    assert_eq!(results[0].impact, -results[1].impact);
    assert_eq!(results[0].baseline_total, session.breakdown().total_final_cost);
}
