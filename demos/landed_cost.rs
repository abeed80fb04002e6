//! Landed-cost walkthrough.
//!
//! Shows a session reacting to field edits, the customs levy staying in
//! sync, and the summary that leaves the levy out of its headline.

use landed_cost::config::CalculatorConfig;
use landed_cost::core::currency::round_cents;
use landed_cost::core::parameters::Field;
use landed_cost::report::indicators::{CostDistribution, OperationIndicators};
use landed_cost::report::summary::SummaryView;
use landed_cost::simulation::fx_shock::FxShock;
use landed_cost::state::session::Session;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║   landed-cost: Card Import Walkthrough   ║");
    println!("╚══════════════════════════════════════════╝\n");

    let config = CalculatorConfig::default();

    // --- Scenario 1: session start ---
    println!("━━━ Scenario 1: Defaults ━━━\n");

    let mut session = Session::new(config.defaults.clone());
    println!("Rate: {}\n", config.rate_quote(session.parameters()));
    println!("{}", session.breakdown());
    println!("Customs levy:        {:.2}", round_cents(session.customs_tax()));
    println!("Recomputations:      {}\n", session.recomputations());

    // --- Scenario 2: editing fields ---
    println!("━━━ Scenario 2: Field edits ━━━\n");

    session.apply_text(Field::UsdNeeded, "250");
    session.apply_text(Field::ShippingUsd, "35.50");
    // half-typed input counts as zero rather than failing
    session.apply_text(Field::ConversionFeePct, "");

    println!("{}", session.breakdown());
    println!("Customs levy:        {:.2}", round_cents(session.customs_tax()));
    println!(
        "Recomputations:      {} (feedback writes: {})\n",
        session.recomputations(),
        session.feedback_writes()
    );

    // --- Scenario 3: reports ---
    println!("━━━ Scenario 3: Reports ━━━\n");

    let params = session.parameters();
    let breakdown = session.breakdown();
    println!("{}", SummaryView::new(params, breakdown));
    println!("{}", OperationIndicators::new(params, breakdown));
    println!("{}", CostDistribution::new(params, breakdown));

    // --- Scenario 4: rate risk ---
    println!("━━━ Scenario 4: Rate shocks ━━━\n");

    for result in FxShock::rate_sweep(params, &[dec!(-5), dec!(5), dec!(10), dec!(20)]) {
        println!("  {}", result);
    }
}
