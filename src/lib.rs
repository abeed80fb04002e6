//! # landed-cost
//!
//! True landed cost, in local currency, of buying foreign currency on a
//! prepaid card and importing goods with it.
//!
//! Given the amount to acquire, the exchange rates and the bank's fee
//! schedule, the engine derives every intermediate charge, the shipping
//! cost and the import customs levy, and keeps the levy in sync with the
//! parameter state without recomputation loops.
//!
//! ## Architecture
//!
//! - **core**: Parameters, partial updates, input coercion, cost breakdown
//! - **engine**: The pure cost pipeline and the customs feedback rule
//! - **state**: Parameter store and the session wiring them together
//! - **report**: Summary, indicators and cost distribution for display
//! - **simulation**: FX shock scenarios and random parameter generation

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod report;
pub mod simulation;
pub mod state;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::CalculatorConfig;
    pub use crate::core::breakdown::CostBreakdown;
    pub use crate::core::input::coerce_decimal;
    pub use crate::core::parameters::{Field, ParameterUpdate, Parameters, WATCHED_FIELDS};
    pub use crate::engine::pipeline::{Computation, CostEngine, CUSTOMS_LEVY_RATE};
    pub use crate::report::summary::SummaryView;
    pub use crate::state::session::Session;
    pub use crate::state::store::ParameterStore;
}
