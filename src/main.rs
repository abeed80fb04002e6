//! landed-cost CLI
//!
//! Compute the landed cost of a card-funded import from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Full breakdown with the built-in defaults
//! landed-cost compute
//!
//! # Override inputs; unparsable values count as zero
//! landed-cost compute --usd 250 --rate 980.50 --shipping-usd 35
//!
//! # Summary view as JSON
//! landed-cost --format json summary --usd 250
//!
//! # How much a rate move would cost
//! landed-cost shock --shocks 5,10,-5
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use landed_cost::config::CalculatorConfig;
use landed_cost::core::breakdown::CostBreakdown;
use landed_cost::core::currency::{round_cents, RateQuote};
use landed_cost::core::input::coerce_decimal;
use landed_cost::core::parameters::{Field, ParameterUpdate, Parameters};
use landed_cost::error::ConfigError;
use landed_cost::report::indicators::{CostDistribution, OperationIndicators};
use landed_cost::report::summary::SummaryView;
use landed_cost::simulation::fx_shock::{FxShock, FxShockResult};
use landed_cost::state::session::Session;
use log::warn;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "landed-cost",
    version,
    about = "Landed cost of foreign currency loaded onto a prepaid card"
)]
struct Cli {
    #[arg(long, global = true, help = "JSON configuration file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Full cost breakdown including the customs levy
    Compute {
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Quick summary: card expense and shipping, customs shown apart
    Summary {
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Final cost under exchange-rate shocks
    Shock {
        #[command(flatten)]
        params: ParamArgs,
        #[arg(
            long,
            value_delimiter = ',',
            allow_hyphen_values = true,
            default_value = "5,10,20",
            help = "Comma-separated rate changes in percent"
        )]
        shocks: Vec<String>,
    },
    /// Print the configured defaults and rate provenance
    Defaults,
}

/// Parameter overrides. Values are taken as typed and coerced, so
/// `--usd abc` means zero rather than an error.
#[derive(Args, Debug, Default)]
struct ParamArgs {
    #[arg(long, allow_hyphen_values = true, help = "Foreign amount to acquire")]
    usd: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Local units per foreign unit")]
    rate: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Shipping cost in foreign currency")]
    shipping_usd: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Rate applied to shipping")]
    shipping_rate: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Loading fee, percent")]
    loading_fee: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Commission on fees, percent")]
    commission: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Purchase fee, percent")]
    purchase_fee: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Currency conversion fee, percent")]
    conversion_fee: Option<String>,
}

impl ParamArgs {
    fn to_update(&self) -> ParameterUpdate {
        let fields = [
            (Field::UsdNeeded, &self.usd),
            (Field::ExchangeRate, &self.rate),
            (Field::ShippingUsd, &self.shipping_usd),
            (Field::ShippingExchangeRate, &self.shipping_rate),
            (Field::LoadingFeePct, &self.loading_fee),
            (Field::CommissionPct, &self.commission),
            (Field::PurchaseFeePct, &self.purchase_fee),
            (Field::ConversionFeePct, &self.conversion_fee),
        ];
        fields
            .into_iter()
            .fold(ParameterUpdate::new(), |update, (field, text)| match text {
                Some(text) => update.set_text(field, text),
                None => update,
            })
    }
}

#[derive(Serialize)]
struct ComputeOutput<'a> {
    parameters: &'a Parameters,
    breakdown: &'a CostBreakdown,
    customs_tax: Decimal,
    rate: RateQuote,
}

#[derive(Serialize)]
struct SummaryOutput {
    summary: SummaryView,
    indicators: OperationIndicators,
    distribution: CostDistribution,
    rate: RateQuote,
}

fn open_session(config: &CalculatorConfig, args: &ParamArgs) -> Session {
    let mut session = Session::new(config.defaults.clone());
    session.apply_update(args.to_update());
    for violation in session.parameters().validate() {
        warn!("{}", violation);
    }
    session
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ConfigError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_compute(config: &CalculatorConfig, args: &ParamArgs, format: Format) -> Result<(), ConfigError> {
    let session = open_session(config, args);
    let rate = config.rate_quote(session.parameters());

    if format == Format::Json {
        return print_json(&ComputeOutput {
            parameters: session.parameters(),
            breakdown: session.breakdown(),
            customs_tax: session.customs_tax(),
            rate,
        });
    }

    println!("Rate: {}\n", rate);
    print!("{}", session.breakdown());
    println!("Customs Levy (16%):   {:>16.2}", round_cents(session.customs_tax()));
    Ok(())
}

fn cmd_summary(config: &CalculatorConfig, args: &ParamArgs, format: Format) -> Result<(), ConfigError> {
    let session = open_session(config, args);
    let params = session.parameters();
    let breakdown = session.breakdown();

    let output = SummaryOutput {
        summary: SummaryView::new(params, breakdown),
        indicators: OperationIndicators::new(params, breakdown),
        distribution: CostDistribution::new(params, breakdown),
        rate: config.rate_quote(params),
    };

    if format == Format::Json {
        return print_json(&output);
    }

    println!("Rate: {}\n", output.rate);
    println!("{}", output.summary);
    println!("{}", output.indicators);
    print!("{}", output.distribution);
    Ok(())
}

fn cmd_shock(
    config: &CalculatorConfig,
    args: &ParamArgs,
    shocks: &[String],
    format: Format,
) -> Result<(), ConfigError> {
    let session = open_session(config, args);
    let shocks: Vec<Decimal> = shocks.iter().map(|s| coerce_decimal(s)).collect();
    let results: Vec<FxShockResult> = FxShock::rate_sweep(session.parameters(), &shocks);

    if format == Format::Json {
        return print_json(&results);
    }

    for result in &results {
        println!("{}", result);
    }
    Ok(())
}

fn cmd_defaults(config: &CalculatorConfig) -> Result<(), ConfigError> {
    #[derive(Serialize)]
    struct DefaultsOutput<'a> {
        config: &'a CalculatorConfig,
        rate: RateQuote,
    }

    print_json(&DefaultsOutput {
        config,
        rate: config.rate_quote(&config.defaults),
    })
}

fn run(cli: Cli) -> Result<(), ConfigError> {
    let config = CalculatorConfig::load_or_default(cli.config.as_deref())?;

    match &cli.command {
        Commands::Compute { params } => cmd_compute(&config, params, cli.format),
        Commands::Summary { params } => cmd_summary(&config, params, cli.format),
        Commands::Shock { params, shocks } => cmd_shock(&config, params, shocks, cli.format),
        Commands::Defaults => cmd_defaults(&config),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
