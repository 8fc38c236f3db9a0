//! Invoice Engine - Command Line Binary
//!
//! # Usage
//!
//! ```bash
//! # Totals for an invoice document
//! invoice-engine totals invoice.json
//!
//! # Same invoice re-priced into USD from its cached quotes. The binary has
//! # no live rate provider, so a pair the quotes cannot resolve is reported
//! # with origin "unavailable" and the invoice stays in its own currency.
//! invoice-engine totals invoice.json --to USD
//!
//! # Convert an amount with a quote file
//! invoice-engine convert --amount 100 --from USD --to EUR --rates rates.json
//!
//! # Evaluate a schedule and preview the next six occurrences
//! invoice-engine schedule schedule.json --preview 6 --base-number INV-0000
//!
//! # Next invoice number
//! invoice-engine next-number INV-0041
//! ```
//!
//! # Environment Variables
//!
//! * `ENGINE_DEFAULT_CURRENCY` - Currency for documents without one (default: INR)
//! * `ENGINE_RATE_MAX_AGE_SECS` - Cached rate freshness window (default: 3600)
//! * `ENGINE_ROUND_OFF` - `whole_unit` or `currency_precision` (default: whole_unit)
//! * `ENGINE_TIMEZONE` - IANA timezone deciding "today" (default: UTC)
//! * `ENGINE_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `ENGINE_LOG_JSON` - Emit JSON log lines (default: false)

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::{Currency, ExchangeRate, OfflineRateSource};
use domain_recurring::RecurringSchedule;
use interface_cli::config::EngineConfig;
use interface_cli::dto::InvoiceDocument;
use interface_cli::error::CliResult;
use interface_cli::handlers::{convert, numbering, schedule, totals};
use interface_cli::read_json;

#[derive(Parser)]
#[command(name = "invoice-engine")]
#[command(about = "Invoice totals, currency conversion and recurring schedules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute totals for a JSON invoice document
    Totals {
        /// Invoice document
        file: PathBuf,

        /// Re-price the invoice into this currency first, using only the
        /// document's cached `rates` (no live rate provider is configured)
        #[arg(long)]
        to: Option<Currency>,
    },

    /// Convert an amount between currencies
    Convert {
        #[arg(long)]
        amount: Decimal,

        #[arg(long)]
        from: Currency,

        #[arg(long)]
        to: Currency,

        /// JSON array of exchange rate quotes
        #[arg(long)]
        rates: Option<PathBuf>,
    },

    /// Evaluate a JSON recurring schedule
    Schedule {
        /// Schedule document
        file: PathBuf,

        /// Number of upcoming occurrences to list
        #[arg(long, default_value_t = 0)]
        preview: usize,

        /// Base invoice number; plans the next generation when given
        #[arg(long)]
        base_number: Option<String>,

        /// Evaluate as of this date instead of today
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Derive the next invoice number
    NextNumber {
        base: String,

        #[arg(long, default_value_t = 1)]
        increment: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = EngineConfig::from_env().unwrap_or_else(|error| {
        eprintln!("Ignoring invalid ENGINE_* configuration: {}", error);
        EngineConfig::default()
    });
    init_tracing(&config);

    let cli = Cli::parse();
    if let Err(error) = run(cli.command, &config).await {
        tracing::error!(kind = error.kind(), %error, "Command failed");
        return Err(error.into());
    }
    Ok(())
}

async fn run(command: Commands, config: &EngineConfig) -> CliResult<()> {
    let now = Utc::now();

    match command {
        Commands::Totals { file, to } => {
            let document: InvoiceDocument = read_json(&file)?;
            let response =
                totals::compute_invoice(document, to, config, &OfflineRateSource, now).await?;
            print_json(&response)
        }
        Commands::Convert {
            amount,
            from,
            to,
            rates,
        } => {
            let rates: Vec<ExchangeRate> = match rates {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            let response = convert::convert_amount(amount, from, to, &rates, config, now)?;
            print_json(&response)
        }
        Commands::Schedule {
            file,
            preview,
            base_number,
            today,
        } => {
            let stored: RecurringSchedule = read_json(&file)?;
            let today = today.unwrap_or_else(|| config.timezone.today(now));
            let report =
                schedule::evaluate_schedule(&stored, today, preview, base_number.as_deref())?;
            print_json(&report)
        }
        Commands::NextNumber { base, increment } => {
            let response = numbering::next_invoice_number(&base, increment)?;
            print_json(&response)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so stdout carries only the JSON report.
fn init_tracing(config: &EngineConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
