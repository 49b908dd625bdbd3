//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{BacktestResult, run_role_backtest};
use crate::domain::calendar::required_start_date;
use crate::domain::config::{FailureMode, GemConfig};
use crate::domain::config_validation::{
    parse_date, read_periods_per_year, read_precision, read_skip_failed_steps,
    validate_gem_config,
};
use crate::domain::error::GemError;
use crate::domain::gem::{Evaluation, GemEvaluator};
use crate::domain::horizon::HorizonSet;
use crate::domain::role::{AssetRole, RoleSet};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "gemtrader", about = "Global Equity Momentum signal and backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate the GEM decision for a date
    Decide {
        #[arg(short, long)]
        config: PathBuf,
        /// Decision date (YYYY-MM-DD); data from this month onward is ignored
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Evaluate a single configured horizon
        #[arg(long)]
        horizon: Option<String>,
    },
    /// Run a historical backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        start: Option<NaiveDate>,
        /// Skip and record failing steps instead of aborting
        #[arg(long)]
        skip_failed: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Decide {
            config,
            date,
            horizon,
        } => run_decide(&config, date, horizon.as_deref()),
        Command::Backtest {
            config,
            start,
            skip_failed,
        } => run_backtest(&config, start, skip_failed),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn load_validated(path: &PathBuf) -> Result<(FileConfigAdapter, GemConfig), GemError> {
    info!(path = %path.display(), "loading config");
    let adapter = FileConfigAdapter::from_file(path)?;
    validate_gem_config(&adapter)?;
    let config = build_gem_config(&adapter)?;
    Ok((adapter, config))
}

fn data_adapter(adapter: &dyn ConfigPort) -> Result<CsvAdapter, GemError> {
    let path = adapter
        .get_string("data", "path")
        .ok_or_else(|| GemError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })?;
    Ok(CsvAdapter::new(PathBuf::from(path)))
}

fn run_decide(
    config_path: &PathBuf,
    date_override: Option<NaiveDate>,
    horizon: Option<&str>,
) -> Result<(), GemError> {
    let (adapter, config) = load_validated(config_path)?;
    let decision_date = resolve_date(date_override, &adapter, "decision", "date")?;
    let data_port = data_adapter(&adapter)?;

    info!(%decision_date, "evaluating GEM decision");
    let evaluations = run_decide_pipeline(&data_port, &config, decision_date, horizon)?;
    print!("{}", format_evaluations(&evaluations));
    Ok(())
}

fn run_backtest(
    config_path: &PathBuf,
    start_override: Option<NaiveDate>,
    skip_failed: bool,
) -> Result<(), GemError> {
    let (adapter, mut config) = load_validated(config_path)?;
    if skip_failed {
        config.failure_mode = FailureMode::SkipAndAnnotate;
    }
    let start_date = resolve_date(start_override, &adapter, "backtest", "start_date")?;
    let data_port = data_adapter(&adapter)?;

    info!(%start_date, horizons = config.horizons.len(), "running backtest");
    let result = run_backtest_pipeline(&data_port, &config, start_date)?;
    print!("{}", format_backtest(&result));
    Ok(())
}

fn run_validate(config_path: &PathBuf) -> Result<(), GemError> {
    let (_, config) = load_validated(config_path)?;
    let labels: Vec<&str> = config.horizons.labels().collect();
    println!(
        "Configuration OK: {} / {} / {}, horizons {}",
        config.instruments.domestic_equity,
        config.instruments.international_equity,
        config.instruments.defensive,
        labels.join(", ")
    );
    Ok(())
}

pub fn build_gem_config(adapter: &dyn ConfigPort) -> Result<GemConfig, GemError> {
    let horizons = match adapter.get_string("momentum", "horizons") {
        Some(spec) => HorizonSet::parse(&spec)?,
        None => HorizonSet::default(),
    };

    let failure_mode = if read_skip_failed_steps(adapter)? {
        FailureMode::SkipAndAnnotate
    } else {
        FailureMode::Abort
    };

    Ok(GemConfig {
        horizons,
        precision: read_precision(adapter)?,
        periods_per_year: read_periods_per_year(adapter)?,
        instruments: resolve_instruments(adapter),
        failure_mode,
    })
}

/// Configured instruments, falling back to the defaults role by role.
pub fn resolve_instruments(adapter: &dyn ConfigPort) -> RoleSet<String> {
    RoleSet::default_instruments().map(|role: AssetRole, default: &String| {
        adapter
            .get_string("instruments", role.as_str())
            .unwrap_or_else(|| default.clone())
    })
}

/// The CLI value wins over the config file; one of the two is required.
pub fn resolve_date(
    cli_value: Option<NaiveDate>,
    adapter: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<NaiveDate, GemError> {
    if let Some(date) = cli_value {
        return Ok(date);
    }
    let value = adapter
        .get_string(section, key)
        .ok_or_else(|| GemError::ConfigMissing {
            section: section.into(),
            key: key.into(),
        })?;
    parse_date(&value, section, key)
}

pub fn run_decide_pipeline(
    data_port: &dyn DataPort,
    config: &GemConfig,
    decision_date: NaiveDate,
    horizon: Option<&str>,
) -> Result<Vec<Evaluation>, GemError> {
    let evaluator = GemEvaluator::new(data_port, config);
    match horizon {
        Some(label) => Ok(vec![evaluator.evaluate(
            &config.instruments,
            decision_date,
            label,
        )?]),
        None => {
            let mut all = evaluator.evaluate_all(&config.instruments, decision_date)?;
            // Report in configured order rather than label order.
            Ok(config
                .horizons
                .labels()
                .filter_map(|label| all.remove(label))
                .collect())
        }
    }
}

pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    config: &GemConfig,
    start_date: NaiveDate,
) -> Result<BacktestResult, GemError> {
    let fetch_from = required_start_date(start_date, config.horizons.max_periods());
    let series = data_port.fetch_role_series(&config.instruments, fetch_from)?;
    for (role, s) in series.iter() {
        info!(%role, instrument = s.instrument(), observations = s.len(), "loaded series");
    }
    run_role_backtest(&series, start_date, config)
}

fn fmt_pct(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}%", value * 100.0)
    }
}

fn fmt_ratio(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}", value)
    }
}

pub fn format_evaluations(evaluations: &[Evaluation]) -> String {
    let mut out = String::new();
    if let Some(first) = evaluations.first() {
        let _ = writeln!(
            out,
            "GEM decision for {} (data before {})",
            first.decision_date, first.cutoff
        );
    }
    for e in evaluations {
        let momentum = e
            .decision
            .momentum
            .map(fmt_pct)
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  {:<5} hold {:<6} {:<8} momentum {:>9}  (domestic {}, international {})",
            e.horizon.label,
            e.instrument,
            e.decision.regime,
            momentum,
            fmt_pct(e.domestic_momentum),
            fmt_pct(e.international_momentum),
        );
    }
    out
}

pub fn format_backtest(result: &BacktestResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "GEM backtest from {}: {} / {} / {}",
        result.start_date,
        result.instruments.domestic_equity,
        result.instruments.international_equity,
        result.instruments.defensive
    );
    let _ = writeln!(
        out,
        "  {:<5} {:>8} {:>10} {:>10} {:>10} {:>7} {:>8}  {}",
        "", "periods", "CAGR", "max DD", "vol", "ratio", "switches", "holding"
    );
    for h in &result.horizons {
        let s = &h.statistics;
        let _ = writeln!(
            out,
            "  {:<5} {:>8} {:>10} {:>10} {:>10} {:>7} {:>8}  {}",
            h.horizon.label,
            h.equity_curve.len(),
            fmt_pct(s.annualized_return),
            fmt_pct(s.max_drawdown),
            fmt_pct(s.annualized_volatility),
            fmt_ratio(s.risk_adjusted_return),
            h.switch_count(),
            h.final_decision().map(|d| d.instrument.as_str()).unwrap_or("-"),
        );
    }
    if !result.skipped.is_empty() {
        let _ = writeln!(out, "  skipped {} step(s):", result.skipped.len());
        for s in &result.skipped {
            let _ = writeln!(out, "    {} {}: {}", s.date, s.horizon, s.reason);
        }
    }
    out
}
