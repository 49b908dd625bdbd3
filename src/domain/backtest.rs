//! Month-by-month GEM backtest.
//!
//! For each decision date (the domestic series' dates from `start_date` on),
//! every role's series is cut to observations at or before that date. Each
//! horizon then picks a role with the GEM rule and earns that role's latest
//! period return, compounded from 1.0.

use crate::domain::config::{FailureMode, GemConfig};
use crate::domain::decision::{Decision, decide};
use crate::domain::error::GemError;
use crate::domain::horizon::Horizon;
use crate::domain::metrics::Statistics;
use crate::domain::momentum::momentum;
use crate::domain::portfolio::{EquityPoint, PeriodReturn, Portfolio};
use crate::domain::price_series::PriceSeries;
use crate::domain::role::{AssetRole, RoleSet};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, warn};

/// One horizon's decision on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDecision {
    pub date: NaiveDate,
    pub instrument: String,
    pub decision: Decision,
    pub period_return: f64,
}

/// A (date, horizon) step dropped under [`FailureMode::SkipAndAnnotate`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedStep {
    pub date: NaiveDate,
    pub horizon: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HorizonResult {
    pub horizon: Horizon,
    pub equity_curve: Vec<EquityPoint>,
    pub period_returns: Vec<PeriodReturn>,
    pub statistics: Statistics,
    pub decisions: Vec<StepDecision>,
}

impl HorizonResult {
    pub fn final_equity(&self) -> Option<f64> {
        self.equity_curve.last().map(|p| p.equity)
    }

    pub fn final_decision(&self) -> Option<&StepDecision> {
        self.decisions.last()
    }

    /// Number of times the held instrument changed between consecutive steps.
    pub fn switch_count(&self) -> usize {
        self.decisions
            .windows(2)
            .filter(|w| w[0].instrument != w[1].instrument)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub start_date: NaiveDate,
    pub horizons: Vec<HorizonResult>,
    pub instruments: RoleSet<String>,
    pub skipped: Vec<SkippedStep>,
}

impl BacktestResult {
    pub fn horizon(&self, label: &str) -> Result<&HorizonResult, GemError> {
        self.horizons
            .iter()
            .find(|h| h.horizon.label == label)
            .ok_or_else(|| GemError::InvalidPeriod {
                period: label.to_string(),
                reason: "not a configured horizon".into(),
            })
    }

    /// Instrument held at the last step of each horizon.
    pub fn final_decisions(&self) -> Vec<(&str, Option<&str>)> {
        self.horizons
            .iter()
            .map(|h| {
                (
                    h.horizon.label.as_str(),
                    h.final_decision().map(|d| d.instrument.as_str()),
                )
            })
            .collect()
    }
}

/// Backtest over a role-keyed map; the map must hold exactly the three roles.
pub fn run_backtest(
    series: HashMap<AssetRole, PriceSeries>,
    start_date: NaiveDate,
    config: &GemConfig,
) -> Result<BacktestResult, GemError> {
    let series = RoleSet::from_map(series)?;
    run_role_backtest(&series, start_date, config)
}

pub fn run_role_backtest(
    series: &RoleSet<PriceSeries>,
    start_date: NaiveDate,
    config: &GemConfig,
) -> Result<BacktestResult, GemError> {
    let instruments = series.map(|_, s| s.instrument().to_string());
    let dates: Vec<NaiveDate> = series
        .domestic_equity
        .dates()
        .filter(|d| *d >= start_date)
        .collect();

    let mut books: Vec<(Portfolio, Vec<StepDecision>)> = config
        .horizons
        .iter()
        .map(|_| (Portfolio::new(), Vec::new()))
        .collect();
    let mut skipped = Vec::new();

    for &date in &dates {
        let view = series.map(|_, s| s.through(date));

        for (horizon, (portfolio, decisions)) in config.horizons.iter().zip(books.iter_mut()) {
            match evaluate_step(&view, horizon, config.precision) {
                Ok((decision, period_return)) => {
                    portfolio.apply_return(date, period_return);
                    let instrument = instruments.instrument(decision.role).to_string();
                    debug!(
                        %date,
                        horizon = %horizon.label,
                        %instrument,
                        regime = %decision.regime,
                        period_return,
                        equity = portfolio.value,
                        "backtest step"
                    );
                    decisions.push(StepDecision {
                        date,
                        instrument,
                        decision,
                        period_return,
                    });
                }
                Err(e) => match config.failure_mode {
                    FailureMode::Abort => return Err(e),
                    FailureMode::SkipAndAnnotate => {
                        warn!(%date, horizon = %horizon.label, error = %e, "skipping backtest step");
                        skipped.push(SkippedStep {
                            date,
                            horizon: horizon.label.clone(),
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }
    }

    let horizons = config
        .horizons
        .iter()
        .zip(books)
        .map(|(horizon, (portfolio, decisions))| {
            let statistics = Statistics::compute(
                &portfolio.equity_curve,
                &portfolio.return_values(),
                config.periods_per_year,
            );
            HorizonResult {
                horizon: horizon.clone(),
                equity_curve: portfolio.equity_curve,
                period_returns: portfolio.period_returns,
                statistics,
                decisions,
            }
        })
        .collect();

    Ok(BacktestResult {
        start_date,
        horizons,
        instruments,
        skipped,
    })
}

fn evaluate_step(
    view: &RoleSet<PriceSeries>,
    horizon: &Horizon,
    precision: u32,
) -> Result<(Decision, f64), GemError> {
    let domestic = momentum(&view.domestic_equity, horizon.periods, precision)?;
    let international = momentum(&view.international_equity, horizon.periods, precision)?;
    let decision = decide(domestic, international);

    let held = view.get(decision.role);
    let period_return = held.last_period_return();
    if !period_return.is_finite() {
        return Err(GemError::UndefinedResult {
            instrument: held.instrument().to_string(),
            lookback: 1,
        });
    }

    Ok((decision, period_return))
}
