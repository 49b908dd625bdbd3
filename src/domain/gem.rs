//! Point-in-time GEM evaluation through a [`DataPort`].
//!
//! Only observations dated before the first day of the decision month are
//! used, so a decision on 2025-09-15 sees data through August.

use crate::domain::calendar::{period_start, required_start_date};
use crate::domain::config::GemConfig;
use crate::domain::decision::{Decision, decide};
use crate::domain::error::GemError;
use crate::domain::horizon::Horizon;
use crate::domain::momentum::momentum;
use crate::domain::price_series::PriceSeries;
use crate::domain::role::RoleSet;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub decision_date: NaiveDate,
    /// Exclusive upper bound on observation dates.
    pub cutoff: NaiveDate,
    pub horizon: Horizon,
    pub domestic_momentum: f64,
    pub international_momentum: f64,
    pub instrument: String,
    pub decision: Decision,
}

pub struct GemEvaluator<'a> {
    data: &'a dyn DataPort,
    config: &'a GemConfig,
}

impl<'a> GemEvaluator<'a> {
    pub fn new(data: &'a dyn DataPort, config: &'a GemConfig) -> Self {
        Self { data, config }
    }

    pub fn evaluate(
        &self,
        instruments: &RoleSet<String>,
        decision_date: NaiveDate,
        label: &str,
    ) -> Result<Evaluation, GemError> {
        let horizon = self.config.horizons.get(label)?;
        let (domestic, international) =
            self.fetch_risk_series(instruments, decision_date, horizon.periods)?;
        self.evaluate_horizon(instruments, decision_date, horizon, &domestic, &international)
    }

    /// Every configured horizon, fetching each series once.
    pub fn evaluate_all(
        &self,
        instruments: &RoleSet<String>,
        decision_date: NaiveDate,
    ) -> Result<BTreeMap<String, Evaluation>, GemError> {
        let lookback = self.config.horizons.max_periods();
        let (domestic, international) =
            self.fetch_risk_series(instruments, decision_date, lookback)?;

        self.config
            .horizons
            .iter()
            .map(|horizon| {
                let evaluation = self.evaluate_horizon(
                    instruments,
                    decision_date,
                    horizon,
                    &domestic,
                    &international,
                )?;
                Ok((horizon.label.clone(), evaluation))
            })
            .collect()
    }

    fn fetch_risk_series(
        &self,
        instruments: &RoleSet<String>,
        decision_date: NaiveDate,
        lookback: usize,
    ) -> Result<(PriceSeries, PriceSeries), GemError> {
        let cutoff = period_start(decision_date);
        let start = required_start_date(cutoff, lookback);
        debug!(%decision_date, %start, %cutoff, "fetching risk asset series");

        let domestic = self
            .data
            .fetch_monthly_series(&instruments.domestic_equity, start)?
            .before(cutoff);
        let international = self
            .data
            .fetch_monthly_series(&instruments.international_equity, start)?
            .before(cutoff);
        Ok((domestic, international))
    }

    fn evaluate_horizon(
        &self,
        instruments: &RoleSet<String>,
        decision_date: NaiveDate,
        horizon: &Horizon,
        domestic: &PriceSeries,
        international: &PriceSeries,
    ) -> Result<Evaluation, GemError> {
        let domestic_momentum = momentum(domestic, horizon.periods, self.config.precision)?;
        let international_momentum =
            momentum(international, horizon.periods, self.config.precision)?;
        let decision = decide(domestic_momentum, international_momentum);

        Ok(Evaluation {
            decision_date,
            cutoff: period_start(decision_date),
            horizon: horizon.clone(),
            domestic_momentum,
            international_momentum,
            instrument: instruments.instrument(decision.role).to_string(),
            decision,
        })
    }
}
