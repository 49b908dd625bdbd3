//! Trailing momentum over a fixed number of observations.
//!
//! momentum(L) = P[last] / P[last - L] - 1, rounded to the configured precision.
//! Requires at least L + 1 observations.

use crate::domain::error::GemError;
use crate::domain::horizon::HorizonSet;
use crate::domain::price_series::PriceSeries;
use std::collections::BTreeMap;

/// Momentum values keyed by horizon label.
pub type HorizonMomenta = BTreeMap<String, f64>;

/// Round to `precision` decimal places.
pub fn quantize(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

pub fn momentum(series: &PriceSeries, lookback: usize, precision: u32) -> Result<f64, GemError> {
    if lookback == 0 {
        return Err(GemError::InvalidPeriod {
            period: lookback.to_string(),
            reason: "lookback must be at least one period".into(),
        });
    }

    let points = series.points();
    if points.len() < lookback + 1 {
        return Err(GemError::InsufficientData {
            instrument: series.instrument().to_string(),
            observations: points.len(),
            minimum: lookback + 1,
        });
    }

    let current = points[points.len() - 1].price;
    let past = points[points.len() - 1 - lookback].price;
    let value = current / past - 1.0;

    if !value.is_finite() {
        return Err(GemError::UndefinedResult {
            instrument: series.instrument().to_string(),
            lookback,
        });
    }

    Ok(quantize(value, precision))
}

/// Momentum for one configured horizon label.
pub fn momentum_for(
    series: &PriceSeries,
    label: &str,
    horizons: &HorizonSet,
    precision: u32,
) -> Result<f64, GemError> {
    let horizon = horizons.get(label)?;
    momentum(series, horizon.periods, precision)
}

/// Momentum for every configured horizon. The first failing horizon aborts
/// the batch.
pub fn momentum_all(
    series: &PriceSeries,
    horizons: &HorizonSet,
    precision: u32,
) -> Result<HorizonMomenta, GemError> {
    horizons
        .iter()
        .map(|h| Ok((h.label.clone(), momentum(series, h.periods, precision)?)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    First,
    Second,
    Tie,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub first_momentum: f64,
    pub second_momentum: f64,
    pub winner: Winner,
}

/// Head-to-head momentum comparison of two series at one lookback.
pub fn compare_assets(
    first: &PriceSeries,
    second: &PriceSeries,
    lookback: usize,
    precision: u32,
) -> Result<Comparison, GemError> {
    let first_momentum = momentum(first, lookback, precision)?;
    let second_momentum = momentum(second, lookback, precision)?;

    let winner = if first_momentum > second_momentum {
        Winner::First
    } else if second_momentum > first_momentum {
        Winner::Second
    } else {
        Winner::Tie
    };

    Ok(Comparison {
        first_momentum,
        second_momentum,
        winner,
    })
}
