//! Performance statistics for a backtested equity curve.
//!
//! Degenerate inputs yield NaN statistics rather than errors.

use crate::domain::portfolio::EquityPoint;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// CAGR: final_equity ^ (periods_per_year / n) - 1
    pub annualized_return: f64,
    /// Most negative (equity / running_max - 1); 0 when the curve never falls.
    pub max_drawdown: f64,
    pub annualized_volatility: f64,
    /// annualized_return / annualized_volatility
    pub risk_adjusted_return: f64,
}

impl Statistics {
    pub fn undefined() -> Self {
        Self {
            annualized_return: f64::NAN,
            max_drawdown: f64::NAN,
            annualized_volatility: f64::NAN,
            risk_adjusted_return: f64::NAN,
        }
    }

    pub fn compute(equity_curve: &[EquityPoint], returns: &[f64], periods_per_year: f64) -> Self {
        let periods = returns.len();
        let Some(last) = equity_curve.last() else {
            return Self::undefined();
        };
        if periods == 0 {
            return Self::undefined();
        }

        let annualized_return = last.equity.powf(periods_per_year / periods as f64) - 1.0;
        let max_drawdown = compute_max_drawdown(equity_curve);
        let annualized_volatility = sample_stddev(returns) * periods_per_year.sqrt();

        let risk_adjusted_return = if annualized_volatility == 0.0 || annualized_volatility.is_nan()
        {
            f64::NAN
        } else {
            annualized_return / annualized_volatility
        };

        Self {
            annualized_return,
            max_drawdown,
            annualized_volatility,
            risk_adjusted_return,
        }
    }
}

fn compute_max_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;

    for point in equity_curve {
        peak = peak.max(point.equity);
        let dd = point.equity / peak - 1.0;
        if dd < max_dd {
            max_dd = dd;
        }
    }

    max_dd
}

/// Standard deviation with an n - 1 denominator; NaN below two samples.
fn sample_stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Months, NaiveDate};

    fn make_equity_curve(values: &[f64]) -> Vec<EquityPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| EquityPoint {
                date: start + Months::new(i as u32),
                equity: v,
            })
            .collect()
    }

    fn curve_from_returns(returns: &[f64]) -> Vec<EquityPoint> {
        let mut value = 1.0;
        let values: Vec<f64> = returns
            .iter()
            .map(|r| {
                value *= 1.0 + r;
                value
            })
            .collect();
        make_equity_curve(&values)
    }

    #[test]
    fn empty_is_all_nan() {
        let stats = Statistics::compute(&[], &[], 12.0);
        assert!(stats.annualized_return.is_nan());
        assert!(stats.max_drawdown.is_nan());
        assert!(stats.annualized_volatility.is_nan());
        assert!(stats.risk_adjusted_return.is_nan());
    }

    #[test]
    fn annualized_return_over_one_year() {
        let returns = vec![0.01; 12];
        let curve = curve_from_returns(&returns);
        let stats = Statistics::compute(&curve, &returns, 12.0);
        assert_relative_eq!(stats.annualized_return, 1.01f64.powi(12) - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn annualized_return_over_half_year() {
        let returns = vec![0.02; 6];
        let curve = curve_from_returns(&returns);
        let stats = Statistics::compute(&curve, &returns, 12.0);
        assert_relative_eq!(stats.annualized_return, 1.02f64.powi(12) - 1.0, epsilon = 1e-9);
    }

    #[test]
    fn periods_per_year_is_configurable() {
        let returns = vec![0.01; 4];
        let curve = curve_from_returns(&returns);
        let stats = Statistics::compute(&curve, &returns, 4.0);
        assert_relative_eq!(stats.annualized_return, 1.01f64.powi(4) - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn max_drawdown_from_peak() {
        let curve = make_equity_curve(&[1.0, 1.1, 0.9, 0.95, 0.8, 1.0]);
        assert_relative_eq!(compute_max_drawdown(&curve), 0.8 / 1.1 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn max_drawdown_first_point_below_one() {
        let curve = make_equity_curve(&[0.9, 0.95]);
        assert_eq!(compute_max_drawdown(&curve), 0.0);
    }

    #[test]
    fn max_drawdown_monotonic_curve_is_zero() {
        let curve = make_equity_curve(&[1.0, 1.01, 1.02, 1.05]);
        assert_eq!(compute_max_drawdown(&curve), 0.0);
    }

    #[test]
    fn flat_curve_has_zero_drawdown_and_nan_ratio() {
        let returns = vec![0.0; 5];
        let curve = curve_from_returns(&returns);
        let stats = Statistics::compute(&curve, &returns, 12.0);
        assert_eq!(stats.max_drawdown, 0.0);
        assert_eq!(stats.annualized_return, 0.0);
        assert_eq!(stats.annualized_volatility, 0.0);
        assert!(stats.risk_adjusted_return.is_nan());
    }

    #[test]
    fn volatility_uses_sample_stddev() {
        let returns = vec![0.01, -0.01, 0.03, -0.03];
        let curve = curve_from_returns(&returns);
        let stats = Statistics::compute(&curve, &returns, 12.0);

        // mean 0, sum of squares 0.002, n - 1 = 3
        let expected = (0.002f64 / 3.0).sqrt() * 12f64.sqrt();
        assert_relative_eq!(stats.annualized_volatility, expected, epsilon = 1e-12);
        assert_relative_eq!(
            stats.risk_adjusted_return,
            stats.annualized_return / expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn single_period_volatility_is_nan() {
        let returns = vec![0.05];
        let curve = curve_from_returns(&returns);
        let stats = Statistics::compute(&curve, &returns, 12.0);
        assert!(stats.annualized_return.is_finite());
        assert!(stats.annualized_volatility.is_nan());
        assert!(stats.risk_adjusted_return.is_nan());
    }
}
