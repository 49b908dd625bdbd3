//! Compounding portfolio value and equity tracking for one horizon.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodReturn {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub value: f64,
    pub equity_curve: Vec<EquityPoint>,
    pub period_returns: Vec<PeriodReturn>,
}

impl Portfolio {
    /// Starts at 1.0 with empty curves.
    pub fn new() -> Self {
        Portfolio {
            value: 1.0,
            equity_curve: Vec::new(),
            period_returns: Vec::new(),
        }
    }

    /// Compound by (1 + period_return) and record both series.
    pub fn apply_return(&mut self, date: NaiveDate, period_return: f64) {
        self.value *= 1.0 + period_return;
        self.equity_curve.push(EquityPoint {
            date,
            equity: self.value,
        });
        self.period_returns.push(PeriodReturn {
            date,
            value: period_return,
        });
    }

    pub fn return_values(&self) -> Vec<f64> {
        self.period_returns.iter().map(|r| r.value).collect()
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new()
    }
}
