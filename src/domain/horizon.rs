//! Momentum lookback horizons.

use crate::domain::error::GemError;
use std::fmt;

/// A labelled lookback, e.g. `12m` = 12 observations back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Horizon {
    pub label: String,
    pub periods: usize,
}

impl Horizon {
    pub fn new(label: impl Into<String>, periods: usize) -> Self {
        Self {
            label: label.into(),
            periods,
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Non-empty, ordered set of horizons with unique labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HorizonSet {
    horizons: Vec<Horizon>,
}

impl HorizonSet {
    pub fn new(horizons: Vec<Horizon>) -> Result<Self, GemError> {
        if horizons.is_empty() {
            return Err(GemError::InvalidPeriod {
                period: String::new(),
                reason: "at least one horizon is required".into(),
            });
        }
        for (i, h) in horizons.iter().enumerate() {
            if h.label.trim().is_empty() {
                return Err(GemError::InvalidPeriod {
                    period: h.label.clone(),
                    reason: "horizon label must not be empty".into(),
                });
            }
            if h.periods == 0 {
                return Err(GemError::InvalidPeriod {
                    period: h.label.clone(),
                    reason: "lookback must be at least one period".into(),
                });
            }
            if horizons[..i].iter().any(|prev| prev.label == h.label) {
                return Err(GemError::InvalidPeriod {
                    period: h.label.clone(),
                    reason: "duplicate horizon label".into(),
                });
            }
        }
        Ok(Self { horizons })
    }

    /// Parse `"3m:3, 6m:6, 12m:12"`.
    pub fn parse(spec: &str) -> Result<Self, GemError> {
        let mut horizons = Vec::new();
        for entry in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (label, periods) = entry.split_once(':').ok_or_else(|| GemError::InvalidPeriod {
                period: entry.to_string(),
                reason: "expected LABEL:PERIODS".into(),
            })?;
            let periods: usize =
                periods
                    .trim()
                    .parse()
                    .map_err(|_| GemError::InvalidPeriod {
                        period: entry.to_string(),
                        reason: "period count must be a positive integer".into(),
                    })?;
            horizons.push(Horizon::new(label.trim(), periods));
        }
        Self::new(horizons)
    }

    pub fn get(&self, label: &str) -> Result<&Horizon, GemError> {
        self.horizons
            .iter()
            .find(|h| h.label == label)
            .ok_or_else(|| GemError::InvalidPeriod {
                period: label.to_string(),
                reason: "not a configured horizon".into(),
            })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Horizon> {
        self.horizons.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.horizons.iter().map(|h| h.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.horizons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.horizons.is_empty()
    }

    pub fn max_periods(&self) -> usize {
        self.horizons.iter().map(|h| h.periods).max().unwrap_or(0)
    }
}

impl Default for HorizonSet {
    fn default() -> Self {
        Self {
            horizons: vec![
                Horizon::new("3m", 3),
                Horizon::new("6m", 6),
                Horizon::new("12m", 12),
            ],
        }
    }
}

impl<'a> IntoIterator for &'a HorizonSet {
    type Item = &'a Horizon;
    type IntoIter = std::slice::Iter<'a, Horizon>;

    fn into_iter(self) -> Self::IntoIter {
        self.horizons.iter()
    }
}
