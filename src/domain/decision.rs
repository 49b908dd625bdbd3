//! GEM decision rule: relative strength, then absolute momentum filter.
//!
//! 1. Candidate = the risk asset with the strictly higher momentum; ties go to
//!    the domestic asset.
//! 2. Candidate momentum > 0 keeps the candidate (risk on); otherwise the
//!    defensive asset is held (risk off) and no momentum is reported.

use crate::domain::error::GemError;
use crate::domain::horizon::HorizonSet;
use crate::domain::momentum::HorizonMomenta;
use crate::domain::role::AssetRole;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    RiskOn,
    RiskOff,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::RiskOn => f.write_str("risk_on"),
            Regime::RiskOff => f.write_str("risk_off"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub role: AssetRole,
    /// Momentum of the selected risk asset; `None` when the defensive asset
    /// was selected by the absolute filter.
    pub momentum: Option<f64>,
    pub regime: Regime,
}

fn select_candidate(domestic: f64, international: f64) -> (AssetRole, f64) {
    if international > domestic {
        (AssetRole::InternationalEquity, international)
    } else {
        (AssetRole::DomesticEquity, domestic)
    }
}

fn apply_absolute_filter(candidate: AssetRole, momentum: f64) -> Decision {
    if momentum > 0.0 {
        Decision {
            role: candidate,
            momentum: Some(momentum),
            regime: Regime::RiskOn,
        }
    } else {
        Decision {
            role: AssetRole::Defensive,
            momentum: None,
            regime: Regime::RiskOff,
        }
    }
}

/// Expects finite momenta, as produced by [`momentum`](crate::domain::momentum::momentum).
/// A non-finite input on either side cannot rank the risk assets, so the
/// defensive asset is held.
pub fn decide(domestic: f64, international: f64) -> Decision {
    if !(domestic.is_finite() && international.is_finite()) {
        return Decision {
            role: AssetRole::Defensive,
            momentum: None,
            regime: Regime::RiskOff,
        };
    }
    let (candidate, momentum) = select_candidate(domestic, international);
    apply_absolute_filter(candidate, momentum)
}

/// Decision for one configured horizon label.
pub fn decide_for(
    label: &str,
    domestic: &HorizonMomenta,
    international: &HorizonMomenta,
    horizons: &HorizonSet,
) -> Result<Decision, GemError> {
    let horizon = horizons.get(label)?;
    let lookup = |momenta: &HorizonMomenta, role: AssetRole| {
        momenta
            .get(&horizon.label)
            .copied()
            .ok_or_else(|| GemError::InvalidPeriod {
                period: horizon.label.clone(),
                reason: format!("no {role} momentum for this horizon"),
            })
    };
    Ok(decide(
        lookup(domestic, AssetRole::DomesticEquity)?,
        lookup(international, AssetRole::InternationalEquity)?,
    ))
}

/// Decisions for every configured horizon, keyed by label.
pub fn decide_all(
    domestic: &HorizonMomenta,
    international: &HorizonMomenta,
    horizons: &HorizonSet,
) -> Result<BTreeMap<String, Decision>, GemError> {
    horizons
        .labels()
        .map(|label| {
            Ok((
                label.to_string(),
                decide_for(label, domestic, international, horizons)?,
            ))
        })
        .collect()
}
