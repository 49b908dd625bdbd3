//! Explicit GEM configuration, passed to every component that needs it.

use crate::domain::horizon::HorizonSet;
use crate::domain::role::RoleSet;

pub const DEFAULT_PRECISION: u32 = 6;
pub const DEFAULT_PERIODS_PER_YEAR: f64 = 12.0;

/// How the backtest reacts to a failing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Any failing step aborts the run.
    #[default]
    Abort,
    /// The failing (date, horizon) step is skipped and recorded.
    SkipAndAnnotate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GemConfig {
    pub horizons: HorizonSet,
    /// Decimal places kept in reported momentum values.
    pub precision: u32,
    pub periods_per_year: f64,
    pub instruments: RoleSet<String>,
    pub failure_mode: FailureMode,
}

impl Default for GemConfig {
    fn default() -> Self {
        Self {
            horizons: HorizonSet::default(),
            precision: DEFAULT_PRECISION,
            periods_per_year: DEFAULT_PERIODS_PER_YEAR,
            instruments: RoleSet::default_instruments(),
            failure_mode: FailureMode::Abort,
        }
    }
}
