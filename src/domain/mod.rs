//! Core domain types and logic.

pub mod error;
pub mod price_series;
pub mod role;
pub mod horizon;
pub mod config;
pub mod config_validation;
pub mod momentum;
pub mod decision;
pub mod calendar;
pub mod portfolio;
pub mod metrics;
pub mod backtest;
pub mod gem;
