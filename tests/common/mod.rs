#![allow(dead_code)]

use chrono::{Months, NaiveDate};
use gemtrader::domain::error::GemError;
pub use gemtrader::domain::price_series::{PricePoint, PriceSeries};
use gemtrader::ports::data_port::DataPort;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, PriceSeries>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<(String, NaiveDate)>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.data.insert(series.instrument().to_string(), series);
        self
    }

    pub fn with_error(mut self, instrument: &str, reason: &str) -> Self {
        self.errors
            .insert(instrument.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_monthly_series(
        &self,
        instrument: &str,
        start_date: NaiveDate,
    ) -> Result<PriceSeries, GemError> {
        self.requests
            .borrow_mut()
            .push((instrument.to_string(), start_date));
        if let Some(reason) = self.errors.get(instrument) {
            return Err(GemError::Data {
                reason: reason.clone(),
            });
        }
        let series = self.data.get(instrument).ok_or_else(|| GemError::Data {
            reason: format!("no data for {instrument}"),
        })?;
        let points = series
            .points()
            .iter()
            .copied()
            .filter(|p| p.date >= start_date)
            .collect();
        PriceSeries::new(instrument, points)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Month-end dates starting at `first`, one per price.
pub fn monthly_series(instrument: &str, first: NaiveDate, prices: &[f64]) -> PriceSeries {
    let points = prices
        .iter()
        .enumerate()
        .map(|(i, &p)| PricePoint::new(month_end(first, i), p))
        .collect();
    PriceSeries::new(instrument, points).unwrap()
}

pub fn month_end(first: NaiveDate, offset: usize) -> NaiveDate {
    let start_of_month = NaiveDate::from_ymd_opt(
        chrono::Datelike::year(&first),
        chrono::Datelike::month(&first),
        1,
    )
    .unwrap();
    start_of_month + Months::new(offset as u32 + 1) - chrono::Duration::days(1)
}

/// `n` prices compounding at `rate` per period from `start`.
pub fn geometric(start: f64, rate: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start * (1.0 + rate).powi(i as i32)).collect()
}
