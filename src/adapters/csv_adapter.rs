//! CSV file data adapter.
//!
//! Reads `<base>/<INSTRUMENT>.csv` with a header row containing `date` and
//! `close` columns (an `adj_close` column is preferred when present). Files are
//! expected to already hold one row per month.

use crate::domain::error::GemError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, instrument: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", instrument))
    }
}

fn column_index(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|name| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    })
}

fn parse_price(raw: &str, line: u64) -> Result<f64, GemError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse().map_err(|e| GemError::Data {
        reason: format!("invalid price '{}' on line {}: {}", raw, line, e),
    })
}

impl DataPort for CsvAdapter {
    fn fetch_monthly_series(
        &self,
        instrument: &str,
        start_date: NaiveDate,
    ) -> Result<PriceSeries, GemError> {
        let path = self.csv_path(instrument);
        let content = fs::read_to_string(&path).map_err(|e| GemError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| GemError::Data {
                reason: format!("CSV header error in {}: {}", path.display(), e),
            })?
            .clone();

        let date_col = column_index(&headers, &["date"]).ok_or_else(|| GemError::Data {
            reason: format!("missing date column in {}", path.display()),
        })?;
        let price_col = column_index(&headers, &["adj_close", "adj close", "close"])
            .ok_or_else(|| GemError::Data {
                reason: format!("missing close column in {}", path.display()),
            })?;

        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| GemError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let date_str = record.get(date_col).ok_or_else(|| GemError::Data {
                reason: format!("missing date on line {}", line),
            })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                GemError::Data {
                    reason: format!("invalid date format on line {}: {}", line, e),
                }
            })?;

            if date < start_date {
                continue;
            }

            let price = parse_price(record.get(price_col).unwrap_or(""), line)?;
            points.push(PricePoint::new(date, price));
        }

        points.sort_by_key(|p| p.date);
        PriceSeries::new(instrument, points)
    }
}
