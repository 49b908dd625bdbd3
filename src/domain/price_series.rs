//! Single-instrument price series, one observation per period.

use crate::domain::error::GemError;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Ordered (date, price) observations for one instrument.
///
/// Dates are strictly increasing. Prices may be NaN to mark a gap; momentum
/// over a window that touches a gap is reported as undefined rather than
/// silently skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    instrument: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(instrument: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, GemError> {
        let instrument = instrument.into();
        if let Some(w) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(GemError::InvalidSeries {
                instrument,
                reason: format!(
                    "dates must be strictly increasing ({} followed by {})",
                    w[0].date, w[1].date
                ),
            });
        }
        Ok(Self { instrument, points })
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// Observations at or before `date`.
    pub fn through(&self, date: NaiveDate) -> PriceSeries {
        let end = self.points.partition_point(|p| p.date <= date);
        self.prefix(end)
    }

    /// Observations strictly before `date`.
    pub fn before(&self, date: NaiveDate) -> PriceSeries {
        let end = self.points.partition_point(|p| p.date < date);
        self.prefix(end)
    }

    /// Percentage change between the last two observations, or 0 when fewer
    /// than two exist.
    pub fn last_period_return(&self) -> f64 {
        match self.points.as_slice() {
            [.., prev, curr] => curr.price / prev.price - 1.0,
            _ => 0.0,
        }
    }

    fn prefix(&self, end: usize) -> PriceSeries {
        PriceSeries {
            instrument: self.instrument.clone(),
            points: self.points[..end].to_vec(),
        }
    }
}
