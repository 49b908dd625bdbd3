//! Price data access port.

use crate::domain::error::GemError;
use crate::domain::price_series::PriceSeries;
use crate::domain::role::RoleSet;
use chrono::NaiveDate;

pub trait DataPort {
    /// Monthly, ascending, gap-free observations for `instrument` from
    /// `start_date` onward.
    fn fetch_monthly_series(
        &self,
        instrument: &str,
        start_date: NaiveDate,
    ) -> Result<PriceSeries, GemError>;

    /// Default implementation: one fetch per role, failing on the first error.
    fn fetch_role_series(
        &self,
        instruments: &RoleSet<String>,
        start_date: NaiveDate,
    ) -> Result<RoleSet<PriceSeries>, GemError> {
        Ok(RoleSet::new(
            self.fetch_monthly_series(&instruments.domestic_equity, start_date)?,
            self.fetch_monthly_series(&instruments.international_equity, start_date)?,
            self.fetch_monthly_series(&instruments.defensive, start_date)?,
        ))
    }
}
