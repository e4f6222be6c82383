//! The signed demand matrix.
//!
//! Rows are customer sites, columns are consecutive days labelled by ISO
//! date. A negative entry is a count of drop-offs required at the site that
//! day, a positive entry a count of pickups, zero no demand. The frame is
//! created once from input, rewritten by the demand smoother, and read-only
//! afterwards.

use crate::{PlanError, PlanResult, SiteId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Site-by-day matrix of signed demand counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandFrame {
    site_ids: Vec<SiteId>,
    dates: Vec<NaiveDate>,
    /// Row-major: `values[row][day]`.
    values: Vec<Vec<i64>>,
}

impl DemandFrame {
    pub fn new(site_ids: Vec<SiteId>, dates: Vec<NaiveDate>, values: Vec<Vec<i64>>) -> PlanResult<Self> {
        if values.len() != site_ids.len() {
            return Err(PlanError::Validation(format!(
                "demand frame has {} rows but {} site ids",
                values.len(),
                site_ids.len()
            )));
        }
        for (row, cells) in values.iter().enumerate() {
            if cells.len() != dates.len() {
                return Err(PlanError::Validation(format!(
                    "demand row {} has {} cells but {} date columns",
                    row,
                    cells.len(),
                    dates.len()
                )));
            }
        }
        Ok(Self {
            site_ids,
            dates,
            values,
        })
    }

    pub fn num_sites(&self) -> usize {
        self.site_ids.len()
    }

    pub fn num_days(&self) -> usize {
        self.dates.len()
    }

    pub fn site_ids(&self) -> &[SiteId] {
        &self.site_ids
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn get(&self, row: usize, day: usize) -> i64 {
        self.values[row][day]
    }

    pub fn set(&mut self, row: usize, day: usize, value: i64) {
        self.values[row][day] = value;
    }

    /// The sites with non-zero demand on a day, in row order, with their
    /// signed demands.
    pub fn active_on_day(&self, day: usize) -> Vec<(SiteId, i64)> {
        self.site_ids
            .iter()
            .zip(self.values.iter())
            .filter(|(_, row)| row[day] != 0)
            .map(|(id, row)| (*id, row[day]))
            .collect()
    }

    /// Restrict the frame to the inclusive date range [start, end].
    ///
    /// Both bounds must be existing columns; a missing bound is a validation
    /// error (fail fast on malformed input).
    pub fn restrict(&self, start: NaiveDate, end: NaiveDate) -> PlanResult<DemandFrame> {
        let start_index = self
            .dates
            .iter()
            .position(|d| *d == start)
            .ok_or_else(|| PlanError::Validation(format!("start date {start} is not a demand column")))?;
        let end_index = self
            .dates
            .iter()
            .position(|d| *d == end)
            .ok_or_else(|| PlanError::Validation(format!("end date {end} is not a demand column")))?;
        if end_index < start_index {
            return Err(PlanError::Validation(format!(
                "end date {end} precedes start date {start}"
            )));
        }

        let dates = self.dates[start_index..=end_index].to_vec();
        let values = self
            .values
            .iter()
            .map(|row| row[start_index..=end_index].to_vec())
            .collect();
        DemandFrame::new(self.site_ids.clone(), dates, values)
    }
}
