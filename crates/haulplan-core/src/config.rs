//! Fleet operating parameters shared by every component.

use crate::{PlanError, PlanResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed planning parameters for a region.
///
/// All durations are in minutes and all speeds in miles per minute, matching
/// the units of the travel matrix and the shift-length constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Average driving speed (miles per minute).
    pub travel_rate: f64,
    /// Length of a working shift (minutes).
    pub day_length: i64,
    /// Time to load or unload one equipment set (minutes).
    pub handle: i64,
    /// Largest fleet the driver will try on any day.
    pub fleet_upper_bound: usize,
    /// Calendar slack (days) a demand event may slide within.
    pub window: usize,
    /// Candidate smoothing period lengths, in days.
    pub periods: Vec<usize>,
    /// First day of the planning horizon.
    pub start_date: NaiveDate,
    /// Last day of the planning horizon (inclusive).
    pub end_date: NaiveDate,
}

impl PlanConfig {
    /// Check that the parameters can drive a solve at all.
    pub fn validate(&self) -> PlanResult<()> {
        if self.travel_rate <= 0.0 {
            return Err(PlanError::Config("travel rate must be positive".into()));
        }
        if self.day_length <= 0 {
            return Err(PlanError::Config("day length must be positive".into()));
        }
        if self.handle < 0 {
            return Err(PlanError::Config("handle time cannot be negative".into()));
        }
        if self.handle >= self.day_length {
            return Err(PlanError::Config(
                "handle time must be shorter than the day length".into(),
            ));
        }
        if self.window == 0 {
            return Err(PlanError::Config("window must be at least one day".into()));
        }
        if self.periods.is_empty() || self.periods.contains(&0) {
            return Err(PlanError::Config(
                "at least one non-zero smoothing period is required".into(),
            ));
        }
        if self.end_date < self.start_date {
            return Err(PlanError::Config(format!(
                "end date {} precedes start date {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }

    /// Furthest one-way distance a single hauler can cover in one shift.
    pub fn max_reach_miles(&self) -> i64 {
        ((self.day_length - self.handle) as f64 * self.travel_rate / 2.0) as i64
    }
}
