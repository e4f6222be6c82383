//! Demand smoothing
//!
//! Levels each site's workload across adjacent days before any routing is
//! attempted. The horizon is cut into slices of `period` consecutive days;
//! inside a slice, every demand event may slide within its site's
//! flexibility window (drop-offs earlier, pickups later) and a min-max
//! integer program reassigns event magnitudes so the heaviest day is as
//! light as possible.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  PERIOD SEARCH                                                │
//! │                                                               │
//! │  for each candidate period length p:                          │
//! │      clone the demand frame                                   │
//! │      for each p-day slice (last slice may be shorter):        │
//! │          build flexibility sets and transform mask            │
//! │          solve the min-max reassignment IP                    │
//! │          overwrite the slice, re-signed via the mask          │
//! │      record the variance of daily totals over the horizon     │
//! │  return the frame of the minimum-variance feasible candidate  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! A candidate whose slices do not all solve to optimality is excluded from
//! selection; every candidate failing is an error.

mod slice;
mod solver;

pub use slice::SlicePlan;
pub use solver::{solve_slice, SliceSolution};

use crate::SolveStatus;
use haulplan_core::{DemandFrame, PlanConfig, PlanError, PlanResult};
use tracing::{debug, info};

/// The smoothed horizon together with the statistics that selected it.
#[derive(Debug, Clone)]
pub struct SmoothOutcome {
    /// The reassigned demand frame, signs preserved.
    pub demand: DemandFrame,
    /// The winning period length.
    pub period: usize,
    /// Variance of the per-day totals across the horizon.
    pub variance: f64,
    /// The largest per-slice peak the winning candidate saw.
    pub peak: f64,
}

/// Smooth the horizon once per candidate period length and keep the
/// lowest-variance feasible result. Ties go to the first candidate seen.
pub fn smooth_demand(config: &PlanConfig, demand: &DemandFrame) -> PlanResult<SmoothOutcome> {
    let num_days = demand.num_days();
    let num_sites = demand.num_sites();
    let mut best: Option<SmoothOutcome> = None;

    for &period in &config.periods {
        let mut frame = demand.clone();
        let mut daily_totals = vec![0.0; num_days];
        let mut peak = 0.0f64;
        let mut feasible = true;

        for start in (0..num_days).step_by(period) {
            let len = period.min(num_days - start);

            let slice: Vec<Vec<i64>> = (0..num_sites)
                .map(|i| (0..len).map(|l| frame.get(i, start + l)).collect())
                .collect();

            let plan = SlicePlan::build(&slice, config.window);
            let solved = solve_slice(&slice, &plan);
            if solved.status != SolveStatus::Optimal {
                debug!(period, start, status = ?solved.status, "smoothing slice failed");
                feasible = false;
                break;
            }

            peak = peak.max(solved.peak);
            for l in 0..len {
                daily_totals[start + l] =
                    solved.counts.iter().map(|row| row[l]).sum::<i64>() as f64;
            }
            for i in 0..num_sites {
                for l in 0..len {
                    frame.set(i, start + l, solved.counts[i][l] * plan.sign(i, l));
                }
            }
        }

        if !feasible {
            continue;
        }

        let variance = population_variance(&daily_totals);
        info!(period, variance, peak, "smoothing candidate complete");

        let better = match &best {
            Some(current) => variance < current.variance,
            None => true,
        };
        if better {
            best = Some(SmoothOutcome {
                demand: frame,
                period,
                variance,
                peak,
            });
        }
    }

    best.ok_or_else(|| {
        PlanError::Solver("demand smoothing was infeasible for every candidate period".into())
    })
}

fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}
