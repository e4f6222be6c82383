//! The min-max smoothing integer program for one slice.

use super::SlicePlan;
use crate::SolveStatus;
use good_lp::solvers::coin_cbc::coin_cbc;
use good_lp::{constraint, variable, variables, Expression, Solution, SolverModel, Variable};
use tracing::debug;

/// Solved per-slice reassignment: event magnitudes per (site, day) and the
/// peak daily load the solver could not avoid.
#[derive(Debug, Clone)]
pub struct SliceSolution {
    pub status: SolveStatus,
    /// The minimized maximum daily total across the slice.
    pub peak: f64,
    /// Reassigned magnitudes, sites × days; zero where no event may land.
    pub counts: Vec<Vec<i64>>,
}

/// Redistribute one slice's events across their flexibility sets so the
/// largest daily total is as small as possible.
///
/// ```text
/// minimize    z
/// subject to  Σ_{l' ∈ flex(i,l)} w[i][l'] = |d[i][l]|    for each event (i, l)
///             Σ_i w[i][l] ≤ z                            for each slice day l
///             w, z ≥ 0 integer
/// ```
///
/// A variable w[i][l'] exists only where some event of site i may land; all
/// other cells stay zero.
pub fn solve_slice(demand: &[Vec<i64>], plan: &SlicePlan) -> SliceSolution {
    let num_sites = demand.len();
    let num_days = demand.first().map_or(0, Vec::len);

    let mut vars = variables!();
    let z = vars.add(variable().integer().min(0));

    // w[i][l'] for every day that may receive one of site i's events
    let mut w: Vec<Vec<Option<Variable>>> = vec![vec![None; num_days]; num_sites];
    for i in 0..num_sites {
        for day in plan.receiving_days(i) {
            w[i][day] = Some(vars.add(variable().integer().min(0)));
        }
    }

    let mut model = vars.minimise(z).using(coin_cbc);
    model.set_parameter("logLevel", "0");

    // every event's magnitude lands somewhere in its flexibility set
    for i in 0..num_sites {
        for l in 0..num_days {
            let set = plan.flex(i, l);
            if set.is_empty() {
                continue;
            }
            let mut assigned = Expression::from(0.0);
            for &l_prime in set {
                assigned += w[i][l_prime].expect("flex day has a variable");
            }
            model = model.with(constraint!(assigned == demand[i][l].abs() as f64));
        }
    }

    // z dominates each day's total load
    for l in 0..num_days {
        let mut load = Expression::from(0.0);
        for site in w.iter() {
            if let Some(var) = site[l] {
                load += var;
            }
        }
        model = model.with(constraint!(load <= z));
    }

    let solution = match model.solve() {
        Ok(solution) => solution,
        Err(good_lp::ResolutionError::Infeasible) => {
            return SliceSolution {
                status: SolveStatus::Infeasible,
                peak: 0.0,
                counts: Vec::new(),
            };
        }
        Err(err) => {
            debug!(?err, "smoothing solve did not complete");
            return SliceSolution {
                status: SolveStatus::Undefined,
                peak: 0.0,
                counts: Vec::new(),
            };
        }
    };

    let counts = w
        .iter()
        .map(|site| {
            site.iter()
                .map(|cell| {
                    cell.map(|var| solution.value(var).round() as i64)
                        .unwrap_or(0)
                })
                .collect()
        })
        .collect();

    SliceSolution {
        status: SolveStatus::Optimal,
        peak: solution.value(z).round(),
        counts,
    }
}
