//! The daily hauler routing integer program.

use super::DayParams;
use crate::SolveStatus;
use good_lp::solvers::coin_cbc::coin_cbc;
use good_lp::{constraint, variable, variables, Expression, Solution, SolverModel, Variable};
use haulplan_core::PlanConfig;
use std::time::Duration;
use tracing::debug;

/// Big-M for the subset indicator coupling. Any value at or above the arc
/// caps works; the caps themselves never exceed 100.
const BIG_M: f64 = 100.0;

/// Router solve options.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Wall-clock bound per solve; a timeout reports as `Undefined`.
    pub time_limit: Option<Duration>,
    /// Let CBC print its log.
    pub verbose: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            time_limit: None,
            verbose: false,
        }
    }
}

/// Result of one routing attempt at a fixed fleet size.
///
/// Non-optimal statuses are data, not errors: the fleet-sizing driver reads
/// `Infeasible`/`Undefined` as "try a larger fleet".
#[derive(Debug, Clone)]
pub struct RouteOutcome {
    pub status: SolveStatus,
    /// Total fleet-miles of the optimal solution.
    pub total_miles: Option<i64>,
    /// Arc traversal counts `flows[i][j][k]`; empty unless optimal.
    pub flows: Vec<Vec<Vec<i64>>>,
}

impl RouteOutcome {
    fn non_optimal(status: SolveStatus) -> Self {
        Self {
            status,
            total_miles: None,
            flows: Vec::new(),
        }
    }
}

/// Decide whether `fleet_size` haulers can service the day's demand within
/// the shift length, and at what total mileage.
///
/// Variables: integer arc counts x[i][j][k] per hauler, binary subset
/// indicators y[m][k]. Constraints:
///
/// ```text
/// minimize    Σ T[i][j] · x[i][j][k]
///
/// Σ_{j≠0} x[0][j][k] ≥ 1                  every hauler leaves the start hub
/// Σ_i x[i][h][k] − Σ_j x[h][j][k] = 0     flow conservation at customers
/// Σ_i x[i][end][k] = 1                    every hauler finishes at the end hub
/// Σ x[i][j][k]·(handle + ⌊T/rate⌋) ≤ L + handle   shift-length budget
/// Σ_{j,k} x[i][j][k] = |demand[i]|        demand met, as departures
/// Σ_k x[i][j][k] ≤ R[i][j]                arc-count caps
/// Σ_{i,j∈m} x[i][j][k] ≤ M · y[m][k]      subset indicator coupling
/// Σ_{i∈m, j∉m} x[i][j][k] ≥ y[m][k]       subset exit (subtour elimination)
/// ```
///
/// The extra `handle` on the right of the shift budget credits the reload
/// that happens before the shift starts or after it ends.
pub fn route_fleet(
    config: &PlanConfig,
    router: &RouterConfig,
    params: &DayParams,
    fleet_size: usize,
) -> RouteOutcome {
    // An empty fleet cannot service demand; no model needed.
    if fleet_size == 0 {
        return RouteOutcome::non_optimal(SolveStatus::Infeasible);
    }

    let n = params.num_locations();
    let end = params.end_hub();
    let subsets = params.subsets();

    let mut vars = variables!();

    // x[i][j][k]: times hauler k runs the arc i -> j
    let x: Vec<Vec<Vec<Variable>>> = (0..n)
        .map(|_| {
            (0..n)
                .map(|_| {
                    (0..fleet_size)
                        .map(|_| vars.add(variable().integer().min(0)))
                        .collect()
                })
                .collect()
        })
        .collect();

    // y[m][k]: hauler k has an arc inside subset m
    let y: Vec<Vec<Variable>> = (0..subsets.len())
        .map(|_| {
            (0..fleet_size)
                .map(|_| vars.add(variable().binary()))
                .collect()
        })
        .collect();

    // Objective: total fleet-miles.
    let mut total_miles = Expression::from(0.0);
    for i in 0..n {
        for j in 0..n {
            for k in 0..fleet_size {
                total_miles += params.travel(i, j) as f64 * x[i][j][k];
            }
        }
    }

    let mut model = vars.minimise(total_miles).using(coin_cbc);
    if !router.verbose {
        model.set_parameter("logLevel", "0");
    }
    if let Some(limit) = router.time_limit {
        model.set_parameter("seconds", &limit.as_secs().to_string());
    }

    // every hauler departs the start hub
    for k in 0..fleet_size {
        let mut departures = Expression::from(0.0);
        for j in 1..n {
            departures += x[0][j][k];
        }
        model = model.with(constraint!(departures >= 1));
    }

    // flow conservation at customers
    for h in params.customers() {
        for k in 0..fleet_size {
            let mut net = Expression::from(0.0);
            for i in 0..n {
                net += x[i][h][k];
            }
            for j in 0..n {
                net -= x[h][j][k];
            }
            model = model.with(constraint!(net == 0));
        }
    }

    // every hauler ends at the end hub exactly once
    for k in 0..fleet_size {
        let mut arrivals = Expression::from(0.0);
        for i in 0..n {
            arrivals += x[i][end][k];
        }
        model = model.with(constraint!(arrivals == 1));
    }

    // shift-length budget
    for k in 0..fleet_size {
        let mut minutes = Expression::from(0.0);
        for i in 0..n {
            for j in 0..n {
                let arc_minutes =
                    config.handle + (params.travel(i, j) as f64 / config.travel_rate) as i64;
                minutes += arc_minutes as f64 * x[i][j][k];
            }
        }
        model = model.with(constraint!(minutes <= (config.day_length + config.handle) as f64));
    }

    // demand met, expressed as departures from each customer
    for i in params.customers() {
        let mut departures = Expression::from(0.0);
        for j in 0..n {
            for k in 0..fleet_size {
                departures += x[i][j][k];
            }
        }
        model = model.with(constraint!(departures == params.demand()[i].abs() as f64));
    }

    // arc-count caps
    for i in 0..n {
        for j in 0..n {
            let mut traversals = Expression::from(0.0);
            for k in 0..fleet_size {
                traversals += x[i][j][k];
            }
            model = model.with(constraint!(traversals <= params.route_cap(i, j) as f64));
        }
    }

    // subset indicator coupling
    for (m, subset) in subsets.iter().enumerate() {
        for k in 0..fleet_size {
            let mut inside = Expression::from(0.0);
            for &i in subset {
                for &j in subset {
                    inside += x[i][j][k];
                }
            }
            model = model.with(constraint!(inside <= BIG_M * y[m][k]));
        }
    }

    // a hauler travelling inside a subset must also leave it
    for (m, subset) in subsets.iter().enumerate() {
        for k in 0..fleet_size {
            let mut leaving = Expression::from(0.0);
            for &i in subset {
                for j in params.locations().filter(|j| !subset.contains(j)) {
                    leaving += x[i][j][k];
                }
            }
            model = model.with(constraint!(leaving >= y[m][k]));
        }
    }

    let solution = match model.solve() {
        Ok(solution) => solution,
        Err(good_lp::ResolutionError::Infeasible) => {
            return RouteOutcome::non_optimal(SolveStatus::Infeasible);
        }
        Err(err) => {
            debug!(?err, "routing solve did not complete");
            return RouteOutcome::non_optimal(SolveStatus::Undefined);
        }
    };

    let mut flows = vec![vec![vec![0i64; fleet_size]; n]; n];
    let mut miles = 0i64;
    for i in 0..n {
        for j in 0..n {
            for k in 0..fleet_size {
                let count = solution.value(x[i][j][k]).round() as i64;
                flows[i][j][k] = count;
                miles += count * params.travel(i, j);
            }
        }
    }

    RouteOutcome {
        status: SolveStatus::Optimal,
        total_miles: Some(miles),
        flows,
    }
}
