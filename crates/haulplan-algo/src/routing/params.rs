//! Per-day routing inputs.
//!
//! For each day with demand, the routing model needs a local frame of
//! locations: the start hub, every customer with non-zero demand, and the end
//! hub, in that order. All matrices below are indexed in this local frame.

use haulplan_core::{PlanConfig, PlanResult, SiteId, SiteTable};
use itertools::Itertools;
use std::ops::Range;

/// Cap used for arcs whose traversal count is effectively unconstrained
/// (arcs touching the start hub or entering the end hub).
pub const UNBOUNDED_CAP: i64 = 100;

/// Everything the daily router needs that varies by day.
#[derive(Debug, Clone)]
pub struct DayParams {
    /// Original project ids in local-frame order: [start_hub, customers.., end_hub].
    site_ids: Vec<SiteId>,
    /// Signed demand per location; hubs carry 0.
    demand: Vec<i64>,
    /// One-way miles between location pairs, clamped to a single shift's reach.
    travel: Vec<Vec<i64>>,
    /// How many times all haulers combined may traverse each arc in one day.
    route_caps: Vec<Vec<i64>>,
    /// Customer subsets (local indices) used for subtour elimination.
    subsets: Vec<Vec<usize>>,
}

impl DayParams {
    /// Derive the day's routing inputs from the active demand vector and the
    /// site geography.
    ///
    /// `active` is the day's non-zero demand in demand-frame row order. A
    /// demanded site without coordinates is a structural validation error.
    pub fn build(
        config: &PlanConfig,
        sites: &SiteTable,
        active: &[(SiteId, i64)],
    ) -> PlanResult<Self> {
        let mut site_ids = Vec::with_capacity(active.len() + 2);
        site_ids.push(sites.start_hub());
        site_ids.extend(active.iter().map(|(id, _)| *id));
        site_ids.push(sites.end_hub());

        let mut demand = Vec::with_capacity(site_ids.len());
        demand.push(0);
        demand.extend(active.iter().map(|(_, d)| *d));
        demand.push(0);

        let travel = make_travel_matrix(config, sites, &site_ids)?;
        let route_caps = make_route_caps(&demand);
        let subsets = make_subsets(&demand);

        Ok(Self {
            site_ids,
            demand,
            travel,
            route_caps,
            subsets,
        })
    }

    pub fn num_locations(&self) -> usize {
        self.site_ids.len()
    }

    /// All local-frame indices, hubs included.
    pub fn locations(&self) -> Range<usize> {
        0..self.site_ids.len()
    }

    /// Local-frame indices of the customers (the frame without its hubs).
    pub fn customers(&self) -> Range<usize> {
        1..self.site_ids.len() - 1
    }

    pub fn start_hub(&self) -> usize {
        0
    }

    pub fn end_hub(&self) -> usize {
        self.site_ids.len() - 1
    }

    pub fn site_ids(&self) -> &[SiteId] {
        &self.site_ids
    }

    pub fn demand(&self) -> &[i64] {
        &self.demand
    }

    pub fn travel(&self, i: usize, j: usize) -> i64 {
        self.travel[i][j]
    }

    pub fn route_cap(&self, i: usize, j: usize) -> i64 {
        self.route_caps[i][j]
    }

    pub fn subsets(&self) -> &[Vec<usize>] {
        &self.subsets
    }

    /// Total pickups and drop-offs to be serviced this day.
    pub fn total_events(&self) -> i64 {
        self.demand.iter().map(|d| d.abs()).sum()
    }
}

/// Miles between each location pair, as a rectangular degrees-to-miles
/// approximation (69 miles per degree of latitude, 53 per degree of
/// longitude at the latitudes served). Entries beyond a single hauler's
/// daily reach are clamped to that reach.
fn make_travel_matrix(
    config: &PlanConfig,
    sites: &SiteTable,
    site_ids: &[SiteId],
) -> PlanResult<Vec<Vec<i64>>> {
    let max_dist = config.max_reach_miles();
    let coords: Vec<(f64, f64)> = site_ids
        .iter()
        .map(|id| sites.coords(*id))
        .collect::<PlanResult<_>>()?;

    let n = site_ids.len();
    let mut travel = vec![vec![0i64; n]; n];
    for i in 0..n {
        for j in 0..n {
            let (lat1, long1) = coords[i];
            let (lat2, long2) = coords[j];
            let actual = (69.0 * (lat1 - lat2).abs() + 53.0 * (long1 - long2).abs()) as i64;
            travel[i][j] = actual.min(max_dist);
        }
    }
    Ok(travel)
}

/// How many times each arc may be traversed by all haulers combined.
///
/// An arc between opposite-sign customers is capped by the smaller demand
/// magnitude. Arcs touching the start hub, or entering the end hub, are
/// effectively unbounded so haulers can reload freely. Same-sign customer
/// pairs and arcs leaving the end hub for a customer get zero.
fn make_route_caps(demand: &[i64]) -> Vec<Vec<i64>> {
    let n = demand.len();
    let mut caps = vec![vec![0i64; n]; n];
    for i in 0..n {
        for j in 0..n {
            if demand[i] * demand[j] < 0 {
                caps[i][j] = demand[i].abs().min(demand[j].abs());
            } else if i == 0 || j == 0 || j == n - 1 {
                caps[i][j] = UNBOUNDED_CAP;
            } else {
                caps[i][j] = 0;
            }
        }
    }
    caps
}

/// Every even-cardinality customer subset holding both demand signs, plus
/// the full customer set. Single-sign subsets cannot host a closed tour, so
/// they are omitted.
fn make_subsets(demand: &[i64]) -> Vec<Vec<usize>> {
    let customers: Vec<usize> = (1..demand.len() - 1).collect();
    let mut subsets = Vec::new();

    for size in 2..customers.len() {
        if size % 2 != 0 {
            continue;
        }
        for subset in customers.iter().copied().combinations(size) {
            let has_dropoff = subset.iter().any(|&i| demand[i] < 0);
            let has_pickup = subset.iter().any(|&i| demand[i] > 0);
            if has_dropoff && has_pickup {
                subsets.push(subset);
            }
        }
    }

    subsets.push(customers);
    subsets
}
