//! Flexibility sets for one smoothing slice.

/// Where each demand event inside a slice may be reassigned.
///
/// Drop-offs may slide earlier within the slice, pickups later; neither may
/// cross a slice boundary. The transform mask remembers which (site, day)
/// cells may receive drop-offs so solved magnitudes can be re-signed.
#[derive(Debug, Clone)]
pub struct SlicePlan {
    /// `flex[i][l]`: slice-local days the event at (site i, day l) may land
    /// on. Empty when the site has no demand that day.
    flex: Vec<Vec<Vec<usize>>>,
    /// `transform[i][l]`: −1 where day l appears in any of site i's
    /// drop-off flexibility sets, +1 otherwise.
    transform: Vec<Vec<i64>>,
}

impl SlicePlan {
    /// Build the flexibility sets for a signed demand slice of shape
    /// sites × days.
    pub fn build(demand: &[Vec<i64>], window: usize) -> Self {
        let num_sites = demand.len();
        let num_days = demand.first().map_or(0, Vec::len);

        let mut flex = vec![vec![Vec::new(); num_days]; num_sites];
        let mut transform = vec![vec![1i64; num_days]; num_sites];

        for i in 0..num_sites {
            for l in 0..num_days {
                let d = demand[i][l];
                if d < 0 {
                    // drop-offs may move earlier, but not before the slice
                    let width = window.min(l + 1);
                    flex[i][l] = (l + 1 - width..=l).collect();
                    for &day in &flex[i][l] {
                        transform[i][day] = -1;
                    }
                } else if d > 0 {
                    // pickups may move later, but not past the slice end
                    let width = window.min(num_days - l);
                    flex[i][l] = (l..l + width).collect();
                }
            }
        }

        Self { flex, transform }
    }

    pub fn flex(&self, site: usize, day: usize) -> &[usize] {
        &self.flex[site][day]
    }

    pub fn sign(&self, site: usize, day: usize) -> i64 {
        self.transform[site][day]
    }

    /// Slice days that may receive any of a site's events.
    pub fn receiving_days(&self, site: usize) -> Vec<usize> {
        let num_days = self.transform[site].len();
        let mut days: Vec<usize> = (0..num_days)
            .filter(|day| self.flex[site].iter().any(|set| set.contains(day)))
            .collect();
        days.sort_unstable();
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropoff_cannot_cross_slice_start() {
        // -2 on the first slice day with a 3-day window: nowhere earlier to go
        let plan = SlicePlan::build(&[vec![-2, 0, 0, 0, 0]], 3);
        assert_eq!(plan.flex(0, 0), &[0]);
        assert_eq!(plan.sign(0, 0), -1);
        assert_eq!(plan.sign(0, 1), 1);
    }

    #[test]
    fn test_dropoff_slides_earlier() {
        let plan = SlicePlan::build(&[vec![0, 0, 0, -1, 0]], 3);
        assert_eq!(plan.flex(0, 3), &[1, 2, 3]);
        assert_eq!(plan.sign(0, 1), -1);
        assert_eq!(plan.sign(0, 2), -1);
        assert_eq!(plan.sign(0, 3), -1);
        assert_eq!(plan.sign(0, 4), 1);
    }

    #[test]
    fn test_pickup_slides_later_and_clips_at_slice_end() {
        let plan = SlicePlan::build(&[vec![0, 0, 0, 2, 0]], 3);
        // only two days remain in the slice
        assert_eq!(plan.flex(0, 3), &[3, 4]);
        assert_eq!(plan.sign(0, 3), 1);
        assert_eq!(plan.sign(0, 4), 1);
    }

    #[test]
    fn test_no_demand_no_flexibility() {
        let plan = SlicePlan::build(&[vec![0, 0, 0]], 3);
        for l in 0..3 {
            assert!(plan.flex(0, l).is_empty());
        }
    }

    #[test]
    fn test_receiving_days_union() {
        let plan = SlicePlan::build(&[vec![1, 0, -1, 0, 0]], 2);
        // pickup on day 0 may land on {0,1}; drop-off on day 2 on {1,2}
        assert_eq!(plan.receiving_days(0), vec![0, 1, 2]);
    }
}
