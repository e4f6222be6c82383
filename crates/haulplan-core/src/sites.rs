//! Job sites and the two-hub geography.
//!
//! A planning region is a set of job sites keyed by project id plus two
//! distinguished hubs: the start hub where every hauler begins its day and
//! the end hub where every hauler finishes. The hubs may share coordinates.

use crate::{PlanError, PlanResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for a job site (the project id of the input table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SiteId(pub u32);

impl SiteId {
    pub fn new(id: u32) -> Self {
        SiteId(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single job site with its geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub latitude: f64,
    pub longitude: f64,
}

/// The full site table for a planning region.
///
/// The start hub is the smallest project id in the table and the end hub the
/// largest; every other id is a customer site.
#[derive(Debug, Clone)]
pub struct SiteTable {
    sites: BTreeMap<SiteId, Site>,
    start_hub: SiteId,
    end_hub: SiteId,
}

impl SiteTable {
    /// Build a table from site rows. Requires at least the two hubs.
    pub fn new(rows: Vec<Site>) -> PlanResult<Self> {
        if rows.len() < 2 {
            return Err(PlanError::Validation(
                "site table needs at least a start hub and an end hub".into(),
            ));
        }
        let mut sites = BTreeMap::new();
        for site in rows {
            if sites.insert(site.id, site).is_some() {
                return Err(PlanError::Validation(format!(
                    "duplicate site id {} in site table",
                    site.id
                )));
            }
        }
        let start_hub = *sites.keys().next().unwrap();
        let end_hub = *sites.keys().next_back().unwrap();
        Ok(Self {
            sites,
            start_hub,
            end_hub,
        })
    }

    pub fn start_hub(&self) -> SiteId {
        self.start_hub
    }

    pub fn end_hub(&self) -> SiteId {
        self.end_hub
    }

    pub fn get(&self, id: SiteId) -> Option<&Site> {
        self.sites.get(&id)
    }

    /// Coordinates of a site, or a validation error naming the missing id.
    pub fn coords(&self, id: SiteId) -> PlanResult<(f64, f64)> {
        self.sites
            .get(&id)
            .map(|s| (s.latitude, s.longitude))
            .ok_or_else(|| PlanError::Validation(format!("no coordinates for site {id}")))
    }

    /// Customer site ids (everything except the hubs), ascending.
    pub fn customer_ids(&self) -> impl Iterator<Item = SiteId> + '_ {
        self.sites
            .keys()
            .copied()
            .filter(move |id| *id != self.start_hub && *id != self.end_hub)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(id: u32, lat: f64, lon: f64) -> Site {
        Site {
            id: SiteId::new(id),
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn test_hub_resolution() {
        let table = SiteTable::new(vec![
            site(0, 40.0, -88.0),
            site(1, 40.5, -88.2),
            site(2, 41.0, -88.4),
            site(6, 40.0, -88.0),
        ])
        .unwrap();

        assert_eq!(table.start_hub(), SiteId::new(0));
        assert_eq!(table.end_hub(), SiteId::new(6));
        let customers: Vec<_> = table.customer_ids().collect();
        assert_eq!(customers, vec![SiteId::new(1), SiteId::new(2)]);
    }

    #[test]
    fn test_missing_site_is_validation_error() {
        let table = SiteTable::new(vec![site(0, 40.0, -88.0), site(6, 40.0, -88.0)]).unwrap();
        let err = table.coords(SiteId::new(3)).unwrap_err();
        assert!(matches!(err, crate::PlanError::Validation(_)));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = SiteTable::new(vec![site(0, 40.0, -88.0), site(0, 41.0, -88.0)]);
        assert!(result.is_err());
    }
}
