//! CSV importers for the demand matrix and the site table.

use chrono::NaiveDate;
use haulplan_core::{DemandFrame, PlanError, PlanResult, Site, SiteId, SiteTable};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SiteRecord {
    project: u32,
    lat: f64,
    long: f64,
}

/// Read the site table: one row per project id with decimal-degree
/// coordinates. The smallest id becomes the start hub, the largest the end
/// hub.
pub fn read_sites_csv(path: &Path) -> PlanResult<SiteTable> {
    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let record: SiteRecord = record.map_err(csv_error)?;
        rows.push(Site {
            id: SiteId::new(record.project),
            latitude: record.lat,
            longitude: record.long,
        });
    }
    SiteTable::new(rows)
}

/// Read the demand matrix: first column the site project id, remaining
/// headers ISO dates, cells signed integer demand counts.
pub fn read_demand_csv(path: &Path) -> PlanResult<DemandFrame> {
    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;

    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.len() < 2 {
        return Err(PlanError::Parse(
            "demand matrix needs a site column and at least one date column".into(),
        ));
    }
    let dates: Vec<NaiveDate> = headers
        .iter()
        .skip(1)
        .map(|h| {
            h.parse().map_err(|_| {
                PlanError::Parse(format!("demand column header {h:?} is not an ISO date"))
            })
        })
        .collect::<PlanResult<_>>()?;

    let mut site_ids = Vec::new();
    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let id_field = record
            .get(0)
            .ok_or_else(|| PlanError::Parse("demand row without a site id".into()))?;
        let id: u32 = id_field
            .parse()
            .map_err(|_| PlanError::Parse(format!("site id {id_field:?} is not an integer")))?;

        let row: Vec<i64> = record
            .iter()
            .skip(1)
            .map(|cell| {
                cell.trim().parse().map_err(|_| {
                    PlanError::Parse(format!(
                        "demand cell {cell:?} for site {id} is not an integer"
                    ))
                })
            })
            .collect::<PlanResult<_>>()?;

        site_ids.push(SiteId::new(id));
        values.push(row);
    }

    DemandFrame::new(site_ids, dates, values)
}

fn csv_error(err: csv::Error) -> PlanError {
    PlanError::Parse(err.to_string())
}
