//! Post-import validation of planning inputs.

use haulplan_core::{DemandFrame, PlanError, PlanResult, SiteTable};

/// Check that the demand matrix and site table agree before any solving
/// starts: every demand row must name a customer site with coordinates, and
/// the frame must carry at least one day.
pub fn validate_inputs(sites: &SiteTable, demand: &DemandFrame) -> PlanResult<()> {
    if demand.num_days() == 0 {
        return Err(PlanError::Validation(
            "demand matrix has no date columns".into(),
        ));
    }

    for id in demand.site_ids() {
        if sites.get(*id).is_none() {
            return Err(PlanError::Validation(format!(
                "demand references site {id} which has no coordinates"
            )));
        }
        if *id == sites.start_hub() || *id == sites.end_hub() {
            return Err(PlanError::Validation(format!(
                "demand row {id} is a hub; hubs carry no demand"
            )));
        }
    }

    Ok(())
}
