use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::cost::{aggregate, category_totals, CategoryTotal, CostConfig, CostSource, CostTotals};
use crate::estimate::{EstimatePhases, SimulatorEstimate};
use crate::project::{CostBreakdown, Project, ProjectClass};
use crate::scoring::{score, SampleRegistry, ScoreVector};

/// Everything a view needs to present one project's feasibility.
///
/// Cost cards, the breakdown table's totals row and the savings banner all
/// read `costs`, which comes from a single [`aggregate`] call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityReport {
    pub project_id: i64,
    pub project_name: String,
    pub class: ProjectClass,
    pub scores: ScoreVector,
    #[serde(serialize_with = "serialize_costs")]
    pub costs: CostTotals,
    pub categories: Vec<CategoryTotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phases: Option<EstimatePhases>,
    pub generated_at: DateTime<Utc>,
}

/// Build the report for a project from its stored records.
pub fn build_report(
    project: &Project,
    breakdowns: &[CostBreakdown],
    estimate: Option<&SimulatorEstimate>,
    registry: &SampleRegistry,
    cost_config: &CostConfig,
) -> FeasibilityReport {
    let class = registry.classify(&project.name);
    let scores = score(project.id, class, Some(&project.stored_scores));
    let costs = aggregate(project, breakdowns, estimate, cost_config);

    // Phase split only describes the totals when they came from the estimate
    let phases = match costs.source {
        CostSource::Estimate => estimate.and_then(|e| e.phases.clone()),
        CostSource::Breakdown | CostSource::Empty => None,
    };

    FeasibilityReport {
        project_id: project.id,
        project_name: project.name.clone(),
        class,
        scores,
        costs,
        categories: category_totals(breakdowns),
        phases,
        generated_at: Utc::now(),
    }
}

/// JSON shape of the cost totals; withheld rates become `null`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CostTotalsJson {
    source: CostSource,
    modular_total: Decimal,
    site_built_total: Decimal,
    modular_cost_per_sf: Option<Decimal>,
    site_built_cost_per_sf: Option<Decimal>,
    modular_cost_per_unit: Option<Decimal>,
    site_built_cost_per_unit: Option<Decimal>,
    savings: Decimal,
    cost_savings_percent: Decimal,
    gross_square_feet: u64,
    total_units: u64,
    site_built_timeline_months: u32,
}

fn serialize_costs<S: Serializer>(costs: &CostTotals, serializer: S) -> Result<S::Ok, S::Error> {
    CostTotalsJson {
        source: costs.source,
        modular_total: costs.modular_total,
        site_built_total: costs.site_built_total,
        modular_cost_per_sf: costs.modular_cost_per_sf().ok(),
        site_built_cost_per_sf: costs.site_built_cost_per_sf().ok(),
        modular_cost_per_unit: costs.modular_cost_per_unit().ok(),
        site_built_cost_per_unit: costs.site_built_cost_per_unit().ok(),
        savings: costs.savings,
        cost_savings_percent: costs.cost_savings_percent,
        gross_square_feet: costs.gross_square_feet,
        total_units: costs.total_units,
        site_built_timeline_months: costs.site_built_timeline_months,
    }
    .serialize(serializer)
}
