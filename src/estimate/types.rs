use crate::project::Project;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Building configuration sent to the remote cost estimator.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub studio_units: u32,
    pub one_bed_units: u32,
    pub two_bed_units: u32,
    pub three_bed_units: u32,
    pub floors: u32,
    pub building_type: String,
    pub parking_type: String,
    pub location: String,
    pub prevailing_wage: bool,
    pub site_conditions: String,
}

impl EstimateRequest {
    /// Build a request from a project record, filling unspecified
    /// descriptive fields with the estimator's baseline assumptions.
    pub fn from_project(project: &Project) -> Self {
        Self {
            studio_units: project.studio_units,
            one_bed_units: project.one_bed_units,
            two_bed_units: project.two_bed_units,
            three_bed_units: project.three_bed_units,
            floors: project.target_floors,
            building_type: project
                .building_type
                .clone()
                .unwrap_or_else(|| "multifamily".to_string()),
            parking_type: project
                .parking_type
                .clone()
                .unwrap_or_else(|| "surface".to_string()),
            location: project.address.clone().unwrap_or_default(),
            prevailing_wage: project.prevailing_wage.unwrap_or(false),
            site_conditions: project
                .site_conditions
                .clone()
                .unwrap_or_else(|| "standard".to_string()),
        }
    }
}

/// Cost estimate returned by the remote estimator.
///
/// Shaped like the aggregated totals; only the two totals are required.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorEstimate {
    pub modular_total: Decimal,
    pub site_built_total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modular_cost_per_sf: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_built_cost_per_sf: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modular_cost_per_unit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_built_cost_per_unit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_savings_percent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<EstimatePhases>,
}

/// Modular cost split by construction phase
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimatePhases {
    #[serde(default)]
    pub site_preparation: Decimal,
    #[serde(default)]
    pub foundation: Decimal,
    #[serde(default)]
    pub modular_units: Decimal,
    #[serde(default)]
    pub site_assembly: Decimal,
    #[serde(default)]
    pub mep_connections: Decimal,
    #[serde(default)]
    pub finish_work: Decimal,
    #[serde(default)]
    pub soft_costs: Decimal,
}

impl EstimatePhases {
    /// Phases as labelled rows in construction order
    pub fn rows(&self) -> [(&'static str, Decimal); 7] {
        [
            ("Site Preparation", self.site_preparation),
            ("Foundation", self.foundation),
            ("Modular Units", self.modular_units),
            ("Site Assembly", self.site_assembly),
            ("MEP Connections", self.mep_connections),
            ("Finish Work", self.finish_work),
            ("Soft Costs", self.soft_costs),
        ]
    }
}
