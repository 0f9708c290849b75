use serde::{Deserialize, Serialize};

/// Site-built schedule used when a project does not record one.
pub const DEFAULT_SITE_BUILT_TIMELINE_MONTHS: u32 = 13;

/// A project record as supplied by the project store.
///
/// The engine only reads these fields; it never writes them back.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub studio_units: u32,
    #[serde(default)]
    pub one_bed_units: u32,
    #[serde(default)]
    pub two_bed_units: u32,
    #[serde(default)]
    pub three_bed_units: u32,
    pub target_floors: u32,
    #[serde(default)]
    pub site_built_timeline_months: Option<u32>,
    #[serde(default)]
    pub gross_square_feet: Option<u64>,

    // Only used to build a remote estimate request
    #[serde(default)]
    pub building_type: Option<String>,
    #[serde(default)]
    pub parking_type: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub prevailing_wage: Option<bool>,
    #[serde(default)]
    pub site_conditions: Option<String>,

    #[serde(flatten)]
    pub stored_scores: StoredScores,
}

impl Project {
    /// Total dwelling units across the unit mix
    pub fn total_units(&self) -> u64 {
        [self.studio_units, self.one_bed_units, self.two_bed_units, self.three_bed_units]
            .iter()
            .map(|&units| units as u64)
            .sum()
    }

    /// Site-built schedule in months, falling back to the 13 month default
    pub fn site_built_timeline(&self) -> u32 {
        self.site_built_timeline_months
            .filter(|months| *months > 0)
            .unwrap_or(DEFAULT_SITE_BUILT_TIMELINE_MONTHS)
    }
}

/// Curated per-dimension scores stored on sample projects.
///
/// Values are decimal strings; anything that does not parse to a number in
/// `[0.0, 5.0]` is replaced by the sample default when scoring.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoning_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub massing_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logistics_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_time_score: Option<String>,
}

/// One cost category row for a project. Amounts are decimal strings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub id: i64,
    pub project_id: i64,
    pub category: String,
    #[serde(default)]
    pub site_built_cost: Option<String>,
    #[serde(default)]
    pub raap_gc_cost: Option<String>,
    #[serde(default)]
    pub raap_fab_cost: Option<String>,
    #[serde(default)]
    pub raap_total_cost: Option<String>,
}

/// Which scoring policy applies to a project.
///
/// Resolved once per project from the sample allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectClass {
    Sample,
    Generated,
}

impl ProjectClass {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectClass::Sample => "sample",
            ProjectClass::Generated => "generated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_parses_camel_case() {
        let json = r#"{
            "id": 7,
            "name": "Serenity Village",
            "studioUnits": 4,
            "oneBedUnits": 10,
            "twoBedUnits": 6,
            "threeBedUnits": 2,
            "targetFloors": 5,
            "zoningScore": "4.5",
            "buildTimeScore": "3.9"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, 7);
        assert_eq!(project.total_units(), 22);
        assert_eq!(project.stored_scores.zoning_score.as_deref(), Some("4.5"));
        assert_eq!(project.stored_scores.build_time_score.as_deref(), Some("3.9"));
        assert!(project.stored_scores.massing_score.is_none());
        assert!(project.gross_square_feet.is_none());
    }

    #[test]
    fn test_total_units_does_not_overflow() {
        let json = r#"{"id": 2, "name": "Tower", "targetFloors": 40}"#;
        let mut project: Project = serde_json::from_str(json).unwrap();
        project.studio_units = u32::MAX;
        project.one_bed_units = u32::MAX;
        project.three_bed_units = 2;

        assert_eq!(project.total_units(), 2 * u32::MAX as u64 + 2);
    }

    #[test]
    fn test_timeline_defaults_to_thirteen_months() {
        let json = r#"{"id": 1, "name": "A", "targetFloors": 3}"#;
        let mut project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.site_built_timeline(), 13);

        project.site_built_timeline_months = Some(18);
        assert_eq!(project.site_built_timeline(), 18);

        project.site_built_timeline_months = Some(0);
        assert_eq!(project.site_built_timeline(), 13);
    }

    #[test]
    fn test_breakdown_missing_amounts() {
        let json = r#"{"id": 3, "projectId": 1, "category": "03 Concrete", "siteBuiltCost": "1200.50"}"#;
        let row: CostBreakdown = serde_json::from_str(json).unwrap();
        assert_eq!(row.site_built_cost.as_deref(), Some("1200.50"));
        assert!(row.raap_total_cost.is_none());
    }
}
