use super::types::{CostBreakdown, Project};
use crate::estimate::SimulatorEstimate;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Get the default project store path (~/.config/raap-feasibility/projects.json)
pub fn get_store_path() -> PathBuf {
    crate::config::get_config_dir().join("projects.json")
}

/// Read-only view of project records, their cost breakdown rows and any
/// simulator estimates recorded for them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStore {
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    cost_breakdowns: Vec<CostBreakdown>,
    // JSON object keys are strings, so estimates are keyed by the id's text
    #[serde(default)]
    estimates: HashMap<String, SimulatorEstimate>,
}

impl ProjectStore {
    /// Load a project store from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or is not
    /// a valid store document.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Project store not found at {}", path.display());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open project store at {}", path.display()))?;

        let store: ProjectStore = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse project store at {}", path.display()))?;

        tracing::debug!(
            projects = store.projects.len(),
            breakdowns = store.cost_breakdowns.len(),
            estimates = store.estimates.len(),
            "loaded project store"
        );

        Ok(store)
    }

    /// All projects in file order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: i64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Cost breakdown rows for a project, in file order
    pub fn breakdowns_for(&self, project_id: i64) -> Vec<CostBreakdown> {
        self.cost_breakdowns
            .iter()
            .filter(|row| row.project_id == project_id)
            .cloned()
            .collect()
    }

    pub fn estimate_for(&self, project_id: i64) -> Option<&SimulatorEstimate> {
        self.estimates.get(&project_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;

    const STORE_JSON: &str = r#"{
        "projects": [
            {"id": 1, "name": "Serenity Village", "studioUnits": 10, "targetFloors": 4},
            {"id": 2, "name": "Maple Court", "oneBedUnits": 24, "targetFloors": 6}
        ],
        "costBreakdowns": [
            {"id": 10, "projectId": 1, "category": "03 Concrete", "siteBuiltCost": "150", "raapTotalCost": "100"},
            {"id": 11, "projectId": 2, "category": "05 Metals", "siteBuiltCost": "90"},
            {"id": 12, "projectId": 1, "category": "06 Wood", "siteBuiltCost": "250", "raapTotalCost": "200"}
        ],
        "estimates": {
            "2": {"modularTotal": "4100000", "siteBuiltTotal": "5000000"}
        }
    }"#;

    fn write_store(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_and_lookup() {
        let file = write_store(STORE_JSON);
        let store = ProjectStore::load(file.path()).unwrap();

        assert_eq!(store.projects().len(), 2);
        assert_eq!(store.project(2).unwrap().name, "Maple Court");
        assert!(store.project(99).is_none());
    }

    #[test]
    fn test_breakdowns_filtered_by_project() {
        let file = write_store(STORE_JSON);
        let store = ProjectStore::load(file.path()).unwrap();

        let rows = store.breakdowns_for(1);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 10);
        assert_eq!(rows[1].id, 12);
        assert!(store.breakdowns_for(3).is_empty());
    }

    #[test]
    fn test_estimate_lookup() {
        let file = write_store(STORE_JSON);
        let store = ProjectStore::load(file.path()).unwrap();

        let estimate = store.estimate_for(2).unwrap();
        assert_eq!(estimate.modular_total, Decimal::new(4_100_000, 0));
        assert!(store.estimate_for(1).is_none());
    }

    #[test]
    fn test_missing_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProjectStore::load(&dir.path().join("nope.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let file = write_store("{ not json");
        assert!(ProjectStore::load(file.path()).is_err());
    }
}
