use crate::project::ProjectClass;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Showcase projects whose scores are curated rather than generated.
pub const DEFAULT_SAMPLE_PROJECTS: [&str; 1] = ["Serenity Village"];

/// Scoring configuration.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   sample_projects:
///     - "Serenity Village"
///     - "Demo Tower"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Exact, case-sensitive names treated as sample projects.
    /// Replaces the built-in list when set.
    #[serde(default)]
    pub sample_projects: Option<Vec<String>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            sample_projects: Some(
                DEFAULT_SAMPLE_PROJECTS
                    .iter()
                    .map(|name| name.to_string())
                    .collect(),
            ),
        }
    }
}

/// The sample-project allow-list.
///
/// Membership is an exact string match, so "serenity village" is a
/// generated project.
#[derive(Debug, Clone)]
pub struct SampleRegistry {
    names: HashSet<String>,
}

impl Default for SampleRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_PROJECTS.iter().map(|name| name.to_string()))
    }
}

impl SampleRegistry {
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            names: names.into_iter().collect(),
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        match config.sample_projects {
            Some(ref names) => Self::new(names.iter().cloned()),
            None => Self::default(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Resolve which scoring policy applies to a project name
    pub fn classify(&self, name: &str) -> ProjectClass {
        if self.contains(name) {
            ProjectClass::Sample
        } else {
            ProjectClass::Generated
        }
    }
}
