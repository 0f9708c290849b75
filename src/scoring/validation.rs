use super::config::ScoringConfig;
use super::dimensions::Dimension;
use std::collections::HashSet;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref names) = config.sample_projects {
        let mut seen = HashSet::new();
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                errors.push(format!("scoring.sample_projects[{}]: name must not be empty", i));
            } else if name.trim() != name {
                // Matching is exact, so padded names would never match a project
                errors.push(format!(
                    "scoring.sample_projects[{}]: '{}' has leading or trailing whitespace",
                    i, name
                ));
            }
            if !seen.insert(name.as_str()) {
                errors.push(format!("scoring.sample_projects[{}]: duplicate name '{}'", i, name));
            }
        }
    }

    // Weights are fixed, but guard against an edit that breaks the invariant
    let hundredths: i64 = Dimension::ALL
        .iter()
        .map(|d| (d.weight() * 100.0).round() as i64)
        .sum();
    if hundredths != 100 {
        errors.push(format!(
            "scoring weights: must sum to 1.00, got {:.2}",
            hundredths as f64 / 100.0
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
