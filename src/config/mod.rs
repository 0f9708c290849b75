mod init;
mod schema;

pub use init::write_default_config;
pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/raap-feasibility/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".config")
        .join("raap-feasibility")
}

/// Get the default config file path (~/.config/raap-feasibility/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/raap-feasibility/config.yaml) and falls back to built-in
///   defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

/// Validate the whole configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref scoring) = config.scoring {
        if let Err(e) = crate::scoring::validate_scoring(scoring) {
            errors.extend(e);
        }
    }
    if let Some(ref cost) = config.cost {
        if let Err(e) = crate::cost::validate_cost(cost) {
            errors.extend(e);
        }
    }
    if let Some(ref estimator) = config.estimator {
        if let Err(e) = crate::estimate::validate_estimator(estimator) {
            errors.extend(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_yaml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_yaml(
            r#"
store: "/data/projects.json"
scoring:
  sample_projects:
    - "Serenity Village"
cost:
  common_area_factor: 0.2
estimator:
  endpoint: "https://estimator.example.com/api/estimate"
  timeout: "5s"
"#,
        );
        let config = load_config(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.store, Some(PathBuf::from("/data/projects.json")));
        assert_eq!(config.effective_cost().common_area_factor, Some(0.2));
        assert_eq!(
            config.effective_estimator().endpoint.as_deref(),
            Some("https://estimator.example.com/api/estimate")
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_empty_config() {
        let file = write_yaml("{}");
        let config = load_config(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.effective_scoring(), crate::scoring::ScoringConfig::default());
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(dir.path().join("missing.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let file = write_yaml("queries: []\n");
        assert!(load_config(Some(file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_validate_collects_across_sections() {
        let file = write_yaml(
            r#"
scoring:
  sample_projects: [""]
cost:
  common_area_factor: -1.0
estimator:
  timeout: "later"
"#,
        );
        let config = load_config(Some(file.path().to_path_buf())).unwrap();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
