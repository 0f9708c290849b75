use serde::{Deserialize, Serialize};

/// Cost configuration.
///
/// Only used to derive gross square footage for projects that do not record
/// one. Example YAML:
/// ```yaml
/// cost:
///   common_area_factor: 0.15
///   unit_areas:
///     studio: 450
///     one_bed: 650
///     two_bed: 900
///     three_bed: 1150
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CostConfig {
    /// Net rentable area per unit type, in square feet
    #[serde(default)]
    pub unit_areas: Option<UnitAreas>,

    /// Corridors, lobbies and services as a fraction of net area (default: 0.15)
    #[serde(default)]
    pub common_area_factor: Option<f64>,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            unit_areas: Some(UnitAreas::default()),
            common_area_factor: Some(DEFAULT_COMMON_AREA_FACTOR),
        }
    }
}

pub const DEFAULT_COMMON_AREA_FACTOR: f64 = 0.15;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UnitAreas {
    pub studio: u32,
    pub one_bed: u32,
    pub two_bed: u32,
    pub three_bed: u32,
}

impl Default for UnitAreas {
    fn default() -> Self {
        Self {
            studio: 450,
            one_bed: 650,
            two_bed: 900,
            three_bed: 1150,
        }
    }
}

impl CostConfig {
    pub fn effective_unit_areas(&self) -> UnitAreas {
        self.unit_areas.unwrap_or_default()
    }

    pub fn effective_common_area_factor(&self) -> f64 {
        self.common_area_factor.unwrap_or(DEFAULT_COMMON_AREA_FACTOR)
    }
}

/// Validate cost configuration, collecting every error.
pub fn validate_cost(config: &CostConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(factor) = config.common_area_factor {
        if !factor.is_finite() || factor < 0.0 {
            errors.push("cost.common_area_factor: must be a non-negative number".to_string());
        }
    }

    if let Some(areas) = config.unit_areas {
        let named = [
            ("studio", areas.studio),
            ("one_bed", areas.one_bed),
            ("two_bed", areas.two_bed),
            ("three_bed", areas.three_bed),
        ];
        for (name, area) in named {
            if area == 0 {
                errors.push(format!("cost.unit_areas.{}: must be greater than zero", name));
            }
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

    #[test]
    fn test_default_cost_config() {
        let config = CostConfig::default();
        assert_eq!(config.effective_unit_areas().one_bed, 650);
        assert_eq!(config.effective_common_area_factor(), 0.15);
        assert!(validate_cost(&config).is_ok());
    }

    #[test]
    fn test_partial_cost_config_parse() {
        let yaml = "common_area_factor: 0.2\n";
        let config: CostConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.common_area_factor, Some(0.2));
        assert!(config.unit_areas.is_none());
        assert_eq!(config.effective_unit_areas(), UnitAreas::default());
    }

    #[test]
    fn test_full_cost_config_parse() {
        let yaml = r#"
common_area_factor: 0.1
unit_areas:
  studio: 400
  one_bed: 600
  two_bed: 850
  three_bed: 1100
"#;
        let config: CostConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.effective_unit_areas().three_bed, 1100);
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let config = CostConfig {
            unit_areas: Some(UnitAreas {
                studio: 0,
                one_bed: 650,
                two_bed: 0,
                three_bed: 1150,
            }),
            common_area_factor: Some(-0.1),
        };
        let errors = validate_cost(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("common_area_factor"));
        assert!(errors[1].contains("cost.unit_areas.studio"));
        assert!(errors[2].contains("cost.unit_areas.two_bed"));
    }
}
