use serde::Serialize;

/// One of the six feasibility dimensions a project is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Zoning,
    Massing,
    Sustainability,
    Cost,
    Logistics,
    BuildTime,
}

impl Dimension {
    /// All dimensions in draw order. Generated scores consume the PRNG in
    /// exactly this sequence.
    pub const ALL: [Dimension; 6] = [
        Dimension::Zoning,
        Dimension::Massing,
        Dimension::Sustainability,
        Dimension::Cost,
        Dimension::Logistics,
        Dimension::BuildTime,
    ];

    /// Fixed weight of this dimension in the overall score
    pub fn weight(&self) -> f64 {
        match self {
            Dimension::Zoning => 0.20,
            Dimension::Massing => 0.15,
            Dimension::Sustainability => 0.20,
            Dimension::Cost => 0.20,
            Dimension::Logistics => 0.15,
            Dimension::BuildTime => 0.10,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Zoning => "Zoning",
            Dimension::Massing => "Massing",
            Dimension::Sustainability => "Sustainability",
            Dimension::Cost => "Cost",
            Dimension::Logistics => "Logistics",
            Dimension::BuildTime => "Build Time",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        // Integer hundredths so the check is exact
        let hundredths: i64 = Dimension::ALL
            .iter()
            .map(|d| (d.weight() * 100.0).round() as i64)
            .sum();
        assert_eq!(hundredths, 100);

        let sum: f64 = Dimension::ALL.iter().map(|d| d.weight()).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_draw_order() {
        assert_eq!(Dimension::ALL[0], Dimension::Zoning);
        assert_eq!(Dimension::ALL[5], Dimension::BuildTime);
    }
}
