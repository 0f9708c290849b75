use super::config::CostConfig;
use super::error::{CostError, RateBasis};
use super::money::{parse_amount, round_currency, round_percent};
use crate::estimate::SimulatorEstimate;
use crate::project::{CostBreakdown, Project};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Where the cost totals came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CostSource {
    /// Summed from the project's cost breakdown rows
    Breakdown,
    /// Passed through from a simulator estimate
    Estimate,
    /// No rows and no estimate; totals are zero
    Empty,
}

impl CostSource {
    pub fn label(&self) -> &'static str {
        match self {
            CostSource::Breakdown => "cost breakdown",
            CostSource::Estimate => "simulator estimate",
            CostSource::Empty => "no cost data",
        }
    }
}

/// Canonical modular vs. site-built cost comparison for one project.
///
/// Derived on every read. Rates not reported by an estimate are computed
/// from the totals on demand, so a zero denominator surfaces as
/// [`CostError::DivisionByZero`] instead of an infinite or NaN value.
#[derive(Debug, Clone, PartialEq)]
pub struct CostTotals {
    pub source: CostSource,
    pub modular_total: Decimal,
    pub site_built_total: Decimal,
    /// Site-built minus modular, never below zero
    pub savings: Decimal,
    /// Savings as a percentage of site-built cost, one decimal place
    pub cost_savings_percent: Decimal,
    pub gross_square_feet: u64,
    pub total_units: u64,
    pub site_built_timeline_months: u32,
    /// Rates the estimator reported; each one replaces the recomputed rate
    pub reported_rates: ReportedRates,
}

/// Per-sf and per-unit rates supplied with a simulator estimate
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportedRates {
    pub modular_cost_per_sf: Option<Decimal>,
    pub site_built_cost_per_sf: Option<Decimal>,
    pub modular_cost_per_unit: Option<Decimal>,
    pub site_built_cost_per_unit: Option<Decimal>,
}

impl ReportedRates {
    fn from_estimate(estimate: &SimulatorEstimate) -> Self {
        Self {
            modular_cost_per_sf: estimate.modular_cost_per_sf,
            site_built_cost_per_sf: estimate.site_built_cost_per_sf,
            modular_cost_per_unit: estimate.modular_cost_per_unit,
            site_built_cost_per_unit: estimate.site_built_cost_per_unit,
        }
    }
}

impl CostTotals {
    pub fn modular_cost_per_sf(&self) -> Result<Decimal, CostError> {
        match self.reported_rates.modular_cost_per_sf {
            Some(rate) => Ok(rate),
            None => per_basis(self.modular_total, self.gross_square_feet, RateBasis::SquareFoot),
        }
    }

    pub fn site_built_cost_per_sf(&self) -> Result<Decimal, CostError> {
        match self.reported_rates.site_built_cost_per_sf {
            Some(rate) => Ok(rate),
            None => per_basis(self.site_built_total, self.gross_square_feet, RateBasis::SquareFoot),
        }
    }

    pub fn modular_cost_per_unit(&self) -> Result<Decimal, CostError> {
        match self.reported_rates.modular_cost_per_unit {
            Some(rate) => Ok(rate),
            None => per_basis(self.modular_total, self.total_units, RateBasis::Unit),
        }
    }

    pub fn site_built_cost_per_unit(&self) -> Result<Decimal, CostError> {
        match self.reported_rates.site_built_cost_per_unit {
            Some(rate) => Ok(rate),
            None => per_basis(self.site_built_total, self.total_units, RateBasis::Unit),
        }
    }

    /// Savings are only worth showing when modular is actually cheaper
    pub fn has_savings(&self) -> bool {
        self.savings > Decimal::ZERO
    }
}

fn per_basis(total: Decimal, denominator: u64, basis: RateBasis) -> Result<Decimal, CostError> {
    if denominator == 0 {
        return Err(CostError::DivisionByZero { basis });
    }
    total
        .checked_div(Decimal::from(denominator))
        .map(round_currency)
        .ok_or(CostError::DivisionByZero { basis })
}

/// Aggregate the cost comparison for a project.
///
/// When breakdown rows exist their `raapTotalCost` and `siteBuiltCost`
/// columns are summed and any estimate is ignored. Otherwise the estimate's
/// figures are used verbatim, and with neither the totals are zero. Sums that
/// exceed the representable range saturate at `Decimal::MAX`.
pub fn aggregate(
    project: &Project,
    breakdowns: &[CostBreakdown],
    estimate: Option<&SimulatorEstimate>,
    config: &CostConfig,
) -> CostTotals {
    let (source, modular_total, site_built_total) = if !breakdowns.is_empty() {
        let (modular, site_built) = breakdowns.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(modular, site_built), row| {
                let amounts = RowAmounts::read(row);
                (
                    saturating_add(modular, amounts.modular),
                    saturating_add(site_built, amounts.site_built),
                )
            },
        );
        (CostSource::Breakdown, round_currency(modular), round_currency(site_built))
    } else if let Some(estimate) = estimate {
        (CostSource::Estimate, estimate.modular_total, estimate.site_built_total)
    } else {
        (CostSource::Empty, Decimal::ZERO, Decimal::ZERO)
    };

    tracing::debug!(
        project_id = project.id,
        source = source.label(),
        rows = breakdowns.len(),
        "aggregated project costs"
    );

    let passthrough = match source {
        CostSource::Estimate => estimate,
        CostSource::Breakdown | CostSource::Empty => None,
    };

    let savings = match passthrough.and_then(|e| e.savings) {
        Some(reported) => reported.max(Decimal::ZERO),
        None => savings_between(site_built_total, modular_total),
    };
    let cost_savings_percent = match passthrough.and_then(|e| e.cost_savings_percent) {
        Some(reported) => round_percent(reported.max(Decimal::ZERO)),
        None => savings_percent(savings, site_built_total),
    };

    CostTotals {
        source,
        modular_total,
        site_built_total,
        savings,
        cost_savings_percent,
        gross_square_feet: gross_square_feet(project, config),
        total_units: project.total_units(),
        site_built_timeline_months: project.site_built_timeline(),
        reported_rates: passthrough.map(ReportedRates::from_estimate).unwrap_or_default(),
    }
}

/// Non-negative amounts only, so overflow can only run past the top
fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::MAX)
}

/// Site-built minus modular, clamped to `[0, Decimal::MAX]`
fn savings_between(site_built: Decimal, modular: Decimal) -> Decimal {
    match site_built.checked_sub(modular) {
        Some(diff) => diff.max(Decimal::ZERO),
        None if site_built > modular => Decimal::MAX,
        None => Decimal::ZERO,
    }
}

fn savings_percent(savings: Decimal, site_built: Decimal) -> Decimal {
    if site_built <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    savings
        .checked_div(site_built)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(round_percent)
        .unwrap_or(Decimal::ZERO)
}

/// Gross square footage: the recorded figure when present, otherwise the
/// unit mix's net area grossed up by the common-area factor.
pub fn gross_square_feet(project: &Project, config: &CostConfig) -> u64 {
    if let Some(gsf) = project.gross_square_feet.filter(|gsf| *gsf > 0) {
        return gsf;
    }

    let areas = config.effective_unit_areas();
    let net = [
        (project.studio_units, areas.studio),
        (project.one_bed_units, areas.one_bed),
        (project.two_bed_units, areas.two_bed),
        (project.three_bed_units, areas.three_bed),
    ]
    .iter()
    .fold(0u64, |net, &(units, area)| {
        net.saturating_add((units as u64).saturating_mul(area as u64))
    });

    // Decimal so a factor like 0.15 grosses up without binary float drift
    let factor = Decimal::from_f64(config.effective_common_area_factor().max(0.0))
        .unwrap_or(Decimal::ZERO);
    Decimal::ONE
        .checked_add(factor)
        .and_then(|multiplier| Decimal::from(net).checked_mul(multiplier))
        .map(|gross| gross.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|gross| gross.to_u64())
        .unwrap_or(u64::MAX)
}

/// Both cost columns of one breakdown row, leniently parsed
struct RowAmounts {
    modular: Decimal,
    site_built: Decimal,
}

impl RowAmounts {
    fn read(row: &CostBreakdown) -> Self {
        Self {
            modular: parse_amount(row.raap_total_cost.as_deref()),
            site_built: parse_amount(row.site_built_cost.as_deref()),
        }
    }
}

/// Breakdown rows rolled up by category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub modular: Decimal,
    pub site_built: Decimal,
}

/// Group breakdown rows by category in first-seen order.
///
/// Uses the same row reader as [`aggregate`], so the column sums match the
/// aggregated totals.
pub fn category_totals(breakdowns: &[CostBreakdown]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for row in breakdowns {
        let amounts = RowAmounts::read(row);
        match totals.iter_mut().find(|t| t.category == row.category) {
            Some(total) => {
                total.modular = saturating_add(total.modular, amounts.modular);
                total.site_built = saturating_add(total.site_built, amounts.site_built);
            }
            None => totals.push(CategoryTotal {
                category: row.category.clone(),
                modular: amounts.modular,
                site_built: amounts.site_built,
            }),
        }
    }
    totals
}
