pub mod aggregate;
pub mod config;
pub mod error;
pub mod money;

pub use aggregate::{
    aggregate, category_totals, gross_square_feet, CategoryTotal, CostSource, CostTotals, ReportedRates,
};
pub use config::{validate_cost, CostConfig, UnitAreas};
pub use error::{CostError, RateBasis};
