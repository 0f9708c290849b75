use std::fmt;
use thiserror::Error;

/// Denominator of a per-basis cost rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateBasis {
    SquareFoot,
    Unit,
}

impl fmt::Display for RateBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateBasis::SquareFoot => write!(f, "square foot"),
            RateBasis::Unit => write!(f, "unit"),
        }
    }
}

/// Errors raised while deriving cost figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CostError {
    /// The project has no square footage or no units to divide by.
    /// Callers should show totals only.
    #[error("cannot compute cost per {basis}: project configuration has zero {basis}s")]
    DivisionByZero { basis: RateBasis },
}
