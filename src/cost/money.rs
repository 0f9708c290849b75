use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Read a stored currency amount.
///
/// Absent, non-numeric and negative amounts all count as zero so partially
/// entered breakdown rows still aggregate.
pub fn parse_amount(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw else {
        return Decimal::ZERO;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    match Decimal::from_str(trimmed) {
        Ok(value) if value.is_sign_negative() && !value.is_zero() => {
            tracing::debug!(value = trimmed, "negative cost amount treated as zero");
            Decimal::ZERO
        }
        Ok(value) => value,
        Err(_) => {
            tracing::debug!(value = trimmed, "non-numeric cost amount treated as zero");
            Decimal::ZERO
        }
    }
}

/// Round to whole cents, half away from zero
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a percentage to one decimal place, half away from zero
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_amounts() {
        assert_eq!(parse_amount(Some("100")), Decimal::new(100, 0));
        assert_eq!(parse_amount(Some("1200.50")), Decimal::new(120050, 2));
        assert_eq!(parse_amount(Some("  42.1 ")), Decimal::new(421, 1));
    }

    #[test]
    fn test_parse_lenient_cases() {
        assert_eq!(parse_amount(None), Decimal::ZERO);
        assert_eq!(parse_amount(Some("")), Decimal::ZERO);
        assert_eq!(parse_amount(Some("n/a")), Decimal::ZERO);
        assert_eq!(parse_amount(Some("-250")), Decimal::ZERO);
        assert_eq!(parse_amount(Some("-0")), Decimal::ZERO);
    }

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_currency(Decimal::new(12344, 3)), Decimal::new(1234, 2));
        assert_eq!(round_currency(Decimal::new(600, 0)), Decimal::new(600, 0));
    }

    #[test]
    fn test_round_percent() {
        assert_eq!(round_percent(Decimal::new(2025, 2)), Decimal::new(203, 1));
        assert_eq!(round_percent(Decimal::new(20, 0)), Decimal::new(20, 0));
    }
}
