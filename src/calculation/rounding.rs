//! Currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places currency amounts are stored with.
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds an amount to [`CURRENCY_SCALE`] places, midpoints away from zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(12345, 3)), Decimal::new(1235, 2));
/// assert_eq!(round_currency(Decimal::new(160000, 0)).to_string(), "160000.00");
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    // round_dp never widens the scale, so pad whole amounts to two places
    rounded.rescale(CURRENCY_SCALE);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(round_currency(dec("0.125")), dec("0.13"));
        assert_eq!(round_currency(dec("0.124")), dec("0.12"));
    }

    #[test]
    fn test_whole_amount_is_padded() {
        assert_eq!(round_currency(dec("25000")).to_string(), "25000.00");
    }

    #[test]
    fn test_repeating_fraction() {
        let amount = dec("4000000") / dec("21") / dec("8") * dec("7");
        assert_eq!(round_currency(amount), dec("166666.67"));
    }
}
