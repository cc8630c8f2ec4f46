//! Currency rounding.
//!
//! Every documented rounding point in the engine goes through
//! [`round_currency`] so the rounding mode is a single testable contract:
//! half-up (midpoint away from zero) to the nearest whole currency unit.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to the nearest whole currency unit, half-up.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("10.5").unwrap()), Decimal::from(11));
/// assert_eq!(round_currency(Decimal::from_str("10.49").unwrap()), Decimal::from(10));
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
