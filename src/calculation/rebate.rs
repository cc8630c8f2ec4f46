//! Low-income tax rebate calculation.

use rust_decimal::Decimal;

use crate::config::RebateRule;
use crate::error::{EngineError, EngineResult};

/// Computes the rebate for a low-income taxpayer.
///
/// When `total_income` is at or below the rule's threshold, the rebate is
/// `min(tax, max_rebate)`; otherwise zero. The threshold and cap are
/// jurisdiction configuration, never hardcoded.
///
/// # Errors
///
/// Returns `InvalidInput` for negative amounts.
pub fn calculate_rebate(
    tax: Decimal,
    total_income: Decimal,
    rule: &RebateRule,
) -> EngineResult<Decimal> {
    if tax < Decimal::ZERO || total_income < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "tax/total_income".to_string(),
            message: "must be non-negative".to_string(),
        });
    }

    if total_income <= rule.income_threshold {
        Ok(tax.min(rule.max_rebate))
    } else {
        Ok(Decimal::ZERO)
    }
}
