//! Surcharge and cess calculation.
//!
//! Surcharge is a percentage of the computed tax (not of income), applied
//! when annual income falls within a configured band. Cess is a percentage
//! of (tax + surcharge). Both are rounded independently, half-up to the
//! whole currency unit.

use rust_decimal::Decimal;

use crate::calculation::rounding::round_currency;
use crate::config::{SurchargeSlab, validate_surcharge_slabs};
use crate::error::{EngineError, EngineResult};

/// Computes the surcharge on a tax amount.
///
/// Finds the single band containing `annual_income` and applies its rate
/// to `tax`. When no band matches, the surcharge is zero — this is a
/// documented fallback preserved from the source system, pending product
/// clarification, rather than an error.
///
/// # Errors
///
/// Returns `InvalidInput` for negative amounts and `InvalidConfiguration`
/// when the bands overlap or are unsorted.
pub fn calculate_surcharge(
    tax: Decimal,
    annual_income: Decimal,
    surcharge_slabs: &[SurchargeSlab],
) -> EngineResult<Decimal> {
    if tax < Decimal::ZERO || annual_income < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "tax/annual_income".to_string(),
            message: "must be non-negative".to_string(),
        });
    }

    validate_surcharge_slabs(surcharge_slabs)?;

    let matched = surcharge_slabs.iter().find(|slab| {
        annual_income >= slab.min_income
            && slab.max_income.is_none_or(|max| annual_income <= max)
    });

    Ok(match matched {
        Some(slab) => round_currency(tax * slab.rate / Decimal::ONE_HUNDRED),
        None => Decimal::ZERO,
    })
}

/// Computes the health-and-education cess on `tax_plus_surcharge`.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative amount or rate.
pub fn calculate_cess(tax_plus_surcharge: Decimal, cess_rate: Decimal) -> EngineResult<Decimal> {
    if tax_plus_surcharge < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "tax_plus_surcharge".to_string(),
            message: "must be non-negative".to_string(),
        });
    }
    if cess_rate < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "cess_rate".to_string(),
            message: "must be non-negative".to_string(),
        });
    }

    Ok(round_currency(
        tax_plus_surcharge * cess_rate / Decimal::ONE_HUNDRED,
    ))
}
