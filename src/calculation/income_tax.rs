//! Progressive income-tax calculation.
//!
//! This module walks the configured tax slabs in ascending order, consuming
//! taxable income slab by slab and recording a per-slab breakdown.

use rust_decimal::Decimal;

use crate::calculation::rounding::round_currency;
use crate::config::{TaxSlab, validate_tax_slabs};
use crate::error::{EngineError, EngineResult};

/// One consumed slab in an income-tax breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct SlabTaxLine {
    /// The inclusive lower bound of the slab.
    pub min_income: Decimal,
    /// The inclusive upper bound of the slab; `None` means unbounded.
    pub max_income: Option<Decimal>,
    /// The slab's rate as a percentage.
    pub rate: Decimal,
    /// The portion of taxable income consumed by this slab.
    pub taxable_amount: Decimal,
    /// The exact (unrounded) tax charged within this slab.
    pub tax_amount: Decimal,
}

/// The result of a progressive tax calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeTaxResult {
    /// `max(0, annual_income − standard_deduction)`.
    pub taxable_income: Decimal,
    /// The total tax, rounded half-up to the whole currency unit.
    pub tax: Decimal,
    /// Per-slab lines. Unconsumed slabs produce no entries; the consumed
    /// amounts sum exactly to `taxable_income`.
    pub breakdown: Vec<SlabTaxLine>,
}

/// Computes progressive income tax over the configured slabs.
///
/// Taxable income is `max(0, annual_income − standard_deduction)`. Slabs
/// are walked in ascending order; each slab consumes
/// `min(remaining, slab width)` at its rate, and the walk stops once the
/// remaining amount reaches zero. Per-slab tax amounts are exact; only the
/// total is rounded (half-up, whole unit).
///
/// # Errors
///
/// Returns `InvalidInput` for a negative income or standard deduction, and
/// `InvalidConfiguration` when the slab list fails validation (empty, not
/// starting at zero, gaps, overlaps, bounded last slab).
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_income_tax;
/// use payroll_engine::config::TaxSlab;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let slabs = vec![
///     TaxSlab { min_income: dec("0"), max_income: Some(dec("300000")), rate: dec("0") },
///     TaxSlab { min_income: dec("300000"), max_income: Some(dec("600000")), rate: dec("5") },
///     TaxSlab { min_income: dec("600000"), max_income: None, rate: dec("10") },
/// ];
///
/// let result = calculate_income_tax(dec("900000"), dec("50000"), &slabs).unwrap();
/// assert_eq!(result.taxable_income, dec("850000"));
/// assert_eq!(result.tax, dec("40000"));
/// ```
pub fn calculate_income_tax(
    annual_income: Decimal,
    standard_deduction: Decimal,
    slabs: &[TaxSlab],
) -> EngineResult<IncomeTaxResult> {
    if annual_income < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "annual_income".to_string(),
            message: "must be non-negative".to_string(),
        });
    }
    if standard_deduction < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "standard_deduction".to_string(),
            message: "must be non-negative".to_string(),
        });
    }

    validate_tax_slabs(slabs)?;

    let taxable_income = (annual_income - standard_deduction).max(Decimal::ZERO);

    let hundred = Decimal::ONE_HUNDRED;
    let mut remaining = taxable_income;
    let mut total = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for slab in slabs {
        if remaining <= Decimal::ZERO {
            break;
        }

        let consumed = match slab.max_income {
            Some(max) => remaining.min(max - slab.min_income),
            None => remaining,
        };
        if consumed <= Decimal::ZERO {
            continue;
        }

        let tax_amount = consumed * slab.rate / hundred;
        total += tax_amount;
        remaining -= consumed;

        breakdown.push(SlabTaxLine {
            min_income: slab.min_income,
            max_income: slab.max_income,
            rate: slab.rate,
            taxable_amount: consumed,
            tax_amount,
        });
    }

    Ok(IncomeTaxResult {
        taxable_income,
        tax: round_currency(total),
        breakdown,
    })
}
