//! Full annual tax liability composition.
//!
//! Ties the slab calculator, rebate, surcharge and cess together in the
//! order a payroll run needs: base tax, rebate relief, surcharge on the
//! post-rebate tax, cess on (tax + surcharge).

use rust_decimal::Decimal;

use crate::calculation::income_tax::{SlabTaxLine, calculate_income_tax};
use crate::calculation::rebate::calculate_rebate;
use crate::calculation::surcharge::{calculate_cess, calculate_surcharge};
use crate::config::TaxConfiguration;
use crate::error::EngineResult;

/// The fully composed annual tax liability for one employee.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxLiability {
    /// Income after the standard deduction.
    pub taxable_income: Decimal,
    /// Tax from the progressive slabs, before relief.
    pub base_tax: Decimal,
    /// Per-slab breakdown of `base_tax`.
    pub breakdown: Vec<SlabTaxLine>,
    /// Rebate granted under the jurisdiction's low-income rule.
    pub rebate: Decimal,
    /// `base_tax − rebate`, floored at zero.
    pub tax_after_rebate: Decimal,
    /// Surcharge on the post-rebate tax.
    pub surcharge: Decimal,
    /// Cess on `tax_after_rebate + surcharge`.
    pub cess: Decimal,
    /// `tax_after_rebate + surcharge + cess`.
    pub total: Decimal,
}

/// Computes the complete annual tax liability under a jurisdiction's
/// configuration.
///
/// # Errors
///
/// Propagates validation and configuration errors from the underlying
/// calculators.
pub fn calculate_tax_liability(
    annual_income: Decimal,
    config: &TaxConfiguration,
) -> EngineResult<TaxLiability> {
    let income_tax =
        calculate_income_tax(annual_income, config.standard_deduction(), config.slabs())?;

    let rebate = match config.rebate() {
        Some(rule) => calculate_rebate(income_tax.tax, annual_income, rule)?,
        None => Decimal::ZERO,
    };
    let tax_after_rebate = (income_tax.tax - rebate).max(Decimal::ZERO);

    let surcharge =
        calculate_surcharge(tax_after_rebate, annual_income, config.surcharge_slabs())?;
    let cess = calculate_cess(tax_after_rebate + surcharge, config.cess_rate())?;

    Ok(TaxLiability {
        taxable_income: income_tax.taxable_income,
        base_tax: income_tax.tax,
        breakdown: income_tax.breakdown,
        rebate,
        tax_after_rebate,
        surcharge,
        cess,
        total: tax_after_rebate + surcharge + cess,
    })
}
