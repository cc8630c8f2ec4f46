//! Loan amortization schedule generation.
//!
//! Supports four interest conventions. Flat and simple interest spread an
//! up-front interest figure evenly; reducing and compound use the standard
//! amortizing-loan formula with interest accruing on the outstanding
//! balance. In every convention the final installment absorbs the rounding
//! remainder so the principal components sum exactly to the principal.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::calculation::rounding::round_currency;
use crate::error::{EngineError, EngineResult};
use crate::models::{Installment, InterestType, LoanContract};

/// A complete amortization schedule for a loan.
#[derive(Debug, Clone, PartialEq)]
pub struct AmortizationSchedule {
    /// The recurring installment amount.
    pub emi: Decimal,
    /// Total interest over the tenure.
    pub total_interest: Decimal,
    /// Total amount payable (`principal + total_interest`).
    pub total_payable: Decimal,
    /// The ordered installments, numbered from 1.
    pub installments: Vec<Installment>,
}

/// Generates the amortization schedule for a loan.
///
/// Installment `k` falls due `k` months after `disbursement_date`. If the
/// disbursement date is confirmed later, call this function again with the
/// new anchor; the schedule is regenerated, not shifted.
///
/// Conventions:
/// - `annual_rate == 0`: zero interest regardless of `interest_type`; the
///   principal is split into equal whole-unit installments with the last
///   absorbing the remainder.
/// - `Flat` / `Simple`: `total_interest = principal × rate/100 ×
///   tenure/12`, rounded to the whole unit; each installment carries an
///   equal slice of principal and of interest.
/// - `Reducing` / `Compound`: `EMI = P·r·(1+r)^n / ((1+r)^n − 1)` with
///   monthly rate `r = rate/1200`; per-installment interest is the rounded
///   charge on the outstanding balance, and the final installment clears
///   the balance exactly.
///
/// # Errors
///
/// Returns `InvalidInput` for a non-positive principal, zero tenure or
/// negative rate, and `CalculationError` if a due date overflows the
/// calendar.
pub fn amortize(
    contract: &LoanContract,
    disbursement_date: NaiveDate,
) -> EngineResult<AmortizationSchedule> {
    if contract.principal <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "principal".to_string(),
            message: "must be positive".to_string(),
        });
    }
    if contract.tenure_months == 0 {
        return Err(EngineError::InvalidInput {
            field: "tenure_months".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    if contract.annual_rate < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "annual_rate".to_string(),
            message: "must be non-negative".to_string(),
        });
    }

    if contract.annual_rate.is_zero() {
        return zero_rate_schedule(contract, disbursement_date);
    }

    match contract.interest_type {
        InterestType::Flat | InterestType::Simple => flat_schedule(contract, disbursement_date),
        InterestType::Reducing | InterestType::Compound => {
            reducing_schedule(contract, disbursement_date)
        }
    }
}

/// Equal whole-unit principal slices, no interest.
fn zero_rate_schedule(
    contract: &LoanContract,
    disbursement_date: NaiveDate,
) -> EngineResult<AmortizationSchedule> {
    let n = contract.tenure_months;
    let slice = (contract.principal / Decimal::from(n)).trunc();
    let last = contract.principal - slice * Decimal::from(n - 1);

    let mut installments = Vec::with_capacity(n as usize);
    for k in 1..=n {
        let principal = if k == n { last } else { slice };
        installments.push(Installment {
            number: k,
            due_date: due_date(disbursement_date, k)?,
            principal,
            interest: Decimal::ZERO,
            total: principal,
        });
    }

    Ok(AmortizationSchedule {
        emi: slice,
        total_interest: Decimal::ZERO,
        total_payable: contract.principal,
        installments,
    })
}

/// Flat/simple interest: one up-front interest figure spread evenly.
fn flat_schedule(
    contract: &LoanContract,
    disbursement_date: NaiveDate,
) -> EngineResult<AmortizationSchedule> {
    let n = contract.tenure_months;
    let n_dec = Decimal::from(n);

    let total_interest = round_currency(
        contract.principal * contract.annual_rate * Decimal::from(n)
            / Decimal::from(1200),
    );
    let total_payable = contract.principal + total_interest;
    let emi = round_currency(total_payable / n_dec);

    let principal_slice = (contract.principal / n_dec).trunc();
    let interest_slice = (total_interest / n_dec).trunc();
    let last_principal = contract.principal - principal_slice * Decimal::from(n - 1);
    let last_interest = total_interest - interest_slice * Decimal::from(n - 1);

    let mut installments = Vec::with_capacity(n as usize);
    for k in 1..=n {
        let (principal, interest) = if k == n {
            (last_principal, last_interest)
        } else {
            (principal_slice, interest_slice)
        };
        installments.push(Installment {
            number: k,
            due_date: due_date(disbursement_date, k)?,
            principal,
            interest,
            total: principal + interest,
        });
    }

    Ok(AmortizationSchedule {
        emi,
        total_interest,
        total_payable,
        installments,
    })
}

/// Reducing-balance amortization with the standard EMI formula.
fn reducing_schedule(
    contract: &LoanContract,
    disbursement_date: NaiveDate,
) -> EngineResult<AmortizationSchedule> {
    let n = contract.tenure_months;
    let monthly_rate = contract.annual_rate / Decimal::from(1200);
    let one_plus_r = Decimal::ONE + monthly_rate;

    // (1+r)^n by repeated multiplication; tenures are small enough that
    // precision loss stays well below a currency unit.
    let mut factor = Decimal::ONE;
    for _ in 0..n {
        factor *= one_plus_r;
    }

    let emi = round_currency(
        contract.principal * monthly_rate * factor / (factor - Decimal::ONE),
    );

    let mut installments = Vec::with_capacity(n as usize);
    let mut balance = contract.principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_payable = Decimal::ZERO;

    for k in 1..=n {
        let interest = round_currency(balance * monthly_rate);
        let (principal, total) = if k == n {
            // The final installment clears the balance exactly.
            (balance, balance + interest)
        } else {
            // Rounding can leave the balance short of a full principal
            // slice near the end of the tenure; never collect past it.
            let principal = (emi - interest).min(balance);
            (principal, principal + interest)
        };

        balance -= principal;
        total_interest += interest;
        total_payable += total;

        installments.push(Installment {
            number: k,
            due_date: due_date(disbursement_date, k)?,
            principal,
            interest,
            total,
        });
    }

    Ok(AmortizationSchedule {
        emi,
        total_interest,
        total_payable,
        installments,
    })
}

fn due_date(disbursement_date: NaiveDate, k: u32) -> EngineResult<NaiveDate> {
    disbursement_date
        .checked_add_months(Months::new(k))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("due date overflow at installment {k}"),
        })
}
