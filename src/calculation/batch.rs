//! Payroll batch processing.
//!
//! Runs the tax and statutory calculators over a roster of employees with
//! per-employee fault isolation: one bad record is collected as a failure
//! and the rest of the batch continues.

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::rounding::round_currency;
use crate::calculation::statutory::{DeductionResult, calculate_deductions};
use crate::calculation::tax_liability::{TaxLiability, calculate_tax_liability};
use crate::config::TaxConfiguration;
use crate::error::{EngineError, EngineResult};
use crate::models::EmployeeSnapshot;

/// The processed payroll for one employee.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeePayrollResult {
    /// The employee this result belongs to.
    pub employee_id: String,
    /// The annual tax liability, computed on twelve months of gross pay.
    pub tax: TaxLiability,
    /// One-twelfth of the annual liability, rounded to the whole unit.
    pub monthly_tax: Decimal,
    /// Statutory deductions for the month.
    pub deductions: DeductionResult,
    /// `monthly_gross − employee deductions − monthly_tax`.
    pub monthly_net: Decimal,
}

/// One employee the batch could not process, with the error that stopped
/// them.
#[derive(Debug)]
pub struct BatchFailure {
    /// The employee whose record failed.
    pub employee_id: String,
    /// The error raised while processing the record.
    pub error: EngineError,
}

/// Aggregate money totals over the successfully processed employees.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchTotals {
    /// Sum of monthly gross pay.
    pub gross: Decimal,
    /// Sum of employee-side statutory deductions.
    pub employee_deductions: Decimal,
    /// Sum of employer-side statutory contributions.
    pub employer_contributions: Decimal,
    /// Sum of monthly tax.
    pub tax: Decimal,
    /// Sum of monthly net pay.
    pub net: Decimal,
}

/// The outcome of one batch run.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Identifier assigned to this run.
    pub run_id: Uuid,
    /// Per-employee results, in input order, failures omitted.
    pub results: Vec<EmployeePayrollResult>,
    /// Employees that failed, in input order.
    pub failures: Vec<BatchFailure>,
    /// `results.len()`.
    pub processed_count: usize,
    /// `failures.len()`.
    pub failed_count: usize,
    /// Totals over the processed employees.
    pub totals: BatchTotals,
}

/// Processes a roster of employees under one jurisdiction configuration.
///
/// Each employee is computed independently: annual tax liability on
/// `monthly_gross × 12`, statutory deductions on the monthly figures, and a
/// monthly net. An error for one employee is recorded as a failure and
/// never aborts the batch; the caller decides what to do with the failed
/// records.
pub fn process_batch(
    employees: &[EmployeeSnapshot],
    config: &TaxConfiguration,
) -> BatchOutcome {
    let run_id = Uuid::new_v4();
    info!(%run_id, employee_count = employees.len(), "starting payroll batch");

    let mut results = Vec::with_capacity(employees.len());
    let mut failures = Vec::new();
    let mut totals = BatchTotals::default();

    for employee in employees {
        match process_employee(employee, config) {
            Ok(result) => {
                totals.gross += employee.monthly_gross;
                totals.employee_deductions += result.deductions.total_employee;
                totals.employer_contributions += result.deductions.total_employer;
                totals.tax += result.monthly_tax;
                totals.net += result.monthly_net;
                results.push(result);
            }
            Err(error) => {
                warn!(%run_id, employee_id = %employee.id, %error, "employee failed in batch");
                failures.push(BatchFailure {
                    employee_id: employee.id.clone(),
                    error,
                });
            }
        }
    }

    info!(
        %run_id,
        processed = results.len(),
        failed = failures.len(),
        "payroll batch finished"
    );

    BatchOutcome {
        run_id,
        processed_count: results.len(),
        failed_count: failures.len(),
        results,
        failures,
        totals,
    }
}

/// Computes one employee's monthly payroll.
///
/// # Errors
///
/// Propagates validation errors from the tax and deduction calculators.
pub fn process_employee(
    employee: &EmployeeSnapshot,
    config: &TaxConfiguration,
) -> EngineResult<EmployeePayrollResult> {
    let annual_income = employee.monthly_gross * Decimal::from(12);
    let tax = calculate_tax_liability(annual_income, config)?;
    let monthly_tax = round_currency(tax.total / Decimal::from(12));

    let deductions = calculate_deductions(
        employee.monthly_basic,
        employee.monthly_gross,
        employee.annual_ctc,
        config.statutory_rules(),
    )?;

    let monthly_net = employee.monthly_gross - deductions.total_employee - monthly_tax;

    Ok(EmployeePayrollResult {
        employee_id: employee.id.clone(),
        tax,
        monthly_tax,
        deductions,
        monthly_net,
    })
}
