//! Bonus eligibility evaluation, proration and adjustment handling.
//!
//! Eligibility checks run in a fixed order and the first failure wins, but
//! the amount calculation still runs so an ineligible record shows what the
//! bonus would have been. Totals are never cached: `final_amount` and the
//! batch summary are re-derived from the underlying lists after every
//! mutation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculation::rounding::round_currency;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BonusAdjustment, BonusCalculationType, BonusEligibilityRecord, BonusPolicy,
    EligibilityFailure, EmployeeSnapshot,
};

/// Evaluates bonus eligibility and amount for one employee.
///
/// Checks, in order: minimum service months (joining date to period end),
/// department allow-list, designation allow-list, minimum performance
/// rating, and — when proration applies — the minimum-days cutoff. The
/// first failure is recorded and makes the employee ineligible, but the
/// base amount, multiplier and calculated amount are still computed.
///
/// Proration applies only when the policy enables it and the employee
/// joined after the period start; the multiplier is `days worked / total
/// period days`, clamped to `[0, 1]`.
///
/// # Errors
///
/// Returns `InvalidInput` when the period is reversed or the policy value
/// is negative.
pub fn evaluate_bonus(
    employee: &EmployeeSnapshot,
    policy: &BonusPolicy,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> EngineResult<BonusEligibilityRecord> {
    if period_end < period_start {
        return Err(EngineError::InvalidInput {
            field: "period".to_string(),
            message: "period_end is before period_start".to_string(),
        });
    }
    if policy.value < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "policy.value".to_string(),
            message: "must be non-negative".to_string(),
        });
    }

    let mut failure = eligibility_failure(employee, policy, period_end);

    let base_amount = base_amount(employee, policy);
    let (multiplier, days_worked) = proration(employee, policy, period_start, period_end);

    // The proration cutoff can still disqualify an otherwise eligible
    // employee; an earlier failure keeps precedence.
    if failure.is_none()
        && let Some(min_days) = policy.min_days_for_proration
        && policy.prorate_for_new_joiners
        && employee.joining_date > period_start
        && days_worked < min_days
    {
        failure = Some(EligibilityFailure::BelowMinimumDays {
            required: min_days,
            actual: days_worked,
        });
    }

    let calculated_amount = round_currency(base_amount * multiplier);
    let eligible = failure.is_none();

    let mut record = BonusEligibilityRecord {
        employee_id: employee.id.clone(),
        eligible,
        failure,
        base_amount,
        multiplier,
        calculated_amount,
        adjustments: Vec::new(),
        final_amount: Decimal::ZERO,
    };
    recompute_final(&mut record);

    Ok(record)
}

/// Runs the ordered eligibility checks, returning the first failure.
fn eligibility_failure(
    employee: &EmployeeSnapshot,
    policy: &BonusPolicy,
    period_end: NaiveDate,
) -> Option<EligibilityFailure> {
    if let Some(required) = policy.min_service_months {
        let actual = employee.service_months(period_end);
        if actual < required {
            return Some(EligibilityFailure::InsufficientService { required, actual });
        }
    }

    if let Some(departments) = &policy.eligible_departments
        && !departments.contains(&employee.department)
    {
        return Some(EligibilityFailure::DepartmentNotEligible {
            department: employee.department.clone(),
        });
    }

    if let Some(designations) = &policy.eligible_designations
        && !designations.contains(&employee.designation)
    {
        return Some(EligibilityFailure::DesignationNotEligible {
            designation: employee.designation.clone(),
        });
    }

    if let Some(required) = policy.min_performance_rating {
        match employee.performance_rating {
            Some(actual) if actual >= required => {}
            actual => {
                return Some(EligibilityFailure::RatingBelowMinimum { required, actual });
            }
        }
    }

    None
}

/// Derives the base amount from the policy's calculation type.
fn base_amount(employee: &EmployeeSnapshot, policy: &BonusPolicy) -> Decimal {
    let hundred = Decimal::ONE_HUNDRED;
    match policy.calculation_type {
        BonusCalculationType::Fixed => policy.value,
        BonusCalculationType::PercentOfBasic => employee.monthly_basic * policy.value / hundred,
        BonusCalculationType::PercentOfGross => employee.monthly_gross * policy.value / hundred,
        BonusCalculationType::PercentOfCtc => employee.annual_ctc * policy.value / hundred,
        BonusCalculationType::DaysOfSalary => {
            employee.monthly_gross / Decimal::from(30) * policy.value
        }
    }
}

/// Returns the proration multiplier and the days worked in the period.
fn proration(
    employee: &EmployeeSnapshot,
    policy: &BonusPolicy,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> (Decimal, u32) {
    let total_days = (period_end - period_start).num_days() + 1;
    let worked_from = employee.joining_date.max(period_start);
    let days_worked = ((period_end - worked_from).num_days() + 1).max(0);

    if !policy.prorate_for_new_joiners || employee.joining_date <= period_start {
        return (Decimal::ONE, days_worked as u32);
    }

    let multiplier = (Decimal::from(days_worked) / Decimal::from(total_days))
        .clamp(Decimal::ZERO, Decimal::ONE);
    (multiplier, days_worked as u32)
}

/// Re-derives `final_amount` from the record's current state.
///
/// `final_amount = calculated_amount + Σ adjustments` when eligible, else
/// zero. Called after every mutation; never patched incrementally.
pub fn recompute_final(record: &mut BonusEligibilityRecord) {
    record.final_amount = if record.eligible {
        record.calculated_amount
            + record
                .adjustments
                .iter()
                .map(|a| a.amount)
                .sum::<Decimal>()
    } else {
        Decimal::ZERO
    };
}

/// Appends a manual adjustment and re-derives the final amount.
pub fn add_adjustment(record: &mut BonusEligibilityRecord, adjustment: BonusAdjustment) {
    record.adjustments.push(adjustment);
    recompute_final(record);
}

/// Aggregate statistics over a bonus batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BonusBatchSummary {
    /// Number of eligible records.
    pub eligible_count: usize,
    /// Number of ineligible records.
    pub ineligible_count: usize,
    /// Sum of eligible employees' final amounts.
    pub total: Decimal,
    /// Mean final amount over eligible employees; zero when none.
    pub average: Decimal,
    /// Smallest eligible final amount; zero when none.
    pub min: Decimal,
    /// Largest eligible final amount; zero when none.
    pub max: Decimal,
}

/// Re-derives batch statistics from the full record list.
///
/// Statistics cover eligible employees' `final_amount` only. Call again
/// after any record mutation; the summary is never cached.
pub fn summarize_bonus_batch(records: &[BonusEligibilityRecord]) -> BonusBatchSummary {
    let eligible: Vec<Decimal> = records
        .iter()
        .filter(|r| r.eligible)
        .map(|r| r.final_amount)
        .collect();

    let eligible_count = eligible.len();
    let total: Decimal = eligible.iter().copied().sum();

    BonusBatchSummary {
        eligible_count,
        ineligible_count: records.len() - eligible_count,
        total,
        average: if eligible_count == 0 {
            Decimal::ZERO
        } else {
            total / Decimal::from(eligible_count as u64)
        },
        min: eligible.iter().copied().min().unwrap_or(Decimal::ZERO),
        max: eligible.iter().copied().max().unwrap_or(Decimal::ZERO),
    }
}
