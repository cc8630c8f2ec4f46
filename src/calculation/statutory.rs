//! Statutory deduction calculation.
//!
//! Evaluates each configured rule (provident fund, social insurance,
//! professional tax, welfare fund) independently against the employee's
//! basic/gross/CTC figures. Rules never compound against each other.

use rust_decimal::Decimal;

use crate::calculation::rounding::round_currency;
use crate::config::{
    DeductionBase, DeductionKind, StatutoryDeductionRule, validate_deduction_rule,
};
use crate::error::{EngineError, EngineResult};

/// The outcome of one statutory rule for one employee.
#[derive(Debug, Clone, PartialEq)]
pub struct DeductionLine {
    /// The rule code.
    pub code: String,
    /// The base amount the rule was applied to.
    pub base_amount: Decimal,
    /// The employee-side contribution, rounded to the whole unit.
    pub employee_amount: Decimal,
    /// The employer-side contribution, rounded to the whole unit.
    pub employer_amount: Decimal,
}

/// The outcome of evaluating all statutory rules.
#[derive(Debug, Clone, PartialEq)]
pub struct DeductionResult {
    /// One line per rule, in rule order.
    pub lines: Vec<DeductionLine>,
    /// Sum of employee-side contributions.
    pub total_employee: Decimal,
    /// Sum of employer-side contributions.
    pub total_employer: Decimal,
}

/// Evaluates statutory deduction rules against an employee's pay figures.
///
/// For each rule the base is selected by `rule.base` (basic, gross or CTC),
/// then:
/// - `Fixed`: the configured employee/employer values are the amounts.
/// - `Percentage`: `base × rate / 100` per side, each side independently
///   capped at `cap × rate / 100` when a cap is configured.
/// - `Slab`: the employee amount is the flat currency value of the slab
///   containing the base; the employer side is `employer_rate` percent of
///   the base. A base outside every slab yields an employee amount of zero
///   (documented fallback preserved from the source system).
///
/// All amounts are rounded half-up to the whole currency unit.
///
/// # Errors
///
/// Returns `InvalidInput` for negative pay figures and
/// `InvalidConfiguration` when any rule fails validation.
pub fn calculate_deductions(
    basic: Decimal,
    gross: Decimal,
    ctc: Decimal,
    rules: &[StatutoryDeductionRule],
) -> EngineResult<DeductionResult> {
    if basic < Decimal::ZERO || gross < Decimal::ZERO || ctc < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "basic/gross/ctc".to_string(),
            message: "must be non-negative".to_string(),
        });
    }

    for rule in rules {
        validate_deduction_rule(rule)?;
    }

    let hundred = Decimal::ONE_HUNDRED;
    let mut lines = Vec::with_capacity(rules.len());
    let mut total_employee = Decimal::ZERO;
    let mut total_employer = Decimal::ZERO;

    for rule in rules {
        let base = match rule.base {
            DeductionBase::Basic => basic,
            DeductionBase::Gross => gross,
            DeductionBase::Ctc => ctc,
        };

        let (employee_amount, employer_amount) = match rule.kind {
            DeductionKind::Fixed => (
                round_currency(rule.employee_rate),
                round_currency(rule.employer_rate),
            ),
            DeductionKind::Percentage => {
                let employee = percentage_side(base, rule.employee_rate, rule.cap);
                let employer = percentage_side(base, rule.employer_rate, rule.cap);
                (employee, employer)
            }
            DeductionKind::Slab => {
                let slabs = rule.slabs.as_deref().unwrap_or_default();
                let employee = slabs
                    .iter()
                    .find(|s| base >= s.min_base && s.max_base.is_none_or(|max| base <= max))
                    .map(|s| round_currency(s.amount))
                    .unwrap_or(Decimal::ZERO);
                let employer = round_currency(base * rule.employer_rate / hundred);
                (employee, employer)
            }
        };

        total_employee += employee_amount;
        total_employer += employer_amount;

        lines.push(DeductionLine {
            code: rule.code.clone(),
            base_amount: base,
            employee_amount,
            employer_amount,
        });
    }

    Ok(DeductionResult {
        lines,
        total_employee,
        total_employer,
    })
}

/// One side of a percentage rule: `base × rate / 100`, capped at
/// `cap × rate / 100` when a cap is configured.
fn percentage_side(base: Decimal, rate: Decimal, cap: Option<Decimal>) -> Decimal {
    let hundred = Decimal::ONE_HUNDRED;
    let mut amount = base * rate / hundred;
    if let Some(cap) = cap {
        amount = amount.min(cap * rate / hundred);
    }
    round_currency(amount)
}
