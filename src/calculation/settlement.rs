//! Full-and-final settlement assembly.
//!
//! Composes gratuity, notice-shortfall recovery and loan foreclosure into
//! a single settlement for a separation case. Every mutating operation
//! returns a new [`SettlementResult`] with `net_payable` re-derived by a
//! full fold over the three item lists.

use rust_decimal::Decimal;

use crate::calculation::gratuity::calculate_gratuity;
use crate::calculation::notice_recovery::calculate_notice_recovery;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ClosureType, LoanAccount, SeparationCase, SettlementItem, SettlementItemKind,
    SettlementResult,
};

/// Line item code for the tax-exempt gratuity portion.
pub const GRATUITY_EXEMPT_CODE: &str = "gratuity_exempt";
/// Line item code for the taxable gratuity portion.
pub const GRATUITY_TAXABLE_CODE: &str = "gratuity_taxable";
/// Line item code for the notice-period shortfall recovery.
pub const NOTICE_SHORTFALL_CODE: &str = "notice_shortfall";
/// Line item code prefix for loan foreclosure recoveries.
pub const LOAN_RECOVERY_PREFIX: &str = "loan_recovery";

/// A built settlement plus the loan accounts foreclosed while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementOutcome {
    /// The assembled settlement.
    pub settlement: SettlementResult,
    /// Foreclosed copies of every recoverable loan account. The input
    /// accounts are untouched.
    pub foreclosed_loans: Vec<LoanAccount>,
}

/// Assembles the full-and-final settlement for a separation case.
///
/// Earnings carry the gratuity split into its exempt and taxable portions
/// (only non-zero portions get lines). Recoveries carry the notice
/// shortfall, if any, and one line per active loan with a positive balance,
/// each recovered at its full outstanding amount and foreclosed. Loans
/// that are already closed or carry no balance are left alone.
///
/// # Errors
///
/// Returns `InvalidInput` when the case carries negative salary figures or
/// service years, or when a loan account does not belong to the case's
/// employee.
pub fn build_settlement(
    case: &SeparationCase,
    exemption_ceiling: Decimal,
    loans: &[LoanAccount],
) -> EngineResult<SettlementOutcome> {
    let mut earnings = Vec::new();
    let mut recoveries = Vec::new();

    let gratuity = calculate_gratuity(case.service_years, case.last_drawn_basic, exemption_ceiling)?;
    if gratuity.exempt_amount > Decimal::ZERO {
        earnings.push(SettlementItem {
            code: GRATUITY_EXEMPT_CODE.to_string(),
            description: "Gratuity (exempt)".to_string(),
            amount: gratuity.exempt_amount,
            taxable: false,
        });
    }
    if gratuity.taxable_amount > Decimal::ZERO {
        earnings.push(SettlementItem {
            code: GRATUITY_TAXABLE_CODE.to_string(),
            description: "Gratuity (above exemption ceiling)".to_string(),
            amount: gratuity.taxable_amount,
            taxable: true,
        });
    }

    if let Some(notice) = calculate_notice_recovery(
        case.notice_period_days,
        case.notice_period_served,
        case.last_drawn_gross,
    )? {
        recoveries.push(SettlementItem {
            code: NOTICE_SHORTFALL_CODE.to_string(),
            description: format!("Notice shortfall ({} days)", notice.shortfall_days),
            amount: notice.amount,
            taxable: false,
        });
    }

    let mut foreclosed_loans = Vec::new();
    for loan in loans {
        if loan.employee_id != case.employee_id {
            return Err(EngineError::InvalidInput {
                field: "loans".to_string(),
                message: format!(
                    "loan {} belongs to '{}', not '{}'",
                    loan.id, loan.employee_id, case.employee_id
                ),
            });
        }
        if !loan.is_recoverable() {
            continue;
        }

        recoveries.push(SettlementItem {
            code: format!("{}_{}", LOAN_RECOVERY_PREFIX, loan.id),
            description: "Loan foreclosure".to_string(),
            amount: loan.outstanding_balance,
            taxable: false,
        });
        foreclosed_loans.push(loan.close(ClosureType::Foreclosure)?);
    }

    let mut settlement = SettlementResult {
        case_id: case.id,
        earnings,
        deductions: Vec::new(),
        recoveries,
        net_payable: Decimal::ZERO,
    };
    settlement.net_payable = recompute_net(&settlement);

    Ok(SettlementOutcome {
        settlement,
        foreclosed_loans,
    })
}

/// Folds the three item lists into the net payable amount.
pub fn recompute_net(settlement: &SettlementResult) -> Decimal {
    let sum = |items: &[SettlementItem]| -> Decimal {
        items.iter().map(|item| item.amount).sum()
    };

    sum(&settlement.earnings) - sum(&settlement.deductions) - sum(&settlement.recoveries)
}

/// Returns a copy of the settlement with `item` appended to the given list
/// and the net refolded.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative item amount; the list an item sits
/// in carries its sign.
pub fn add_item(
    settlement: &SettlementResult,
    kind: SettlementItemKind,
    item: SettlementItem,
) -> EngineResult<SettlementResult> {
    if item.amount < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "item.amount".to_string(),
            message: "must be non-negative".to_string(),
        });
    }

    let mut updated = settlement.clone();
    match kind {
        SettlementItemKind::Earning => updated.earnings.push(item),
        SettlementItemKind::Deduction => updated.deductions.push(item),
        SettlementItemKind::Recovery => updated.recoveries.push(item),
    }
    updated.net_payable = recompute_net(&updated);
    Ok(updated)
}

/// Returns a copy of the settlement with the notice-shortfall recovery
/// removed and the net refolded.
///
/// Idempotent: waiving a settlement with no shortfall line returns an
/// equal copy.
pub fn waive_notice_recovery(settlement: &SettlementResult) -> SettlementResult {
    let mut updated = settlement.clone();
    updated
        .recoveries
        .retain(|item| item.code != NOTICE_SHORTFALL_CODE);
    updated.net_payable = recompute_net(&updated);
    updated
}
