//! Separation case, settlement result and the settlement state machine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// The facts of an employee separation, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparationCase {
    /// Unique identifier for the case.
    pub id: Uuid,
    /// The separating employee.
    pub employee_id: String,
    /// The employee's last working date.
    pub last_working_date: NaiveDate,
    /// Contractual notice period in days.
    pub notice_period_days: u32,
    /// Days of notice actually served.
    pub notice_period_served: u32,
    /// Completed years of service, fractional (e.g., 4.99).
    pub service_years: Decimal,
    /// Last drawn monthly basic salary.
    pub last_drawn_basic: Decimal,
    /// Last drawn monthly gross salary.
    pub last_drawn_gross: Decimal,
}

/// Which list of a settlement a line item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementItemKind {
    /// An amount payable to the employee.
    Earning,
    /// A statutory or voluntary deduction.
    Deduction,
    /// An amount recovered from the employee (notice shortfall, loans).
    Recovery,
}

/// A single line item of a settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementItem {
    /// Line item code (e.g., "gratuity_exempt", "notice_shortfall").
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// The line amount, always positive; the list it sits in gives the sign.
    pub amount: Decimal,
    /// Whether this amount is taxable in the employee's hands.
    pub taxable: bool,
}

/// The assembled full-and-final settlement.
///
/// `net_payable` is always re-derived by a full fold over the three lists;
/// mutating operations in `calculation::settlement` refold after every
/// change rather than patching the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// The separation case this settlement belongs to.
    pub case_id: Uuid,
    /// Amounts payable to the employee.
    pub earnings: Vec<SettlementItem>,
    /// Deductions withheld.
    pub deductions: Vec<SettlementItem>,
    /// Amounts recovered from the employee.
    pub recoveries: Vec<SettlementItem>,
    /// `Σ earnings − Σ deductions − Σ recoveries`.
    pub net_payable: Decimal,
}

/// The state of one departmental clearance on a separation case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearanceStatus {
    /// The department has not responded yet.
    Pending,
    /// The department has cleared the employee.
    Cleared,
    /// The department has raised an objection. Blocks progression but does
    /// not cancel the case; a human must resolve it.
    Rejected,
}

/// A departmental clearance line on a separation case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentClearance {
    /// The department giving clearance (e.g., "it", "finance", "admin").
    pub department: String,
    /// The clearance state.
    pub status: ClearanceStatus,
}

/// Returns true when every clearance in the list is `Cleared`.
///
/// An empty list counts as cleared; a case with no clearance departments
/// has nothing to wait for.
pub fn all_cleared(clearances: &[DepartmentClearance]) -> bool {
    clearances
        .iter()
        .all(|c| c.status == ClearanceStatus::Cleared)
}

/// The lifecycle state of a settlement.
///
/// Valid forward path: `Initiated → PendingClearance → PendingApproval →
/// Approved → Processed → Paid`. `Cancelled` is reachable from every state
/// except `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// The case has been opened.
    Initiated,
    /// Waiting for departmental clearances.
    PendingClearance,
    /// All clearances done; awaiting approval.
    PendingApproval,
    /// Approved for processing.
    Approved,
    /// Included in a payment run.
    Processed,
    /// Paid out. Terminal.
    Paid,
    /// Cancelled before payment. Terminal.
    Cancelled,
}

impl SettlementStatus {
    fn as_str(self) -> &'static str {
        match self {
            SettlementStatus::Initiated => "initiated",
            SettlementStatus::PendingClearance => "pending_clearance",
            SettlementStatus::PendingApproval => "pending_approval",
            SettlementStatus::Approved => "approved",
            SettlementStatus::Processed => "processed",
            SettlementStatus::Paid => "paid",
            SettlementStatus::Cancelled => "cancelled",
        }
    }

    /// Attempts the transition to `next`, returning the new state.
    ///
    /// Leaving `PendingClearance` goes through
    /// [`SettlementStatus::advance_from_clearance`], which checks the
    /// clearance list; this function covers every other edge.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for any move outside the lifecycle.
    pub fn transition(self, next: SettlementStatus) -> EngineResult<SettlementStatus> {
        use SettlementStatus::*;

        let allowed = matches!(
            (self, next),
            (Initiated, PendingClearance)
                | (PendingApproval, Approved)
                | (Approved, Processed)
                | (Processed, Paid)
        ) || (next == Cancelled && !matches!(self, Paid | Cancelled));

        if allowed {
            Ok(next)
        } else {
            Err(EngineError::InvalidTransition {
                entity: "settlement".to_string(),
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }

    /// Moves `PendingClearance → PendingApproval`, gated on every
    /// departmental clearance being `Cleared`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` when not in `PendingClearance`, and
    /// `CalculationError` when clearances are still outstanding or any has
    /// been rejected.
    pub fn advance_from_clearance(
        self,
        clearances: &[DepartmentClearance],
    ) -> EngineResult<SettlementStatus> {
        if self != SettlementStatus::PendingClearance {
            return Err(EngineError::InvalidTransition {
                entity: "settlement".to_string(),
                from: self.as_str().to_string(),
                to: "pending_approval".to_string(),
            });
        }

        if !all_cleared(clearances) {
            let blocking: Vec<&str> = clearances
                .iter()
                .filter(|c| c.status != ClearanceStatus::Cleared)
                .map(|c| c.department.as_str())
                .collect();
            return Err(EngineError::CalculationError {
                message: format!("clearances outstanding: {}", blocking.join(", ")),
            });
        }

        Ok(SettlementStatus::PendingApproval)
    }
}
