//! Arrear result models and the arrear lifecycle state machine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::ComponentType;

/// The lifecycle state of an arrear record.
///
/// Valid forward path: `Calculated → PendingApproval → Approved →
/// Processed → Paid`. `Cancelled` is terminal and reachable from any state
/// except `Processed` and `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrearStatus {
    /// The arrear has been computed but not yet submitted.
    Calculated,
    /// Awaiting approval.
    PendingApproval,
    /// Approved for payroll processing.
    Approved,
    /// Included in a payroll run.
    Processed,
    /// Paid out.
    Paid,
    /// Cancelled before processing. Terminal.
    Cancelled,
}

impl ArrearStatus {
    fn as_str(self) -> &'static str {
        match self {
            ArrearStatus::Calculated => "calculated",
            ArrearStatus::PendingApproval => "pending_approval",
            ArrearStatus::Approved => "approved",
            ArrearStatus::Processed => "processed",
            ArrearStatus::Paid => "paid",
            ArrearStatus::Cancelled => "cancelled",
        }
    }

    /// Attempts the transition to `next`, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for any move outside the lifecycle,
    /// including cancelling a `Processed` or `Paid` arrear.
    pub fn transition(self, next: ArrearStatus) -> EngineResult<ArrearStatus> {
        use ArrearStatus::*;

        let allowed = matches!(
            (self, next),
            (Calculated, PendingApproval)
                | (PendingApproval, Approved)
                | (Approved, Processed)
                | (Processed, Paid)
                | (Calculated, Cancelled)
                | (PendingApproval, Cancelled)
                | (Approved, Cancelled)
        );

        if allowed {
            Ok(next)
        } else {
            Err(EngineError::InvalidTransition {
                entity: "arrear".to_string(),
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }
}

/// The inclusive backdated month range an arrear covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrearPeriod {
    /// First month of the range (1-12).
    pub from_month: u32,
    /// Year of the first month.
    pub from_year: i32,
    /// Last month of the range (1-12), inclusive.
    pub to_month: u32,
    /// Year of the last month.
    pub to_year: i32,
}

impl ArrearPeriod {
    /// Returns the inclusive number of months in the range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a month is outside 1-12 or the range ends
    /// before it begins.
    pub fn months_count(&self) -> EngineResult<u32> {
        if !(1..=12).contains(&self.from_month) || !(1..=12).contains(&self.to_month) {
            return Err(EngineError::InvalidInput {
                field: "period".to_string(),
                message: "months must be 1-12".to_string(),
            });
        }

        let span = (i64::from(self.to_year) * 12 + i64::from(self.to_month))
            - (i64::from(self.from_year) * 12 + i64::from(self.from_month));
        if span < 0 {
            return Err(EngineError::InvalidInput {
                field: "period".to_string(),
                message: "range ends before it begins".to_string(),
            });
        }

        Ok(span as u32 + 1)
    }
}

/// The per-component difference between original and revised pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDelta {
    /// Component code.
    pub code: String,
    /// Earning or deduction.
    pub component_type: ComponentType,
    /// The monthly amount before revision (0 when newly introduced).
    pub original_amount: Decimal,
    /// The monthly amount after revision (0 when removed).
    pub revised_amount: Decimal,
    /// `revised_amount − original_amount`.
    pub difference: Decimal,
}

/// One month's line of the arrear statement breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyArrearLine {
    /// Calendar month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Net monthly pay under the superseded components.
    pub original_net: Decimal,
    /// Net monthly pay under the revised components.
    pub revised_net: Decimal,
    /// `revised_net − original_net`.
    pub difference: Decimal,
}

/// The computed arrear for a backdated salary revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrearResult {
    /// Inclusive number of months covered.
    pub period_months: u32,
    /// Per-component deltas, sorted by code.
    pub component_deltas: Vec<ComponentDelta>,
    /// Month-by-month statement lines.
    pub monthly_breakdown: Vec<MonthlyArrearLine>,
    /// `net monthly delta × period_months`.
    pub gross_arrear: Decimal,
    /// Flat-rate tax on the gross arrear, rounded to the whole unit.
    pub tax_on_arrear: Decimal,
    /// `gross_arrear − tax_on_arrear`.
    pub net_arrear: Decimal,
}
