//! Loan contract, installment and account models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// The interest convention a loan is amortized under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestType {
    /// Flat interest on the original principal for the whole tenure.
    Flat,
    /// Simple interest; computed identically to `Flat`.
    Simple,
    /// Reducing-balance interest via the standard amortizing formula.
    Reducing,
    /// Compound interest; amortized identically to `Reducing`.
    Compound,
}

/// The terms of a loan, as agreed at sanction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanContract {
    /// The principal amount disbursed.
    pub principal: Decimal,
    /// The annual interest rate as a percentage (e.g., 12 for 12%).
    pub annual_rate: Decimal,
    /// The repayment tenure in months.
    pub tenure_months: u32,
    /// The interest convention.
    pub interest_type: InterestType,
}

/// One repayment installment in an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// The installment number, starting at 1.
    pub number: u32,
    /// The date this installment falls due.
    pub due_date: NaiveDate,
    /// The principal component of this installment.
    pub principal: Decimal,
    /// The interest component of this installment.
    pub interest: Decimal,
    /// The total amount due (`principal + interest`).
    pub total: Decimal,
}

/// The lifecycle state of a loan account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// The loan has an outstanding balance.
    Active,
    /// The loan is fully repaid or foreclosed.
    Closed,
}

/// How a closed loan was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosureType {
    /// The loan ran its full schedule.
    Completed,
    /// The balance was recovered in one sum, typically at separation.
    Foreclosure,
}

/// A loan account: a contract plus its current repayment state.
///
/// The engine does not track repayments; the caller supplies the current
/// outstanding balance. The full-and-final engine consumes active accounts
/// and produces foreclosed copies via [`LoanAccount::close`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanAccount {
    /// Unique identifier for the account.
    pub id: Uuid,
    /// The employee who holds the loan.
    pub employee_id: String,
    /// The sanctioned terms.
    pub contract: LoanContract,
    /// The current outstanding principal balance.
    pub outstanding_balance: Decimal,
    /// The lifecycle state.
    pub status: LoanStatus,
    /// How the loan was closed; `None` while active.
    pub closure_type: Option<ClosureType>,
}

impl LoanAccount {
    /// Returns a closed copy of this account with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the account is already closed.
    pub fn close(&self, closure_type: ClosureType) -> EngineResult<LoanAccount> {
        if self.status == LoanStatus::Closed {
            return Err(EngineError::InvalidTransition {
                entity: "loan".to_string(),
                from: "closed".to_string(),
                to: "closed".to_string(),
            });
        }

        Ok(LoanAccount {
            id: self.id,
            employee_id: self.employee_id.clone(),
            contract: self.contract.clone(),
            outstanding_balance: Decimal::ZERO,
            status: LoanStatus::Closed,
            closure_type: Some(closure_type),
        })
    }

    /// Returns true if the account is active with a positive balance.
    pub fn is_recoverable(&self) -> bool {
        self.status == LoanStatus::Active && self.outstanding_balance > Decimal::ZERO
    }
}
