//! Core data models for the payroll calculation engine.
//!
//! All entities here are plain value objects produced and consumed per
//! calculation call; the caller owns storage and identity.

mod arrear;
mod bonus;
mod employee;
mod loan;
mod salary;
mod settlement;

pub use arrear::{
    ArrearPeriod, ArrearResult, ArrearStatus, ComponentDelta, MonthlyArrearLine,
};
pub use bonus::{
    BonusAdjustment, BonusCalculationType, BonusEligibilityRecord, BonusPolicy,
    EligibilityFailure,
};
pub use employee::EmployeeSnapshot;
pub use loan::{ClosureType, Installment, InterestType, LoanAccount, LoanContract, LoanStatus};
pub use salary::{ComponentType, PeriodRecord, SalaryComponent, net_of_components};
pub use settlement::{
    ClearanceStatus, DepartmentClearance, SeparationCase, SettlementItem, SettlementItemKind,
    SettlementResult, SettlementStatus, all_cleared,
};
