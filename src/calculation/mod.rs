//! Calculation logic for the payroll engine.
//!
//! This module contains all the calculation functions for statutory payroll
//! processing: progressive slab income tax with surcharge, cess and rebate,
//! statutory deduction evaluation, loan amortization under flat and
//! reducing-balance conventions, bonus eligibility and proration, arrear
//! reconciliation for backdated revisions, gratuity and notice recovery,
//! full-and-final settlement assembly, fiscal year-to-date aggregation, and
//! fault-isolated batch processing.

mod amortization;
mod arrears;
mod batch;
mod bonus;
mod gratuity;
mod income_tax;
mod notice_recovery;
mod rebate;
mod rounding;
mod settlement;
mod statutory;
mod surcharge;
mod tax_liability;
mod ytd;

pub use amortization::{AmortizationSchedule, amortize};
pub use arrears::calculate_arrears;
pub use batch::{
    BatchFailure, BatchOutcome, BatchTotals, EmployeePayrollResult, process_batch,
    process_employee,
};
pub use bonus::{
    BonusBatchSummary, add_adjustment, evaluate_bonus, recompute_final, summarize_bonus_batch,
};
pub use gratuity::{GRATUITY_MIN_SERVICE_YEARS, GratuityResult, calculate_gratuity};
pub use income_tax::{IncomeTaxResult, SlabTaxLine, calculate_income_tax};
pub use notice_recovery::{NoticeRecovery, calculate_notice_recovery};
pub use rebate::calculate_rebate;
pub use rounding::round_currency;
pub use settlement::{
    GRATUITY_EXEMPT_CODE, GRATUITY_TAXABLE_CODE, LOAN_RECOVERY_PREFIX, NOTICE_SHORTFALL_CODE,
    SettlementOutcome, add_item, build_settlement, recompute_net, waive_notice_recovery,
};
pub use statutory::{DeductionLine, DeductionResult, calculate_deductions};
pub use surcharge::{calculate_cess, calculate_surcharge};
pub use tax_liability::{TaxLiability, calculate_tax_liability};
pub use ytd::{YtdSummary, fold_ytd};
