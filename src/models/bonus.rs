//! Bonus policy and per-employee bonus record models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a bonus policy derives its base amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusCalculationType {
    /// A fixed currency amount.
    Fixed,
    /// A percentage of monthly basic salary.
    PercentOfBasic,
    /// A percentage of monthly gross salary.
    PercentOfGross,
    /// A percentage of annual cost to company.
    PercentOfCtc,
    /// `(monthly gross / 30) × value` days of salary.
    DaysOfSalary,
}

/// A bonus policy: how the amount is computed and who qualifies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusPolicy {
    /// How the base amount is derived.
    pub calculation_type: BonusCalculationType,
    /// The policy value: a currency amount for `Fixed`, a percentage for the
    /// percentage types, a day count for `DaysOfSalary`.
    pub value: Decimal,
    /// Minimum whole months of service required at period end.
    #[serde(default)]
    pub min_service_months: Option<u32>,
    /// Departments eligible for this bonus; `None` allows all.
    #[serde(default)]
    pub eligible_departments: Option<Vec<String>>,
    /// Designations eligible for this bonus; `None` allows all.
    #[serde(default)]
    pub eligible_designations: Option<Vec<String>>,
    /// Minimum performance rating required; `None` skips the check.
    #[serde(default)]
    pub min_performance_rating: Option<Decimal>,
    /// Whether employees who joined after the period start are prorated.
    #[serde(default)]
    pub prorate_for_new_joiners: bool,
    /// Minimum days worked in the period below which a prorated employee
    /// becomes ineligible outright.
    #[serde(default)]
    pub min_days_for_proration: Option<u32>,
}

/// The eligibility check that disqualified an employee.
///
/// Checks run in a fixed order and the first failure wins; the failing
/// check is recorded here so the reason survives into reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "check")]
pub enum EligibilityFailure {
    /// Service at period end fell short of the policy minimum.
    InsufficientService {
        /// Months of service required.
        required: u32,
        /// Months of service completed.
        actual: u32,
    },
    /// The employee's department is not on the allow-list.
    DepartmentNotEligible {
        /// The employee's department.
        department: String,
    },
    /// The employee's designation is not on the allow-list.
    DesignationNotEligible {
        /// The employee's designation.
        designation: String,
    },
    /// The performance rating fell short of the policy minimum, or no
    /// rating exists when one is required.
    RatingBelowMinimum {
        /// The minimum rating required.
        required: Decimal,
        /// The employee's rating, if any.
        actual: Option<Decimal>,
    },
    /// Days worked fell below the proration cutoff.
    BelowMinimumDays {
        /// The minimum days required.
        required: u32,
        /// Days actually worked in the period.
        actual: u32,
    },
}

/// A manual adjustment appended to a bonus record after calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusAdjustment {
    /// Free-form adjustment type (e.g., "correction", "spot_award").
    #[serde(rename = "type")]
    pub adjustment_type: String,
    /// Why the adjustment was made.
    pub reason: String,
    /// The signed adjustment amount.
    pub amount: Decimal,
}

/// The per-employee outcome of a bonus evaluation.
///
/// Amounts are computed even when the employee is ineligible, so the record
/// shows what the bonus would have been; `final_amount` is zero in that
/// case. Invariant: `final_amount = calculated_amount + Σ adjustments` when
/// eligible, else zero — re-derived after every adjustment, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusEligibilityRecord {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// Whether every eligibility check passed.
    pub eligible: bool,
    /// The first failed check, when ineligible.
    #[serde(default)]
    pub failure: Option<EligibilityFailure>,
    /// The base amount before proration.
    pub base_amount: Decimal,
    /// The proration multiplier in `[0, 1]`.
    pub multiplier: Decimal,
    /// `round(base_amount × multiplier)`.
    pub calculated_amount: Decimal,
    /// Manual adjustments appended after calculation.
    pub adjustments: Vec<BonusAdjustment>,
    /// The payable amount.
    pub final_amount: Decimal,
}
