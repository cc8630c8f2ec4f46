//! Salary component and pay-period record models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a salary component adds to or subtracts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    /// The component increases pay (basic, HRA, special allowance).
    Earning,
    /// The component reduces pay (provident fund, professional tax).
    Deduction,
}

/// A named, typed, period-scoped salary amount.
///
/// Used in pairs (original, revised) by the arrear engine and as the line
/// items of a pay-period record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// Component code (e.g., "basic", "hra", "pf").
    pub code: String,
    /// Whether this component is an earning or a deduction.
    pub component_type: ComponentType,
    /// The monthly amount of this component.
    pub amount: Decimal,
}

impl SalaryComponent {
    /// Convenience constructor for an earning component.
    pub fn earning(code: &str, amount: Decimal) -> Self {
        Self {
            code: code.to_string(),
            component_type: ComponentType::Earning,
            amount,
        }
    }

    /// Convenience constructor for a deduction component.
    pub fn deduction(code: &str, amount: Decimal) -> Self {
        Self {
            code: code.to_string(),
            component_type: ComponentType::Deduction,
            amount,
        }
    }
}

/// One processed pay period for an employee, as fed to the YTD aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Calendar month of the period (1-12).
    pub month: u32,
    /// Calendar year of the period.
    pub year: i32,
    /// Earning components paid in the period.
    pub earnings: Vec<SalaryComponent>,
    /// Deduction components withheld in the period.
    pub deductions: Vec<SalaryComponent>,
    /// Income tax deducted at source in the period.
    pub tax_deducted: Decimal,
}

impl PeriodRecord {
    /// Returns the zero-based month index (`year * 12 + month - 1`) used for
    /// ordering periods and fiscal-year bounds checks.
    pub fn month_index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }
}

/// Computes `Σ earnings − Σ deductions` over a component list.
///
/// Components tagged `Earning` add, components tagged `Deduction` subtract,
/// regardless of which list they arrive in.
pub fn net_of_components(components: &[SalaryComponent]) -> Decimal {
    components.iter().fold(Decimal::ZERO, |acc, c| {
        match c.component_type {
            ComponentType::Earning => acc + c.amount,
            ComponentType::Deduction => acc - c.amount,
        }
    })
}
