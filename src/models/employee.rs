//! Employee snapshot model.
//!
//! The engine never looks employees up; the caller resolves the employee
//! master record and passes this plain snapshot into each calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time snapshot of the employee fields the engines consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSnapshot {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's department code.
    pub department: String,
    /// The employee's designation code.
    pub designation: String,
    /// The date the employee joined.
    pub joining_date: NaiveDate,
    /// The most recent performance rating, if one exists.
    #[serde(default)]
    pub performance_rating: Option<Decimal>,
    /// Monthly basic salary.
    pub monthly_basic: Decimal,
    /// Monthly gross salary.
    pub monthly_gross: Decimal,
    /// Annual cost to company.
    pub annual_ctc: Decimal,
}

impl EmployeeSnapshot {
    /// Returns the number of whole months of service completed between the
    /// joining date and `as_of`. A partial month does not count.
    pub fn service_months(&self, as_of: NaiveDate) -> u32 {
        use chrono::Datelike;

        if as_of < self.joining_date {
            return 0;
        }

        let mut months = (as_of.year() - self.joining_date.year()) * 12
            + (as_of.month() as i32 - self.joining_date.month() as i32);
        if as_of.day() < self.joining_date.day() {
            months -= 1;
        }
        months.max(0) as u32
    }
}
