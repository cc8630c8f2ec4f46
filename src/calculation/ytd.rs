//! Year-to-date paystub aggregation.
//!
//! Folds processed pay periods into fiscal-year-to-date totals, keyed by
//! component code. Amounts are accumulated exactly as recorded; rounding
//! happened when each period was processed.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::PeriodRecord;

/// Fiscal-year-to-date totals for one employee, up to a given period.
#[derive(Debug, Clone, PartialEq)]
pub struct YtdSummary {
    /// The month the fiscal year containing the current period starts in.
    pub fiscal_year_start_month: u32,
    /// The calendar year that fiscal year starts in.
    pub fiscal_year_start_year: i32,
    /// Number of periods folded in, the current one included.
    pub periods_counted: u32,
    /// Earning totals keyed by component code.
    pub earnings: BTreeMap<String, Decimal>,
    /// Deduction totals keyed by component code.
    pub deductions: BTreeMap<String, Decimal>,
    /// Sum of every earning total.
    pub total_earnings: Decimal,
    /// Sum of every deduction total.
    pub total_deductions: Decimal,
    /// Income tax deducted at source across the counted periods.
    pub tax_deducted: Decimal,
}

impl YtdSummary {
    /// Returns `total_earnings − total_deductions`.
    pub fn net(&self) -> Decimal {
        self.total_earnings - self.total_deductions
    }
}

/// Folds prior periods and the current one into a fiscal-YTD summary.
///
/// The fiscal year is anchored at `fiscal_year_start_month`: the current
/// period fixes which fiscal year applies, and only prior records from that
/// fiscal year's start up to the current period contribute. Records from
/// earlier fiscal years, or dated after the current period, are skipped
/// rather than rejected; callers hand over an employee's full history.
///
/// # Errors
///
/// Returns `InvalidInput` for a start month or period month outside 1-12.
pub fn fold_ytd(
    prior: &[PeriodRecord],
    current: &PeriodRecord,
    fiscal_year_start_month: u32,
) -> EngineResult<YtdSummary> {
    if !(1..=12).contains(&fiscal_year_start_month) {
        return Err(EngineError::InvalidInput {
            field: "fiscal_year_start_month".to_string(),
            message: "must be between 1 and 12".to_string(),
        });
    }
    validate_period_month(current)?;
    for record in prior {
        validate_period_month(record)?;
    }

    let fiscal_year_start_year = if current.month >= fiscal_year_start_month {
        current.year
    } else {
        current.year - 1
    };
    let fiscal_start_index =
        i64::from(fiscal_year_start_year) * 12 + i64::from(fiscal_year_start_month) - 1;
    let current_index = current.month_index();

    let mut summary = YtdSummary {
        fiscal_year_start_month,
        fiscal_year_start_year,
        periods_counted: 0,
        earnings: BTreeMap::new(),
        deductions: BTreeMap::new(),
        total_earnings: Decimal::ZERO,
        total_deductions: Decimal::ZERO,
        tax_deducted: Decimal::ZERO,
    };

    for record in prior {
        let index = record.month_index();
        if index < fiscal_start_index || index >= current_index {
            continue;
        }
        accumulate(&mut summary, record);
    }
    accumulate(&mut summary, current);

    Ok(summary)
}

fn validate_period_month(record: &PeriodRecord) -> EngineResult<()> {
    if !(1..=12).contains(&record.month) {
        return Err(EngineError::InvalidInput {
            field: "period.month".to_string(),
            message: format!("month {} is out of range", record.month),
        });
    }
    Ok(())
}

fn accumulate(summary: &mut YtdSummary, record: &PeriodRecord) {
    for component in &record.earnings {
        *summary
            .earnings
            .entry(component.code.clone())
            .or_insert(Decimal::ZERO) += component.amount;
        summary.total_earnings += component.amount;
    }
    for component in &record.deductions {
        *summary
            .deductions
            .entry(component.code.clone())
            .or_insert(Decimal::ZERO) += component.amount;
        summary.total_deductions += component.amount;
    }
    summary.tax_deducted += record.tax_deducted;
    summary.periods_counted += 1;
}
