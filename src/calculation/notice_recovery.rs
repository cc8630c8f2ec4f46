//! Notice-period shortfall recovery.

use rust_decimal::Decimal;

use crate::calculation::rounding::round_currency;
use crate::error::{EngineError, EngineResult};

/// A notice-period shortfall recovery line.
#[derive(Debug, Clone, PartialEq)]
pub struct NoticeRecovery {
    /// `notice_period_days − notice_period_served`.
    pub shortfall_days: u32,
    /// `round(last_drawn_gross / 30)`.
    pub per_day_rate: Decimal,
    /// `per_day_rate × shortfall_days`.
    pub amount: Decimal,
}

/// Computes the recovery for notice not served.
///
/// Returns `None` when the notice period was fully served (or overserved);
/// a settlement never carries a zeroed recovery line.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative gross salary.
pub fn calculate_notice_recovery(
    notice_period_days: u32,
    notice_period_served: u32,
    last_drawn_gross: Decimal,
) -> EngineResult<Option<NoticeRecovery>> {
    if last_drawn_gross < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "last_drawn_gross".to_string(),
            message: "must be non-negative".to_string(),
        });
    }

    let shortfall_days = notice_period_days.saturating_sub(notice_period_served);
    if shortfall_days == 0 {
        return Ok(None);
    }

    let per_day_rate = round_currency(last_drawn_gross / Decimal::from(30));

    Ok(Some(NoticeRecovery {
        shortfall_days,
        per_day_rate,
        amount: per_day_rate * Decimal::from(shortfall_days),
    }))
}
