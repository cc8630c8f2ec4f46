//! Arrear calculation for backdated salary revisions.
//!
//! Reconciles an original and a revised component list over an inclusive
//! month range. The tax on the arrear uses the jurisdiction's flat arrear
//! rate, not a re-run of the progressive calculator — a modeling choice
//! preserved from the source system.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::calculation::rounding::round_currency;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ArrearPeriod, ArrearResult, ComponentDelta, ComponentType, MonthlyArrearLine,
    SalaryComponent, net_of_components,
};

/// Computes the arrear owed after a backdated salary revision.
///
/// For each component code present in either list the difference is
/// `revised − original` (a missing side counts as zero). The net monthly
/// delta is `Σ earning deltas − Σ deduction deltas`; the gross arrear is
/// that delta times the inclusive month count, the tax is the flat
/// `arrear_tax_rate` percentage rounded to the whole unit, and the net is
/// gross minus tax. The monthly breakdown lists original/revised/difference
/// net pay for every month in range.
///
/// Pure function: same inputs always reproduce the same breakdown.
///
/// # Errors
///
/// Returns `InvalidInput` for an invalid period, a negative tax rate, or a
/// component code tagged as an earning on one side and a deduction on the
/// other.
pub fn calculate_arrears(
    original: &[SalaryComponent],
    revised: &[SalaryComponent],
    period: ArrearPeriod,
    arrear_tax_rate: Decimal,
) -> EngineResult<ArrearResult> {
    let period_months = period.months_count()?;

    if arrear_tax_rate < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "arrear_tax_rate".to_string(),
            message: "must be non-negative".to_string(),
        });
    }

    let component_deltas = component_deltas(original, revised)?;

    let original_net = net_of_components(original);
    let revised_net = net_of_components(revised);
    let net_monthly_delta = revised_net - original_net;

    let gross_arrear = net_monthly_delta * Decimal::from(period_months);
    let tax_on_arrear = round_currency(gross_arrear * arrear_tax_rate / Decimal::ONE_HUNDRED);
    let net_arrear = gross_arrear - tax_on_arrear;

    let mut monthly_breakdown = Vec::with_capacity(period_months as usize);
    let mut month = period.from_month;
    let mut year = period.from_year;
    for _ in 0..period_months {
        monthly_breakdown.push(MonthlyArrearLine {
            month,
            year,
            original_net,
            revised_net,
            difference: net_monthly_delta,
        });
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }

    Ok(ArrearResult {
        period_months,
        component_deltas,
        monthly_breakdown,
        gross_arrear,
        tax_on_arrear,
        net_arrear,
    })
}

/// Builds per-component deltas for every code in either list, sorted by
/// code.
fn component_deltas(
    original: &[SalaryComponent],
    revised: &[SalaryComponent],
) -> EngineResult<Vec<ComponentDelta>> {
    let mut merged: BTreeMap<&str, (Option<&SalaryComponent>, Option<&SalaryComponent>)> =
        BTreeMap::new();

    for component in original {
        merged.entry(&component.code).or_default().0 = Some(component);
    }
    for component in revised {
        merged.entry(&component.code).or_default().1 = Some(component);
    }

    let mut deltas = Vec::with_capacity(merged.len());
    for (code, (original, revised)) in merged {
        let component_type = match (original, revised) {
            (Some(o), Some(r)) if o.component_type != r.component_type => {
                return Err(EngineError::InvalidInput {
                    field: "components".to_string(),
                    message: format!(
                        "component '{}' changes type between original and revised",
                        code
                    ),
                });
            }
            (Some(c), _) | (None, Some(c)) => c.component_type,
            (None, None) => unreachable!("merged map entries always have one side"),
        };

        let original_amount = original.map_or(Decimal::ZERO, |c| c.amount);
        let revised_amount = revised.map_or(Decimal::ZERO, |c| c.amount);

        deltas.push(ComponentDelta {
            code: code.to_string(),
            component_type,
            original_amount,
            revised_amount,
            difference: revised_amount - original_amount,
        });
    }

    Ok(deltas)
}
