//! Gratuity calculation for separating employees.

use rust_decimal::Decimal;

use crate::calculation::rounding::round_currency;
use crate::error::{EngineError, EngineResult};

/// Years of qualifying service required for gratuity.
pub const GRATUITY_MIN_SERVICE_YEARS: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// The outcome of a gratuity calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct GratuityResult {
    /// Whether the employee qualifies (service of five years or more).
    pub eligible: bool,
    /// `round(last_drawn_basic × 15 × service_years / 26)`; zero when
    /// ineligible.
    pub amount: Decimal,
    /// The tax-exempt portion, `min(amount, exemption_ceiling)`.
    pub exempt_amount: Decimal,
    /// The taxable portion, `max(0, amount − exemption_ceiling)`.
    pub taxable_amount: Decimal,
}

/// Computes gratuity under the 15/26 formula.
///
/// Eligibility requires `service_years >= 5` exactly; 4.99 years pays
/// nothing. The amount splits into an exempt portion up to the
/// jurisdiction's exemption ceiling and a taxable remainder.
///
/// # Errors
///
/// Returns `InvalidInput` for negative service years, basic salary or
/// ceiling.
pub fn calculate_gratuity(
    service_years: Decimal,
    last_drawn_basic: Decimal,
    exemption_ceiling: Decimal,
) -> EngineResult<GratuityResult> {
    if service_years < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "service_years".to_string(),
            message: "must be non-negative".to_string(),
        });
    }
    if last_drawn_basic < Decimal::ZERO || exemption_ceiling < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "last_drawn_basic/exemption_ceiling".to_string(),
            message: "must be non-negative".to_string(),
        });
    }

    if service_years < GRATUITY_MIN_SERVICE_YEARS {
        return Ok(GratuityResult {
            eligible: false,
            amount: Decimal::ZERO,
            exempt_amount: Decimal::ZERO,
            taxable_amount: Decimal::ZERO,
        });
    }

    let amount = round_currency(
        last_drawn_basic * Decimal::from(15) * service_years / Decimal::from(26),
    );

    Ok(GratuityResult {
        eligible: true,
        amount,
        exempt_amount: amount.min(exemption_ceiling),
        taxable_amount: (amount - exemption_ceiling).max(Decimal::ZERO),
    })
}
