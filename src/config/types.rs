//! Configuration types for payroll computation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Configuration is always
//! injected into engine calls; nothing in the crate reads module-level
//! constants, so multiple jurisdictions and tenants compose cleanly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about a tax jurisdiction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JurisdictionMetadata {
    /// The jurisdiction code (e.g., "in_2025").
    pub code: String,
    /// The human-readable name of the jurisdiction/regime.
    pub name: String,
    /// The version or effective fiscal year of this configuration.
    pub version: String,
    /// The month (1-12) on which the fiscal year begins.
    pub fiscal_year_start_month: u32,
}

/// A single progressive income-tax slab.
///
/// Slabs are ordered ascending and contiguous, the first starting at zero
/// and the last unbounded (`max_income: None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// The inclusive lower bound of the slab.
    pub min_income: Decimal,
    /// The inclusive upper bound of the slab; `None` means unbounded.
    pub max_income: Option<Decimal>,
    /// The tax rate applied within this slab, as a percentage (e.g., 5 for 5%).
    pub rate: Decimal,
}

/// A surcharge band applied as a percentage of computed tax (not of income)
/// when annual income falls within the band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeSlab {
    /// The inclusive lower bound of annual income for this band.
    pub min_income: Decimal,
    /// The inclusive upper bound of annual income; `None` means unbounded.
    pub max_income: Option<Decimal>,
    /// The surcharge rate as a percentage of computed tax.
    pub rate: Decimal,
}

/// A rebate rule granting relief to low incomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateRule {
    /// Total income at or below which the rebate applies.
    pub income_threshold: Decimal,
    /// The maximum rebate amount; actual rebate never exceeds the tax itself.
    pub max_rebate: Decimal,
}

/// How a statutory deduction rule computes its amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// Employee/employer amounts are percentages of the base.
    Percentage,
    /// Employee/employer amounts are the configured values directly.
    Fixed,
    /// The employee amount is a flat currency value read from income slabs;
    /// the employer side remains a percentage of the base.
    Slab,
}

/// Which salary figure a statutory deduction rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionBase {
    /// Monthly basic salary.
    Basic,
    /// Monthly gross salary.
    Gross,
    /// Annual cost to company.
    Ctc,
}

/// A slab entry for `DeductionKind::Slab` rules.
///
/// Unlike tax slabs, the `amount` here is a flat currency value owed when
/// the base falls within the slab, not a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSlab {
    /// The inclusive lower bound of the base amount.
    pub min_base: Decimal,
    /// The inclusive upper bound of the base amount; `None` means unbounded.
    pub max_base: Option<Decimal>,
    /// The flat employee contribution for this slab.
    pub amount: Decimal,
}

/// A statutory deduction rule (provident fund, social insurance,
/// professional tax, welfare fund and similar).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryDeductionRule {
    /// Short rule code (e.g., "pf", "esi", "pt", "lwf").
    pub code: String,
    /// Human-readable rule name.
    pub name: String,
    /// How the rule computes amounts.
    pub kind: DeductionKind,
    /// Which salary figure the rule applies to.
    pub base: DeductionBase,
    /// Employee-side rate. A percentage for `Percentage`/`Slab` employer
    /// usage, a currency amount for `Fixed`.
    pub employee_rate: Decimal,
    /// Employer-side rate, same interpretation as `employee_rate`.
    pub employer_rate: Decimal,
    /// Optional cap on the base amount for percentage rules. Each side is
    /// capped independently at `cap * rate / 100`.
    #[serde(default)]
    pub cap: Option<Decimal>,
    /// Income slabs, required when `kind == Slab`.
    #[serde(default)]
    pub slabs: Option<Vec<DeductionSlab>>,
}

/// Tax parameters for a jurisdiction, as loaded from `tax.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxParameters {
    /// Progressive income-tax slabs.
    pub slabs: Vec<TaxSlab>,
    /// The standard deduction subtracted from annual income before slabbing.
    pub standard_deduction: Decimal,
    /// Optional low-income rebate rule.
    #[serde(default)]
    pub rebate: Option<RebateRule>,
    /// Surcharge bands; may be empty.
    #[serde(default)]
    pub surcharge_slabs: Vec<SurchargeSlab>,
    /// Cess rate as a percentage of (tax + surcharge).
    pub cess_rate: Decimal,
    /// Flat tax rate (percentage) applied to arrear amounts.
    pub arrear_tax_rate: Decimal,
    /// Exemption ceiling for gratuity paid on separation.
    pub gratuity_exemption_ceiling: Decimal,
}

/// Statutory rules configuration file structure (`statutory.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatutoryRulesConfig {
    /// The list of statutory deduction rules for the jurisdiction.
    pub rules: Vec<StatutoryDeductionRule>,
}

/// The complete tax configuration for one jurisdiction.
///
/// Constructed through [`TaxConfiguration::new`], which validates slab
/// coverage and rule shape before any engine sees the configuration.
/// Fields are private; use the accessor methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxConfiguration {
    /// Jurisdiction metadata.
    metadata: JurisdictionMetadata,
    /// Tax parameters (slabs, deduction, rebate, surcharge, cess).
    tax: TaxParameters,
    /// Statutory deduction rules.
    statutory_rules: Vec<StatutoryDeductionRule>,
}

impl TaxConfiguration {
    /// Creates a new validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if:
    /// - the tax slab list is empty, does not start at zero, has gaps or
    ///   overlaps, or any slab other than the last is unbounded
    /// - surcharge slabs overlap or are not sorted ascending
    /// - any rule with `kind == Slab` is missing slabs or has overlapping
    ///   slabs
    /// - any rate is negative, or the fiscal-year start month is not 1-12
    pub fn new(
        metadata: JurisdictionMetadata,
        tax: TaxParameters,
        statutory_rules: Vec<StatutoryDeductionRule>,
    ) -> EngineResult<Self> {
        if !(1..=12).contains(&metadata.fiscal_year_start_month) {
            return Err(EngineError::InvalidConfiguration {
                message: format!(
                    "fiscal_year_start_month must be 1-12, got {}",
                    metadata.fiscal_year_start_month
                ),
            });
        }

        validate_tax_slabs(&tax.slabs)?;
        validate_surcharge_slabs(&tax.surcharge_slabs)?;

        if tax.cess_rate < Decimal::ZERO
            || tax.arrear_tax_rate < Decimal::ZERO
            || tax.standard_deduction < Decimal::ZERO
        {
            return Err(EngineError::InvalidConfiguration {
                message: "cess_rate, arrear_tax_rate and standard_deduction must be non-negative"
                    .to_string(),
            });
        }

        for rule in &statutory_rules {
            validate_deduction_rule(rule)?;
        }

        Ok(Self {
            metadata,
            tax,
            statutory_rules,
        })
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns the progressive tax slabs.
    pub fn slabs(&self) -> &[TaxSlab] {
        &self.tax.slabs
    }

    /// Returns the standard deduction.
    pub fn standard_deduction(&self) -> Decimal {
        self.tax.standard_deduction
    }

    /// Returns the rebate rule, if the jurisdiction has one.
    pub fn rebate(&self) -> Option<&RebateRule> {
        self.tax.rebate.as_ref()
    }

    /// Returns the surcharge bands.
    pub fn surcharge_slabs(&self) -> &[SurchargeSlab] {
        &self.tax.surcharge_slabs
    }

    /// Returns the cess rate as a percentage of (tax + surcharge).
    pub fn cess_rate(&self) -> Decimal {
        self.tax.cess_rate
    }

    /// Returns the flat arrear tax rate as a percentage.
    pub fn arrear_tax_rate(&self) -> Decimal {
        self.tax.arrear_tax_rate
    }

    /// Returns the gratuity exemption ceiling.
    pub fn gratuity_exemption_ceiling(&self) -> Decimal {
        self.tax.gratuity_exemption_ceiling
    }

    /// Returns all statutory deduction rules.
    pub fn statutory_rules(&self) -> &[StatutoryDeductionRule] {
        &self.statutory_rules
    }

    /// Returns the month (1-12) on which the fiscal year begins.
    pub fn fiscal_year_start_month(&self) -> u32 {
        self.metadata.fiscal_year_start_month
    }
}

/// Validates that tax slabs are ascending, contiguous, start at zero and
/// end unbounded.
pub fn validate_tax_slabs(slabs: &[TaxSlab]) -> EngineResult<()> {
    if slabs.is_empty() {
        return Err(EngineError::InvalidConfiguration {
            message: "tax slab list is empty".to_string(),
        });
    }

    if slabs[0].min_income != Decimal::ZERO {
        return Err(EngineError::InvalidConfiguration {
            message: format!(
                "first tax slab must start at 0, starts at {}",
                slabs[0].min_income
            ),
        });
    }

    for (i, slab) in slabs.iter().enumerate() {
        if slab.rate < Decimal::ZERO {
            return Err(EngineError::InvalidConfiguration {
                message: format!("tax slab {} has negative rate {}", i, slab.rate),
            });
        }

        match slab.max_income {
            Some(max) => {
                if max <= slab.min_income {
                    return Err(EngineError::InvalidConfiguration {
                        message: format!(
                            "tax slab {} has max_income {} <= min_income {}",
                            i, max, slab.min_income
                        ),
                    });
                }
                let next = slabs.get(i + 1).ok_or_else(|| {
                    EngineError::InvalidConfiguration {
                        message: "last tax slab must be unbounded".to_string(),
                    }
                })?;
                if next.min_income != max {
                    return Err(EngineError::InvalidConfiguration {
                        message: format!(
                            "tax slab {} ends at {} but slab {} starts at {}",
                            i,
                            max,
                            i + 1,
                            next.min_income
                        ),
                    });
                }
            }
            None => {
                if i != slabs.len() - 1 {
                    return Err(EngineError::InvalidConfiguration {
                        message: format!("tax slab {} is unbounded but is not the last slab", i),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Validates that surcharge bands are sorted ascending and non-overlapping.
pub fn validate_surcharge_slabs(slabs: &[SurchargeSlab]) -> EngineResult<()> {
    for (i, slab) in slabs.iter().enumerate() {
        if slab.rate < Decimal::ZERO {
            return Err(EngineError::InvalidConfiguration {
                message: format!("surcharge slab {} has negative rate {}", i, slab.rate),
            });
        }
        if let Some(max) = slab.max_income {
            if max <= slab.min_income {
                return Err(EngineError::InvalidConfiguration {
                    message: format!(
                        "surcharge slab {} has max_income {} <= min_income {}",
                        i, max, slab.min_income
                    ),
                });
            }
        }
        if let Some(next) = slabs.get(i + 1) {
            match slab.max_income {
                Some(max) if next.min_income > max => {}
                _ => {
                    return Err(EngineError::InvalidConfiguration {
                        message: format!("surcharge slabs {} and {} overlap", i, i + 1),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Validates a single statutory deduction rule.
pub fn validate_deduction_rule(rule: &StatutoryDeductionRule) -> EngineResult<()> {
    if rule.employee_rate < Decimal::ZERO || rule.employer_rate < Decimal::ZERO {
        return Err(EngineError::InvalidConfiguration {
            message: format!("rule '{}' has a negative rate", rule.code),
        });
    }

    match rule.kind {
        DeductionKind::Slab => {
            let slabs = rule.slabs.as_deref().unwrap_or_default();
            if slabs.is_empty() {
                return Err(EngineError::InvalidConfiguration {
                    message: format!("slab rule '{}' has no slabs", rule.code),
                });
            }
            for (i, slab) in slabs.iter().enumerate() {
                if let Some(max) = slab.max_base {
                    if max <= slab.min_base {
                        return Err(EngineError::InvalidConfiguration {
                            message: format!(
                                "rule '{}' slab {} has max_base {} <= min_base {}",
                                rule.code, i, max, slab.min_base
                            ),
                        });
                    }
                }
                if let Some(next) = slabs.get(i + 1) {
                    match slab.max_base {
                        Some(max) if next.min_base > max => {}
                        _ => {
                            return Err(EngineError::InvalidConfiguration {
                                message: format!(
                                    "rule '{}' slabs {} and {} overlap",
                                    rule.code,
                                    i,
                                    i + 1
                                ),
                            });
                        }
                    }
                }
            }
        }
        DeductionKind::Percentage | DeductionKind::Fixed => {
            if rule.slabs.as_deref().is_some_and(|s| !s.is_empty()) {
                return Err(EngineError::InvalidConfiguration {
                    message: format!(
                        "rule '{}' has slabs but kind is not 'slab'",
                        rule.code
                    ),
                });
            }
        }
    }

    Ok(())
}
