//! Configuration loading and types for payroll computation.
//!
//! This module handles loading jurisdiction tax configuration from YAML
//! files and provides strongly-typed access to tax slabs, surcharge bands,
//! rebate rules and statutory deduction rules.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DeductionBase, DeductionKind, DeductionSlab, JurisdictionMetadata, RebateRule,
    StatutoryDeductionRule, StatutoryRulesConfig, SurchargeSlab, TaxConfiguration, TaxParameters,
    TaxSlab, validate_deduction_rule, validate_surcharge_slabs, validate_tax_slabs,
};
