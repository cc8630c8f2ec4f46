//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading jurisdiction
//! tax configurations from YAML (or JSON) files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    JurisdictionMetadata, StatutoryDeductionRule, StatutoryRulesConfig, TaxConfiguration,
    TaxParameters,
};

/// Loads and provides access to a jurisdiction's tax configuration.
///
/// The `ConfigLoader` reads configuration files from a directory and
/// validates them into a [`TaxConfiguration`] before any engine runs.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/in_2025/
/// ├── jurisdiction.yaml   # Jurisdiction metadata
/// ├── tax.yaml            # Slabs, standard deduction, rebate, surcharge, cess
/// └── statutory.yaml      # Statutory deduction rules
/// ```
///
/// Files may equivalently carry a `.json` extension.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/in_2025").unwrap();
/// let rule = loader.get_rule("pf").unwrap();
/// println!("Rule: {}", rule.name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TaxConfiguration,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/in_2025")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML/JSON
    /// - The assembled configuration fails validation (slab gaps, overlaps,
    ///   negative rates)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_file::<JurisdictionMetadata>(path, "jurisdiction")?;
        let tax = Self::load_file::<TaxParameters>(path, "tax")?;
        let statutory = Self::load_file::<StatutoryRulesConfig>(path, "statutory")?;

        let config = TaxConfiguration::new(metadata, tax, statutory.rules)?;

        Ok(Self { config })
    }

    /// Loads a named configuration file, trying `.yaml` then `.json`.
    fn load_file<T: serde::de::DeserializeOwned>(dir: &Path, stem: &str) -> EngineResult<T> {
        let yaml_path = dir.join(format!("{stem}.yaml"));
        if yaml_path.exists() {
            return Self::parse_yaml(&yaml_path);
        }

        let json_path = dir.join(format!("{stem}.json"));
        if json_path.exists() {
            return Self::parse_json(&json_path);
        }

        Err(EngineError::ConfigNotFound {
            path: yaml_path.display().to_string(),
        })
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn parse_json<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying validated tax configuration.
    pub fn config(&self) -> &TaxConfiguration {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        self.config.metadata()
    }

    /// Gets a statutory deduction rule by its code.
    ///
    /// # Errors
    ///
    /// Returns `RuleNotFound` if no rule carries the code.
    pub fn get_rule(&self, code: &str) -> EngineResult<&StatutoryDeductionRule> {
        self.config
            .statutory_rules()
            .iter()
            .find(|r| r.code == code)
            .ok_or_else(|| EngineError::RuleNotFound {
                code: code.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeductionKind;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/in_2025"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().code, "in_2025");
        assert_eq!(loader.metadata().fiscal_year_start_month, 4);
    }

    #[test]
    fn test_tax_parameters_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let config = loader.config();

        assert_eq!(config.standard_deduction(), dec("50000"));
        assert_eq!(config.cess_rate(), dec("4"));
        assert_eq!(config.arrear_tax_rate(), dec("30"));
        assert!(!config.slabs().is_empty());
        assert_eq!(config.slabs()[0].min_income, Decimal::ZERO);
        assert!(config.slabs().last().unwrap().max_income.is_none());
    }

    #[test]
    fn test_get_rule_pf() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let rule = loader.get_rule("pf");
        assert!(rule.is_ok());

        let rule = rule.unwrap();
        assert_eq!(rule.kind, DeductionKind::Percentage);
        assert_eq!(rule.employee_rate, dec("12"));
    }

    #[test]
    fn test_get_rule_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let result = loader.get_rule("unknown");
        assert!(result.is_err());

        match result {
            Err(EngineError::RuleNotFound { code }) => {
                assert_eq!(code, "unknown");
            }
            _ => panic!("Expected RuleNotFound error"),
        }
    }

    #[test]
    fn test_professional_tax_rule_is_slab_kind() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let rule = loader.get_rule("pt").unwrap();
        assert_eq!(rule.kind, DeductionKind::Slab);
        assert!(rule.slabs.as_deref().is_some_and(|s| !s.is_empty()));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("jurisdiction.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_surcharge_slabs_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let slabs = loader.config().surcharge_slabs();

        assert!(!slabs.is_empty());
        assert_eq!(slabs[0].min_income, dec("5000000"));
    }

    #[test]
    fn test_rebate_rule_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let rebate = loader.config().rebate().expect("rebate rule expected");

        assert_eq!(rebate.income_threshold, dec("700000"));
        assert_eq!(rebate.max_rebate, dec("25000"));
    }
}
