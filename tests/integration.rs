//! Comprehensive integration tests for the payroll engine.
//!
//! This test suite covers the end-to-end calculation scenarios including:
//! - Progressive income tax with rebate, surcharge and cess
//! - Statutory deductions under the shipped jurisdiction configuration
//! - Loan amortization under flat and reducing-balance conventions
//! - Bonus eligibility and proration
//! - Arrear reconciliation for backdated revisions
//! - Full-and-final settlement with gratuity, notice recovery and
//!   loan foreclosure
//! - Year-to-date aggregation across a fiscal year
//! - Batch processing with per-employee fault isolation
//! - Property-based invariants

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use payroll_engine::calculation::{
    amortize, build_settlement, calculate_arrears, calculate_deductions, calculate_gratuity,
    calculate_tax_liability, evaluate_bonus, fold_ytd, process_batch, round_currency,
    waive_notice_recovery,
};
use payroll_engine::config::{ConfigLoader, TaxConfiguration};
use payroll_engine::error::EngineError;
use payroll_engine::models::{
    ArrearPeriod, BonusCalculationType, BonusPolicy, ClosureType, EmployeeSnapshot, InterestType,
    LoanAccount, LoanContract, LoanStatus, PeriodRecord, SalaryComponent, SeparationCase,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> TaxConfiguration {
    ConfigLoader::load("./config/in_2025")
        .expect("Failed to load config")
        .config()
        .clone()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn employee(id: &str, basic: &str, gross: &str, joining: NaiveDate) -> EmployeeSnapshot {
    EmployeeSnapshot {
        id: id.to_string(),
        department: "engineering".to_string(),
        designation: "engineer".to_string(),
        joining_date: joining,
        performance_rating: Some(dec("4.0")),
        monthly_basic: dec(basic),
        monthly_gross: dec(gross),
        annual_ctc: dec(gross) * dec("14"),
    }
}

fn separation_case(service_years: &str, served: u32) -> SeparationCase {
    SeparationCase {
        id: Uuid::new_v4(),
        employee_id: "emp_001".to_string(),
        last_working_date: date(2025, 6, 30),
        notice_period_days: 60,
        notice_period_served: served,
        service_years: dec(service_years),
        last_drawn_basic: dec("50000"),
        last_drawn_gross: dec("90000"),
    }
}

// =============================================================================
// Income Tax
// =============================================================================

#[test]
fn test_mid_income_tax_liability() {
    let config = load_config();
    let liability = calculate_tax_liability(dec("900000"), &config).unwrap();

    // Taxable 850000: 0 + 15000 + 25000 = 40000, plus 4% cess.
    assert_eq!(liability.taxable_income, dec("850000"));
    assert_eq!(liability.base_tax, dec("40000"));
    assert_eq!(liability.rebate, Decimal::ZERO);
    assert_eq!(liability.surcharge, Decimal::ZERO);
    assert_eq!(liability.cess, dec("1600"));
    assert_eq!(liability.total, dec("41600"));
}

#[test]
fn test_low_income_fully_rebated() {
    let config = load_config();
    let liability = calculate_tax_liability(dec("650000"), &config).unwrap();

    assert!(liability.base_tax > Decimal::ZERO);
    assert_eq!(liability.rebate, liability.base_tax);
    assert_eq!(liability.total, Decimal::ZERO);
}

#[test]
fn test_high_income_surcharge_and_cess() {
    let config = load_config();
    let liability = calculate_tax_liability(dec("6000000"), &config).unwrap();

    // Taxable 5950000: 15000 + 30000 + 45000 + 60000 + 1335000 = 1485000.
    assert_eq!(liability.base_tax, dec("1485000"));
    // Income sits in the 5M-10M surcharge band at 10%.
    assert_eq!(liability.surcharge, dec("148500"));
    assert_eq!(liability.cess, dec("65340"));
    assert_eq!(liability.total, dec("1698840"));
}

#[test]
fn test_slab_breakdown_covers_taxable_income() {
    let config = load_config();
    let liability = calculate_tax_liability(dec("1400000"), &config).unwrap();

    let covered: Decimal = liability.breakdown.iter().map(|l| l.taxable_amount).sum();
    assert_eq!(covered, liability.taxable_income);
}

// =============================================================================
// Statutory Deductions
// =============================================================================

#[test]
fn test_statutory_deductions_under_shipped_rules() {
    let config = load_config();
    let result = calculate_deductions(
        dec("50000"),
        dec("80000"),
        dec("1200000"),
        config.statutory_rules(),
    )
    .unwrap();

    assert_eq!(result.lines.len(), 4);
    // PF capped at a 15000 basic: 1800 both sides.
    assert_eq!(result.lines[0].code, "pf");
    assert_eq!(result.lines[0].employee_amount, dec("1800"));
    // ESI capped at a 21000 gross: 158 employee, 683 employer.
    assert_eq!(result.lines[1].code, "esi");
    assert_eq!(result.lines[1].employee_amount, dec("158"));
    assert_eq!(result.lines[1].employer_amount, dec("683"));
    // Professional tax top slab.
    assert_eq!(result.lines[2].code, "pt");
    assert_eq!(result.lines[2].employee_amount, dec("200"));
    // Fixed welfare fund.
    assert_eq!(result.lines[3].code, "lwf");
    assert_eq!(result.lines[3].employee_amount, dec("25"));
    assert_eq!(result.lines[3].employer_amount, dec("75"));

    assert_eq!(result.total_employee, dec("2183"));
    assert_eq!(result.total_employer, dec("2558"));
}

// =============================================================================
// Loan Amortization
// =============================================================================

#[test]
fn test_reducing_balance_schedule() {
    let contract = LoanContract {
        principal: dec("120000"),
        annual_rate: dec("12"),
        tenure_months: 12,
        interest_type: InterestType::Reducing,
    };
    let schedule = amortize(&contract, date(2025, 1, 15)).unwrap();

    assert_eq!(schedule.emi, dec("10662"));
    assert_eq!(schedule.installments.len(), 12);
    // First month: 1% of 120000.
    assert_eq!(schedule.installments[0].interest, dec("1200"));
    assert_eq!(schedule.installments[0].principal, dec("9462"));
    assert_eq!(schedule.installments[0].due_date, date(2025, 2, 15));

    let principal_sum: Decimal = schedule.installments.iter().map(|i| i.principal).sum();
    assert_eq!(principal_sum, dec("120000"));
    assert_eq!(
        schedule.total_payable,
        dec("120000") + schedule.total_interest
    );
}

#[test]
fn test_flat_interest_schedule() {
    let contract = LoanContract {
        principal: dec("120000"),
        annual_rate: dec("12"),
        tenure_months: 12,
        interest_type: InterestType::Flat,
    };
    let schedule = amortize(&contract, date(2025, 1, 15)).unwrap();

    // Flat interest: 120000 * 12% * 1 year = 14400.
    assert_eq!(schedule.total_interest, dec("14400"));
    assert_eq!(schedule.emi, dec("11200"));
}

#[test]
fn test_zero_rate_ignores_interest_type() {
    let disbursement = date(2025, 1, 15);
    let mut contract = LoanContract {
        principal: dec("100000"),
        annual_rate: dec("0"),
        tenure_months: 7,
        interest_type: InterestType::Flat,
    };
    let flat = amortize(&contract, disbursement).unwrap();
    contract.interest_type = InterestType::Compound;
    let compound = amortize(&contract, disbursement).unwrap();

    assert_eq!(flat, compound);
    assert_eq!(flat.total_interest, Decimal::ZERO);
    let principal_sum: Decimal = flat.installments.iter().map(|i| i.principal).sum();
    assert_eq!(principal_sum, dec("100000"));
}

// =============================================================================
// Bonus
// =============================================================================

#[test]
fn test_prorated_bonus_for_mid_year_joiner() {
    let policy = BonusPolicy {
        calculation_type: BonusCalculationType::PercentOfBasic,
        value: dec("20"),
        min_service_months: None,
        eligible_departments: None,
        eligible_designations: None,
        min_performance_rating: None,
        prorate_for_new_joiners: true,
        min_days_for_proration: None,
    };
    let emp = employee("emp_001", "50000", "80000", date(2024, 10, 1));

    let record = evaluate_bonus(&emp, &policy, date(2024, 4, 1), date(2025, 3, 31)).unwrap();

    assert!(record.eligible);
    assert_eq!(record.base_amount, dec("10000"));
    // 182 of 365 days worked.
    assert_eq!(record.multiplier, dec("182") / dec("365"));
    assert_eq!(record.calculated_amount, dec("4986"));
    assert_eq!(record.final_amount, dec("4986"));
}

// =============================================================================
// Arrears
// =============================================================================

#[test]
fn test_arrears_use_configured_flat_rate() {
    let config = load_config();
    let original = vec![SalaryComponent::earning("basic", dec("50000"))];
    let revised = vec![SalaryComponent::earning("basic", dec("55000"))];
    let period = ArrearPeriod {
        from_month: 4,
        from_year: 2025,
        to_month: 6,
        to_year: 2025,
    };

    let result =
        calculate_arrears(&original, &revised, period, config.arrear_tax_rate()).unwrap();

    assert_eq!(result.period_months, 3);
    assert_eq!(result.gross_arrear, dec("15000"));
    assert_eq!(result.tax_on_arrear, dec("4500"));
    assert_eq!(result.net_arrear, dec("10500"));
    assert_eq!(result.monthly_breakdown.len(), 3);
}

// =============================================================================
// Full and Final
// =============================================================================

#[test]
fn test_gratuity_eligibility_threshold() {
    let config = load_config();
    let ceiling = config.gratuity_exemption_ceiling();

    let just_under = calculate_gratuity(dec("4.99"), dec("50000"), ceiling).unwrap();
    assert!(!just_under.eligible);
    assert_eq!(just_under.amount, Decimal::ZERO);

    let exactly_five = calculate_gratuity(dec("5"), dec("50000"), ceiling).unwrap();
    assert!(exactly_five.eligible);
    assert_eq!(exactly_five.amount, dec("144231"));
}

#[test]
fn test_settlement_forecloses_loans_and_waives_notice() {
    let config = load_config();
    let case = separation_case("6", 45);
    let loan = LoanAccount {
        id: Uuid::new_v4(),
        employee_id: "emp_001".to_string(),
        contract: LoanContract {
            principal: dec("120000"),
            annual_rate: dec("12"),
            tenure_months: 12,
            interest_type: InterestType::Reducing,
        },
        outstanding_balance: dec("45000"),
        status: LoanStatus::Active,
        closure_type: None,
    };

    let outcome =
        build_settlement(&case, config.gratuity_exemption_ceiling(), &[loan]).unwrap();

    // Gratuity 173077, notice 45000, loan 45000.
    assert_eq!(outcome.settlement.net_payable, dec("83077"));
    assert_eq!(outcome.foreclosed_loans.len(), 1);
    assert_eq!(
        outcome.foreclosed_loans[0].closure_type,
        Some(ClosureType::Foreclosure)
    );

    let waived = waive_notice_recovery(&outcome.settlement);
    assert_eq!(waived.net_payable, dec("128077"));
    // Waiving again changes nothing.
    assert_eq!(waive_notice_recovery(&waived), waived);
}

// =============================================================================
// Year-to-Date
// =============================================================================

#[test]
fn test_ytd_fold_over_a_fiscal_year() {
    let config = load_config();
    let make_period = |month: u32, year: i32| PeriodRecord {
        month,
        year,
        earnings: vec![
            SalaryComponent::earning("basic", dec("50000")),
            SalaryComponent::earning("hra", dec("20000")),
        ],
        deductions: vec![SalaryComponent::deduction("pf", dec("1800"))],
        tax_deducted: dec("3467"),
    };

    // History includes a record from the prior fiscal year.
    let prior = vec![make_period(3, 2025), make_period(4, 2025), make_period(5, 2025)];
    let current = make_period(6, 2025);

    let summary = fold_ytd(&prior, &current, config.fiscal_year_start_month()).unwrap();

    assert_eq!(summary.fiscal_year_start_year, 2025);
    assert_eq!(summary.periods_counted, 3);
    assert_eq!(summary.earnings["basic"], dec("150000"));
    assert_eq!(summary.earnings["hra"], dec("60000"));
    assert_eq!(summary.total_deductions, dec("5400"));
    assert_eq!(summary.tax_deducted, dec("10401"));
    assert_eq!(summary.net(), dec("204600"));
}

// =============================================================================
// Batch Processing
// =============================================================================

#[test]
fn test_batch_isolates_bad_records() {
    let config = load_config();
    let mut bad = employee("emp_bad", "40000", "75000", date(2020, 1, 1));
    bad.monthly_gross = dec("-1");
    let roster = vec![
        employee("emp_001", "40000", "75000", date(2020, 1, 1)),
        bad,
        employee("emp_003", "30000", "50000", date(2022, 6, 1)),
    ];

    let outcome = process_batch(&roster, &config);

    assert_eq!(outcome.processed_count, 2);
    assert_eq!(outcome.failed_count, 1);
    assert_eq!(outcome.failures[0].employee_id, "emp_bad");
    assert!(matches!(
        outcome.failures[0].error,
        EngineError::InvalidInput { .. }
    ));
    assert_eq!(outcome.totals.gross, dec("125000"));
    assert_eq!(
        outcome.totals.net,
        outcome.totals.gross - outcome.totals.employee_deductions - outcome.totals.tax
    );
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_tax_is_monotonic_in_income(a in 0u64..10_000_000, b in 0u64..10_000_000) {
        let config = load_config();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let lo_tax = calculate_tax_liability(Decimal::from(lo), &config).unwrap();
        let hi_tax = calculate_tax_liability(Decimal::from(hi), &config).unwrap();

        prop_assert!(lo_tax.total <= hi_tax.total);
    }

    #[test]
    fn prop_tax_breakdown_sums_to_base_tax(income in 0u64..10_000_000) {
        let config = load_config();
        let liability = calculate_tax_liability(Decimal::from(income), &config).unwrap();

        let line_sum: Decimal = liability.breakdown.iter().map(|l| l.tax_amount).sum();
        prop_assert_eq!(round_currency(line_sum), liability.base_tax);
    }

    #[test]
    fn prop_amortization_conserves_principal(
        principal in 1_000u64..1_000_000,
        rate in 0u32..30,
        tenure in 1u32..60,
        interest_type in prop_oneof![
            Just(InterestType::Flat),
            Just(InterestType::Simple),
            Just(InterestType::Reducing),
            Just(InterestType::Compound),
        ],
    ) {
        let contract = LoanContract {
            principal: Decimal::from(principal),
            annual_rate: Decimal::from(rate),
            tenure_months: tenure,
            interest_type,
        };
        let schedule = amortize(&contract, date(2025, 1, 31)).unwrap();

        let principal_sum: Decimal = schedule.installments.iter().map(|i| i.principal).sum();
        prop_assert_eq!(principal_sum, contract.principal);

        for installment in &schedule.installments {
            prop_assert_eq!(installment.total, installment.principal + installment.interest);
            prop_assert!(installment.interest >= Decimal::ZERO);
        }
    }

    #[test]
    fn prop_arrear_swap_negates(original in 0u64..200_000, revised in 0u64..200_000) {
        let a = vec![SalaryComponent::earning("basic", Decimal::from(original))];
        let b = vec![SalaryComponent::earning("basic", Decimal::from(revised))];
        let period = ArrearPeriod {
            from_month: 4,
            from_year: 2025,
            to_month: 9,
            to_year: 2025,
        };

        let forward = calculate_arrears(&a, &b, period, dec("30")).unwrap();
        let backward = calculate_arrears(&b, &a, period, dec("30")).unwrap();

        prop_assert_eq!(forward.gross_arrear, -backward.gross_arrear);
    }

    #[test]
    fn prop_bonus_multiplier_within_unit_interval(offset in 0i64..400) {
        let policy = BonusPolicy {
            calculation_type: BonusCalculationType::Fixed,
            value: dec("10000"),
            min_service_months: None,
            eligible_departments: None,
            eligible_designations: None,
            min_performance_rating: None,
            prorate_for_new_joiners: true,
            min_days_for_proration: None,
        };
        let joining = date(2024, 1, 1) + chrono::Days::new(offset as u64);
        let emp = employee("emp_001", "50000", "80000", joining);

        let record =
            evaluate_bonus(&emp, &policy, date(2024, 4, 1), date(2025, 3, 31)).unwrap();

        prop_assert!(record.multiplier >= Decimal::ZERO);
        prop_assert!(record.multiplier <= Decimal::ONE);
    }

    #[test]
    fn prop_round_currency_stays_within_half_unit(cents in -1_000_000_000i64..1_000_000_000) {
        let amount = Decimal::new(cents, 2);
        let rounded = round_currency(amount);

        prop_assert_eq!(rounded.scale(), 0);
        prop_assert!((rounded - amount).abs() <= dec("0.5"));
    }
}
