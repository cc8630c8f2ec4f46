//! Performance benchmarks for the payroll engine.
//!
//! This benchmark suite verifies that the calculation engine meets performance targets:
//! - Single tax liability: < 50μs mean
//! - Single amortization schedule (12 months): < 100μs mean
//! - Single employee payroll: < 200μs mean
//! - Batch of 100 employees: < 20ms mean
//! - Batch of 1000 employees: < 200ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use payroll_engine::calculation::{
    amortize, calculate_tax_liability, process_batch, process_employee,
};
use payroll_engine::config::{ConfigLoader, TaxConfiguration};
use payroll_engine::models::{EmployeeSnapshot, InterestType, LoanContract};

/// Loads the shipped jurisdiction configuration.
fn load_config() -> TaxConfiguration {
    ConfigLoader::load("./config/in_2025")
        .expect("Failed to load config")
        .config()
        .clone()
}

/// Creates a roster of employees with varied pay figures.
fn create_roster(count: usize) -> Vec<EmployeeSnapshot> {
    (0..count)
        .map(|i| {
            let basic = 25_000 + (i as i64 % 10) * 5_000;
            let gross = basic * 2;
            EmployeeSnapshot {
                id: format!("emp_bench_{:04}", i),
                department: if i % 3 == 0 { "sales" } else { "engineering" }.to_string(),
                designation: "engineer".to_string(),
                joining_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                performance_rating: Some(Decimal::from(3 + (i as i64 % 3))),
                monthly_basic: Decimal::from(basic),
                monthly_gross: Decimal::from(gross),
                annual_ctc: Decimal::from(gross * 14),
            }
        })
        .collect()
}

/// Benchmark: Single annual tax liability.
///
/// Target: < 50μs mean
fn bench_tax_liability(c: &mut Criterion) {
    let config = load_config();
    let income = Decimal::from_str("1234567").unwrap();

    c.bench_function("tax_liability", |b| {
        b.iter(|| black_box(calculate_tax_liability(black_box(income), &config).unwrap()))
    });
}

/// Benchmark: Reducing-balance amortization over a 12-month tenure.
///
/// Target: < 100μs mean
fn bench_amortization(c: &mut Criterion) {
    let contract = LoanContract {
        principal: Decimal::from(120_000),
        annual_rate: Decimal::from(12),
        tenure_months: 12,
        interest_type: InterestType::Reducing,
    };
    let disbursement = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

    c.bench_function("amortization_12_months", |b| {
        b.iter(|| black_box(amortize(black_box(&contract), disbursement).unwrap()))
    });
}

/// Benchmark: Single employee payroll (tax + statutory deductions).
///
/// Target: < 200μs mean
fn bench_single_employee(c: &mut Criterion) {
    let config = load_config();
    let roster = create_roster(1);

    c.bench_function("single_employee", |b| {
        b.iter(|| black_box(process_employee(black_box(&roster[0]), &config).unwrap()))
    });
}

/// Benchmark: Batch of 100 employees.
///
/// Target: < 20ms mean
fn bench_batch_100(c: &mut Criterion) {
    let config = load_config();
    let roster = create_roster(100);

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.iter(|| black_box(process_batch(black_box(&roster), &config)))
    });

    group.finish();
}

/// Benchmark: Batch of 1000 employees.
///
/// Target: < 200ms mean
fn bench_batch_1000(c: &mut Criterion) {
    let config = load_config();
    let roster = create_roster(1000);

    let mut group = c.benchmark_group("large_batch_processing");
    group.throughput(Throughput::Elements(1000));
    // Reduce sample size for large batches to keep benchmark time reasonable
    group.sample_size(10);

    group.bench_function("batch_1000", |b| {
        b.iter(|| black_box(process_batch(black_box(&roster), &config)))
    });

    group.finish();
}

/// Benchmark: Various roster sizes to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let config = load_config();

    let mut group = c.benchmark_group("scaling");

    for count in [1usize, 10, 50, 100, 500].iter() {
        let roster = create_roster(*count);

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("employees", count), count, |b, _| {
            b.iter(|| black_box(process_batch(black_box(&roster), &config)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tax_liability,
    bench_amortization,
    bench_single_employee,
    bench_batch_100,
    bench_batch_1000,
    bench_scaling,
);
criterion_main!(benches);
