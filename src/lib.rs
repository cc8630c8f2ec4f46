//! Statutory Payroll Calculation Engine
//!
//! This crate provides the financial core of a payroll platform: a
//! configurable progressive income-tax calculator, statutory deduction
//! rules, loan amortization, bonus eligibility and proration, retroactive
//! salary-revision arrears, full-and-final settlements on separation, and
//! year-to-date paystub aggregation.
//!
//! Every engine operation is a deterministic function of its explicit
//! inputs; configuration is injected per call and nothing here performs I/O.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
