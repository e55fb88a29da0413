//! Payroll Period and Payslip Engine
//!
//! This crate validates employee attendance, overtime and reimbursement
//! submissions against open payroll periods, closes periods, and computes
//! per-employee payslips from base salary and the submitted records.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
