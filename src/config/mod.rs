//! Configuration loading for the payroll service.
//!
//! This module loads the service settings, the payroll period calendar and
//! the base salary history from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Service: {}", config.config().service().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{PayrollConfig, PeriodEntry, PeriodSeries, PeriodsFile, SalariesFile, ServiceConfig};
