//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! service configuration from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayrollPeriod, count_working_days, monthly_periods};
use crate::store::{InMemoryStore, StoreResult};

use super::types::{PayrollConfig, PeriodsFile, SalariesFile, ServiceConfig};

/// Loads and provides access to the payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── service.yaml    # Service name, bind address, log filter
/// ├── periods.yaml    # Explicit periods or a monthly series
/// └── salaries.yaml   # Base salary history
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Loaded {} payroll periods", loader.config().periods().len());
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The periods are inverted, overlapping or reuse an id
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let service = Self::load_yaml::<ServiceConfig>(&path.join("service.yaml"))?;

        let periods_path = path.join("periods.yaml");
        let periods_file = Self::load_yaml::<PeriodsFile>(&periods_path)?;
        let periods = Self::build_periods(periods_file, &periods_path.display().to_string())?;

        let salaries = Self::load_yaml::<SalariesFile>(&path.join("salaries.yaml"))?.salaries;

        Ok(Self {
            config: PayrollConfig::new(service, periods, salaries),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Expands the periods file into validated periods ordered by start.
    fn build_periods(file: PeriodsFile, path: &str) -> PayrollResult<Vec<PayrollPeriod>> {
        let mut periods = match (file.periods, file.series) {
            (Some(entries), None) => entries
                .into_iter()
                .map(|entry| PayrollPeriod {
                    id: entry.id,
                    period_start: entry.period_start,
                    period_end: entry.period_end,
                    working_days: entry
                        .working_days
                        .unwrap_or_else(|| count_working_days(entry.period_start, entry.period_end)),
                    status: entry.status,
                })
                .collect::<Vec<_>>(),
            (None, Some(series)) => {
                monthly_periods(series.first_start, series.count, series.closed_through)
            }
            _ => {
                return Err(PayrollError::ConfigParseError {
                    path: path.to_string(),
                    message: "expected exactly one of `periods` or `series`".to_string(),
                });
            }
        };

        periods.sort_by_key(|p| p.period_start);
        validate_periods(&periods)?;
        Ok(periods)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Creates an in-memory store seeded with the configured periods and
    /// salary history.
    pub fn seed_store(&self) -> StoreResult<InMemoryStore> {
        InMemoryStore::seeded(self.config.periods().to_vec(), self.config.salaries().to_vec())
    }
}

/// Checks that every period has a non-inverted range, a unique id, and does
/// not overlap its predecessor. `periods` must be sorted by start date.
fn validate_periods(periods: &[PayrollPeriod]) -> PayrollResult<()> {
    let mut ids = HashSet::new();

    for (index, period) in periods.iter().enumerate() {
        if period.period_end < period.period_start {
            return Err(PayrollError::InvalidPeriod {
                period_id: period.id,
                message: format!(
                    "period_end {} is before period_start {}",
                    period.period_end, period.period_start
                ),
            });
        }
        if !ids.insert(period.id) {
            return Err(PayrollError::InvalidPeriod {
                period_id: period.id,
                message: "duplicate period id".to_string(),
            });
        }
        if let Some(previous) = index.checked_sub(1).map(|i| &periods[i]) {
            if previous.overlaps(period) {
                return Err(PayrollError::InvalidPeriod {
                    period_id: period.id,
                    message: format!("overlaps payroll period {}", previous.id),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PeriodStatus;
    use crate::store::{PeriodStore, SalaryStore};
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config"
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Writes a throwaway config directory holding the given files.
    fn scratch_dir(files: &[(&str, &str)]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("payroll-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        for (name, content) in files {
            fs::write(dir.join(name), content).unwrap();
        }
        dir
    }

    const SERVICE: &str = "name: payroll-test\n";
    const SALARIES: &str = "salaries:\n  - user_id: 1\n    amount: \"4000000\"\n    effective_from: 2025-01-01\n";

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        let config = loader.config();
        assert_eq!(config.service().name, "payroll-engine");
        assert_eq!(config.periods().len(), 24);
        assert!(!config.salaries().is_empty());
    }

    #[test]
    fn test_series_marks_closed_periods() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let periods = loader.config().periods();

        assert_eq!(periods[0].period_start, date(2025, 1, 1));
        assert_eq!(periods[0].status, PeriodStatus::Closed);
        assert_eq!(periods[23].status, PeriodStatus::Open);
    }

    #[test]
    fn test_service_defaults() {
        let dir = scratch_dir(&[
            ("service.yaml", SERVICE),
            ("periods.yaml", "series:\n  first_start: 2026-01-01\n  count: 2\n"),
            ("salaries.yaml", SALARIES),
        ]);
        let loader = ConfigLoader::load(&dir).unwrap();

        assert_eq!(loader.config().service().bind_address, "127.0.0.1:8080");
        assert_eq!(loader.config().service().log_filter, "info");
        assert!(loader.config().periods().iter().all(|p| p.is_open()));
    }

    #[test]
    fn test_explicit_periods_derive_working_days() {
        let periods = "periods:\n  - id: 2\n    period_start: 2026-02-01\n    period_end: 2026-02-28\n  - id: 1\n    period_start: 2026-01-01\n    period_end: 2026-01-31\n    status: closed\n";
        let dir = scratch_dir(&[
            ("service.yaml", SERVICE),
            ("periods.yaml", periods),
            ("salaries.yaml", SALARIES),
        ]);
        let loader = ConfigLoader::load(&dir).unwrap();
        let periods = loader.config().periods();

        assert_eq!(periods[0].id, 1);
        assert_eq!(periods[0].working_days, 22);
        assert_eq!(periods[0].status, PeriodStatus::Closed);
        assert_eq!(periods[1].working_days, 20);
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let dir = scratch_dir(&[("service.yaml", SERVICE)]);
        let result = ConfigLoader::load(&dir);

        match result {
            Err(PayrollError::ConfigNotFound { path }) => assert!(path.ends_with("periods.yaml")),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_error() {
        let dir = scratch_dir(&[("service.yaml", "name: [unclosed\n")]);
        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(PayrollError::ConfigParseError { .. })));
    }

    #[test]
    fn test_both_period_sources_rejected() {
        let periods = "periods: []\nseries:\n  first_start: 2026-01-01\n  count: 1\n";
        let dir = scratch_dir(&[
            ("service.yaml", SERVICE),
            ("periods.yaml", periods),
            ("salaries.yaml", SALARIES),
        ]);
        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(PayrollError::ConfigParseError { .. })));
    }

    #[test]
    fn test_overlapping_periods_rejected() {
        let periods = "periods:\n  - id: 1\n    period_start: 2026-01-01\n    period_end: 2026-01-31\n  - id: 2\n    period_start: 2026-01-31\n    period_end: 2026-02-27\n";
        let dir = scratch_dir(&[
            ("service.yaml", SERVICE),
            ("periods.yaml", periods),
            ("salaries.yaml", SALARIES),
        ]);
        match ConfigLoader::load(&dir) {
            Err(PayrollError::InvalidPeriod { period_id, .. }) => assert_eq!(period_id, 2),
            other => panic!("Expected InvalidPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_period_rejected() {
        let periods = "periods:\n  - id: 7\n    period_start: 2026-01-31\n    period_end: 2026-01-01\n";
        let dir = scratch_dir(&[
            ("service.yaml", SERVICE),
            ("periods.yaml", periods),
            ("salaries.yaml", SALARIES),
        ]);
        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(PayrollError::InvalidPeriod { period_id: 7, .. })
        ));
    }

    #[test]
    fn test_seed_store() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let store = loader.seed_store().unwrap();

        let period = store.period_by_id(1).unwrap().unwrap();
        assert_eq!(period.period_start, date(2025, 1, 1));
        let salaries = store.base_salaries_effective_at(date(2026, 6, 1), None).unwrap();
        assert_eq!(salaries.len(), 3);
    }
}
