//! Application state for the payroll API.

use std::sync::Arc;

use crate::service::PayrollServices;

/// Shared application state.
///
/// Holds the payroll services every handler dispatches to.
#[derive(Clone)]
pub struct AppState {
    services: Arc<PayrollServices>,
}

impl AppState {
    /// Creates a new application state around the given services.
    pub fn new(services: PayrollServices) -> Self {
        Self {
            services: Arc::new(services),
        }
    }

    /// Returns a reference to the services.
    pub fn services(&self) -> &PayrollServices {
        &self.services
    }

    /// Returns a shared handle to the services, for work that outlives the
    /// request.
    pub fn shared_services(&self) -> Arc<PayrollServices> {
        Arc::clone(&self.services)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}
