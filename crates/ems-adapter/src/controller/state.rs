//! Application state for HTTP handlers.

use ems_domain::repository::employee_repository::EmployeeRepository;
use ems_usecase::{EmployeeService, UseCaseError};

use super::error::ApiError;

/// State shared across all HTTP handlers.
///
/// Holds the employee service; the store inside it is reference counted,
/// so cloning the state per request is cheap.
pub struct AppState<R> {
    pub service: EmployeeService<R>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<R: EmployeeRepository + 'static> AppState<R> {
    pub fn new(service: EmployeeService<R>) -> Self {
        Self { service }
    }

    /// Run a use case on the blocking pool.
    ///
    /// Store calls are synchronous (SQLite I/O included) and must not stall
    /// the async workers.
    pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&EmployeeService<R>) -> Result<T, UseCaseError> + Send + 'static,
    {
        let service = self.service.clone();
        tokio::task::spawn_blocking(move || op(&service))
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "Employee task failed");
                ApiError::internal_error("employee task failed")
            })?
            .map_err(ApiError::from)
    }
}
