//! Employee Repository - Abstract persistence for Employees
//!
//! This trait defines what operations the domain needs.
//! How they're implemented (SQLite, memory) is not our concern here.

use crate::model::employee::{Employee, EmployeeId};

/// Errors that can occur during repository operations
///
/// "Not found" is deliberately absent: lookups return `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store failed
    PersistenceError { message: String },
}

impl RepositoryError {
    pub fn persistence(message: impl Into<String>) -> Self {
        RepositoryError::PersistenceError {
            message: message.into(),
        }
    }
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::PersistenceError { message } => {
                write!(f, "Persistence error: {}", message)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Employee Repository Trait
///
/// This is a PORT in hexagonal architecture.
/// The domain defines what it needs; adapters provide implementations.
///
/// Methods take `&self`: implementations are shared between concurrent
/// requests and must make each `save`, `update` and `delete` atomic with respect to
/// every other operation.
pub trait EmployeeRepository: Send + Sync {
    /// List every persisted employee
    fn find_all(&self) -> Result<Vec<Employee>, RepositoryError>;

    /// Find an employee by ID
    fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError>;

    /// Save an employee (insert when the id is unset, overwrite otherwise)
    ///
    /// Returns the persisted record with its id populated.
    fn save(&self, employee: Employee) -> Result<Employee, RepositoryError>;

    /// Overwrite an existing record only
    ///
    /// Returns `Ok(None)` when no record matches `employee.id()` (or the id
    /// is unset); nothing is inserted in that case. The existence check and
    /// the write happen atomically.
    fn update(&self, employee: Employee) -> Result<Option<Employee>, RepositoryError>;

    /// Delete the record matching `employee.id()`
    ///
    /// Missing records and unsaved employees are a no-op.
    fn delete(&self, employee: &Employee) -> Result<(), RepositoryError>;

    /// Check if an employee exists
    fn exists(&self, id: EmployeeId) -> Result<bool, RepositoryError> {
        Ok(self.find_by_id(id)?.is_some())
    }

    /// Count all employees
    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.find_all()?.len())
    }
}
