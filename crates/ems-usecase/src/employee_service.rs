//! Employee Service - The five CRUD use cases
//!
//! Every inbound adapter (HTTP today) goes through this service, so the
//! "look up, then mutate" sequences and the not-found policy live in one
//! place.

use std::sync::Arc;

use ems_domain::model::employee::{Employee, EmployeeId};
use ems_domain::repository::employee_repository::{EmployeeRepository, RepositoryError};

/// Errors surfaced by the use cases
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseCaseError {
    /// No employee with this id
    NotFound { id: EmployeeId },
    /// The store failed
    Repository(RepositoryError),
}

impl core::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UseCaseError::NotFound { id } => write!(f, "Employee not found: {}", id),
            UseCaseError::Repository(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for UseCaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UseCaseError::NotFound { .. } => None,
            UseCaseError::Repository(err) => Some(err),
        }
    }
}

impl From<RepositoryError> for UseCaseError {
    fn from(err: RepositoryError) -> Self {
        UseCaseError::Repository(err)
    }
}

/// Incoming attribute values for create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email_id: String,
}

impl EmployeeDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_id: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email_id: email_id.into(),
        }
    }
}

/// CRUD use cases over an injected store
#[derive(Debug)]
pub struct EmployeeService<R> {
    repository: Arc<R>,
}

impl<R> Clone for EmployeeService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List every employee
    pub fn list(&self) -> Result<Vec<Employee>, UseCaseError> {
        Ok(self.repository.find_all()?)
    }

    /// Create a new employee; the store assigns the id
    pub fn create(&self, draft: EmployeeDraft) -> Result<Employee, UseCaseError> {
        let employee = Employee::new(draft.first_name, draft.last_name, draft.email_id);
        Ok(self.repository.save(employee)?)
    }

    /// Fetch one employee
    pub fn get(&self, id: EmployeeId) -> Result<Employee, UseCaseError> {
        self.repository
            .find_by_id(id)?
            .ok_or(UseCaseError::NotFound { id })
    }

    /// Replace the attributes of an existing employee
    ///
    /// The write goes through `update`, never `save`: a record deleted after
    /// the lookup stays deleted.
    pub fn update(&self, id: EmployeeId, draft: EmployeeDraft) -> Result<Employee, UseCaseError> {
        let mut employee = self.get(id)?;
        employee.apply_details(draft.first_name, draft.last_name, draft.email_id);
        self.repository
            .update(employee)?
            .ok_or(UseCaseError::NotFound { id })
    }

    /// Delete an existing employee
    pub fn delete(&self, id: EmployeeId) -> Result<(), UseCaseError> {
        let employee = self.get(id)?;
        self.repository.delete(&employee)?;
        Ok(())
    }
}
