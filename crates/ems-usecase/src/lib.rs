//! # EMS Use Case Layer
//!
//! Application-specific business rules.
//! This layer orchestrates the flow of data between the domain and adapters.

pub use ems_domain;

pub mod employee_service;

pub use employee_service::{EmployeeDraft, EmployeeService, UseCaseError};
