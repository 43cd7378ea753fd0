//! # EMS Domain Layer
//!
//! Pure business vocabulary with zero external dependencies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Employee entity & EmployeeId                  ││
//! │  │  repository/- Store trait (not implementations)             ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Switching from the in-memory store to SQLite does not touch this crate.

pub mod model;
pub mod repository;

// Re-export commonly used types
pub use model::employee::{Employee, EmployeeId};

pub use repository::employee_repository::{EmployeeRepository, RepositoryError};
