//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from ems-domain.

pub mod in_memory;
pub mod sqlite;

pub use in_memory::InMemoryEmployeeRepository;
pub use sqlite::{SqliteEmployeeRepository, SqliteError};
