//! Inbound HTTP adapter.
//!
//! Implements the employee REST API using Axum.
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/api/v1/employees` | GET | List employees |
//! | `/api/v1/employees` | POST | Create employee |
//! | `/api/v1/employees/{id}` | GET | Get employee |
//! | `/api/v1/employees/{id}` | PUT | Update employee |
//! | `/api/v1/employees/{id}` | DELETE | Delete employee |
//! | `/health` | GET | Liveness check |

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use dto::{DeleteResponse, EmployeeRequest, EmployeeResponse};
pub use error::{error_codes, ApiError};
pub use routes::{create_router, create_router_with_config, EMPLOYEES_PATH};
pub use state::AppState;
