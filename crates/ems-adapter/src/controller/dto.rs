//! JSON wire types for the employee API.

use serde::{Deserialize, Serialize};

use ems_domain::model::employee::Employee;
use ems_usecase::EmployeeDraft;

/// Body of POST and PUT requests.
///
/// A client-supplied `id` is ignored along with any other unknown field;
/// ids come from the store or the request path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email_id: String,
}

impl From<EmployeeRequest> for EmployeeDraft {
    fn from(req: EmployeeRequest) -> Self {
        EmployeeDraft::new(req.first_name, req.last_name, req.email_id)
    }
}

/// Employee as returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email_id: String,
}

impl From<&Employee> for EmployeeResponse {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id().map(|id| id.value()),
            first_name: employee.first_name().to_string(),
            last_name: employee.last_name().to_string(),
            email_id: employee.email_id().to_string(),
        }
    }
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self::from(&employee)
    }
}

/// Body of a successful DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
