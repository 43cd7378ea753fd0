//! HTTP route definitions and handlers.

use axum::{
    extract::{rejection::PathRejection, DefaultBodyLimit, FromRequest, Path, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use ems_domain::model::employee::EmployeeId;
use ems_domain::repository::employee_repository::EmployeeRepository;
use ems_usecase::EmployeeService;
use shared::config::ServerConfig;

use super::dto::{DeleteResponse, EmployeeRequest, EmployeeResponse};
use super::error::ApiError;
use super::state::AppState;

/// Collection path of the employee API.
pub const EMPLOYEES_PATH: &str = "/api/v1/employees";

type ApiResult<T> = Result<Json<T>, ApiError>;

/// JSON extractor that answers 400 instead of axum's 415/422 for bad bodies.
///
/// Preserves 413 Payload Too Large for body limit errors.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                let message = rejection.body_text();
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    Err(ApiError::payload_too_large(message))
                } else {
                    Err(ApiError::validation_error(message))
                }
            }
        }
    }
}

fn employee_id(path: Result<Path<i64>, PathRejection>) -> Result<EmployeeId, ApiError> {
    path.map(|Path(id)| EmployeeId::new(id))
        .map_err(|rejection| ApiError::validation_error(rejection.body_text()))
}

fn employee_routes<R: EmployeeRepository + 'static>() -> Router<AppState<R>> {
    Router::new()
        .route(
            EMPLOYEES_PATH,
            get(list_employees::<R>).post(create_employee::<R>),
        )
        .route(
            "/api/v1/employees/{id}",
            get(get_employee::<R>)
                .put(update_employee::<R>)
                .delete(delete_employee::<R>),
        )
}

/// Creates the HTTP router with default configuration.
pub fn create_router<R: EmployeeRepository + 'static>(service: EmployeeService<R>) -> Router {
    create_router_with_config(service, &ServerConfig::default())
}

/// Creates the HTTP router with the body limit and CORS policy from `config`.
pub fn create_router_with_config<R: EmployeeRepository + 'static>(
    service: EmployeeService<R>,
    config: &ServerConfig,
) -> Router {
    let router = employee_routes::<R>()
        .route("/health", get(health_check))
        .with_state(AppState::new(service))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http());

    match cors_layer(&config.cors_allowed_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]),
    )
}

// ============================================================
// Handlers
// ============================================================

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_employees<R: EmployeeRepository + 'static>(
    State(state): State<AppState<R>>,
) -> ApiResult<Vec<EmployeeResponse>> {
    let employees = state.run(|service| service.list()).await?;
    Ok(Json(employees.iter().map(EmployeeResponse::from).collect()))
}

async fn create_employee<R: EmployeeRepository + 'static>(
    State(state): State<AppState<R>>,
    JsonBody(body): JsonBody<EmployeeRequest>,
) -> ApiResult<EmployeeResponse> {
    let employee = state
        .run(move |service| service.create(body.into()))
        .await?;
    info!(id = ?employee.id(), "Created employee");
    Ok(Json(employee.into()))
}

async fn get_employee<R: EmployeeRepository + 'static>(
    State(state): State<AppState<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<EmployeeResponse> {
    let id = employee_id(path)?;
    let employee = state.run(move |service| service.get(id)).await?;
    Ok(Json(employee.into()))
}

async fn update_employee<R: EmployeeRepository + 'static>(
    State(state): State<AppState<R>>,
    path: Result<Path<i64>, PathRejection>,
    JsonBody(body): JsonBody<EmployeeRequest>,
) -> ApiResult<EmployeeResponse> {
    let id = employee_id(path)?;
    let employee = state
        .run(move |service| service.update(id, body.into()))
        .await?;
    info!(%id, "Updated employee");
    Ok(Json(employee.into()))
}

async fn delete_employee<R: EmployeeRepository + 'static>(
    State(state): State<AppState<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<DeleteResponse> {
    let id = employee_id(path)?;
    state.run(move |service| service.delete(id)).await?;
    info!(%id, "Deleted employee");
    Ok(Json(DeleteResponse { deleted: true }))
}
