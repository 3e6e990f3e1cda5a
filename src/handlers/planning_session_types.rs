//! # Planning Session Type API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::{CompanyScope, OperatorAuth};
use crate::error::ApiError;
use crate::handlers::companies::CompanyDto;
use crate::pagination::{Paginated, paginate};
use crate::repositories::planning_session_type::PlanningSessionTypeWithCompany;
use crate::repositories::{
    CreatePlanningSessionType, PlanningSessionTypeFilter, PlanningSessionTypeRepository,
    UpdatePlanningSessionType,
};
use crate::server::AppState;

/// Planning session type representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlanningSessionTypeDto {
    /// Unique identifier
    pub id: i32,
    /// Display title
    #[schema(example = "Lecture")]
    pub title: String,
    /// Kind of session
    #[serde(rename = "type")]
    #[schema(example = "course")]
    pub kind: String,
    /// Weighting coefficient (optional)
    pub coefficient: Option<f64>,
    /// Status flag: "active" or "inactive"
    pub status: String,
    /// Owning company
    pub company: Option<CompanyDto>,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl From<PlanningSessionTypeWithCompany> for PlanningSessionTypeDto {
    fn from((model, loaded_company): PlanningSessionTypeWithCompany) -> Self {
        Self {
            id: model.id,
            title: model.title,
            kind: model.kind,
            coefficient: model.coefficient,
            status: model.status,
            company: loaded_company.map(CompanyDto::from),
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// Request payload for creating a session type
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePlanningSessionTypeDto {
    /// Display title (required, max 255 characters)
    #[schema(example = "Lecture")]
    pub title: String,
    /// Kind of session (required)
    #[serde(rename = "type")]
    #[schema(example = "course")]
    pub kind: String,
    /// Weighting coefficient (optional)
    pub coefficient: Option<f64>,
    /// Status flag: "active" or "inactive" (default "active")
    pub status: Option<String>,
}

/// Request payload for updating a session type; absent fields are left
/// unchanged
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePlanningSessionTypeDto {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub coefficient: Option<f64>,
    pub status: Option<String>,
}

/// Query parameters for listing session types
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PlanningSessionTypeListParams {
    /// Page number, 1-based
    pub page: Option<u64>,
    /// Page size
    pub limit: Option<u64>,
    /// Filter on status ("active" or "inactive")
    pub status: Option<String>,
    /// Filter on the kind of session
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Contains-match over the title
    pub search: Option<String>,
}

/// Create a session type
#[utoipa::path(
    post,
    path = "/api/v1/planning-session-types",
    security(("bearer_auth" = [])),
    request_body = CreatePlanningSessionTypeDto,
    responses(
        (status = 201, description = "Session type created", body = PlanningSessionTypeDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "planning-session-types"
)]
pub async fn create_planning_session_type(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Json(request): Json<CreatePlanningSessionTypeDto>,
) -> Result<(StatusCode, Json<PlanningSessionTypeDto>), ApiError> {
    let repo = PlanningSessionTypeRepository::new(&state.db);
    let created = repo
        .create(
            CreatePlanningSessionType {
                title: request.title,
                kind: request.kind,
                coefficient: request.coefficient,
                status: request.status,
            },
            scope.0,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List session types for the caller's company
#[utoipa::path(
    get,
    path = "/api/v1/planning-session-types",
    security(("bearer_auth" = [])),
    params(PlanningSessionTypeListParams),
    responses(
        (status = 200, description = "Paginated session types", body = Paginated<PlanningSessionTypeDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "planning-session-types"
)]
pub async fn list_planning_session_types(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Query(params): Query<PlanningSessionTypeListParams>,
) -> Result<Json<Paginated<PlanningSessionTypeDto>>, ApiError> {
    let window = paginate(
        params.page,
        params.limit,
        state.config.default_page_size,
        state.config.max_page_size,
    );
    let filter = PlanningSessionTypeFilter {
        status: params.status,
        kind: params.kind,
        search: params.search,
    };

    let repo = PlanningSessionTypeRepository::new(&state.db);
    let page = repo.list(filter, &window, scope.0).await?;

    Ok(Json(page.map(PlanningSessionTypeDto::from)))
}

/// Get a session type by id
#[utoipa::path(
    get,
    path = "/api/v1/planning-session-types/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Session type identifier")),
    responses(
        (status = 200, description = "Session type", body = PlanningSessionTypeDto),
        (status = 404, description = "Session type not found", body = ApiError)
    ),
    tag = "planning-session-types"
)]
pub async fn get_planning_session_type(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Path(id): Path<i32>,
) -> Result<Json<PlanningSessionTypeDto>, ApiError> {
    let repo = PlanningSessionTypeRepository::new(&state.db);
    let found = repo.get(id, scope.0).await?;
    Ok(Json(found.into()))
}

/// Update a session type
#[utoipa::path(
    patch,
    path = "/api/v1/planning-session-types/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Session type identifier")),
    request_body = UpdatePlanningSessionTypeDto,
    responses(
        (status = 200, description = "Updated session type", body = PlanningSessionTypeDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Session type not found", body = ApiError)
    ),
    tag = "planning-session-types"
)]
pub async fn update_planning_session_type(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Path(id): Path<i32>,
    Json(request): Json<UpdatePlanningSessionTypeDto>,
) -> Result<Json<PlanningSessionTypeDto>, ApiError> {
    let repo = PlanningSessionTypeRepository::new(&state.db);
    let updated = repo
        .update(
            id,
            scope.0,
            UpdatePlanningSessionType {
                title: request.title,
                kind: request.kind,
                coefficient: request.coefficient,
                status: request.status,
            },
        )
        .await?;

    Ok(Json(updated.into()))
}

/// Hard-delete a session type
#[utoipa::path(
    delete,
    path = "/api/v1/planning-session-types/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Session type identifier")),
    responses(
        (status = 204, description = "Session type deleted"),
        (status = 404, description = "Session type not found", body = ApiError)
    ),
    tag = "planning-session-types"
)]
pub async fn delete_planning_session_type(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let repo = PlanningSessionTypeRepository::new(&state.db);
    repo.remove(id, scope.0).await?;
    Ok(StatusCode::NO_CONTENT)
}
