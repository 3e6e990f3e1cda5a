//! # School Year API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::{CompanyScope, OperatorAuth};
use crate::error::{ApiError, validation_error};
use crate::handlers::companies::CompanyDto;
use crate::pagination::{Paginated, paginate};
use crate::repositories::school_year::SchoolYearWithCompany;
use crate::repositories::{
    CreateSchoolYear, SchoolYearFilter, SchoolYearRepository, UpdateSchoolYear,
};
use crate::server::AppState;

/// School year representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SchoolYearDto {
    /// Unique identifier
    pub id: i32,
    /// Display title
    #[schema(example = "2026/2027")]
    pub title: String,
    /// First day of the school year (ISO date)
    #[schema(example = "2026-09-01")]
    pub start_date: String,
    /// Last day of the school year (ISO date)
    #[schema(example = "2027-06-30")]
    pub end_date: String,
    /// Lifecycle status
    pub status: i32,
    /// Owning company
    pub company: Option<CompanyDto>,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl From<SchoolYearWithCompany> for SchoolYearDto {
    fn from((model, loaded_company): SchoolYearWithCompany) -> Self {
        Self {
            id: model.id,
            title: model.title,
            start_date: model.start_date.to_string(),
            end_date: model.end_date.to_string(),
            status: model.status,
            company: loaded_company.map(CompanyDto::from),
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// Request payload for creating a school year
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSchoolYearDto {
    /// Display title (required, max 255 characters)
    #[schema(example = "2026/2027")]
    pub title: String,
    /// First day (ISO date, required)
    #[schema(example = "2026-09-01")]
    pub start_date: String,
    /// Last day (ISO date, required, strictly after start_date)
    #[schema(example = "2027-06-30")]
    pub end_date: String,
    pub status: Option<i32>,
}

/// Request payload for updating a school year; absent fields are left
/// unchanged
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateSchoolYearDto {
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<i32>,
}

/// Query parameters for listing school years
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SchoolYearListParams {
    /// Page number, 1-based
    pub page: Option<u64>,
    /// Page size
    pub limit: Option<u64>,
    /// Filter on lifecycle status
    pub status: Option<i32>,
    /// Contains-match over the title
    pub search: Option<String>,
}

fn parse_iso_date(field: &'static str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        validation_error(
            &format!("{field} must be an ISO date (YYYY-MM-DD)"),
            serde_json::json!({ "field": field, "value": value }),
        )
    })
}

/// Create a school year
#[utoipa::path(
    post,
    path = "/api/v1/school-years",
    security(("bearer_auth" = [])),
    request_body = CreateSchoolYearDto,
    responses(
        (status = 201, description = "School year created", body = SchoolYearDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "school-years"
)]
pub async fn create_school_year(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Json(request): Json<CreateSchoolYearDto>,
) -> Result<(StatusCode, Json<SchoolYearDto>), ApiError> {
    let start_date = parse_iso_date("start_date", &request.start_date)?;
    let end_date = parse_iso_date("end_date", &request.end_date)?;

    let repo = SchoolYearRepository::new(&state.db);
    let created = repo
        .create(
            CreateSchoolYear {
                title: request.title,
                start_date,
                end_date,
                status: request.status,
            },
            scope.0,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List school years for the caller's company
#[utoipa::path(
    get,
    path = "/api/v1/school-years",
    security(("bearer_auth" = [])),
    params(SchoolYearListParams),
    responses(
        (status = 200, description = "Paginated school years", body = Paginated<SchoolYearDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "school-years"
)]
pub async fn list_school_years(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Query(params): Query<SchoolYearListParams>,
) -> Result<Json<Paginated<SchoolYearDto>>, ApiError> {
    let window = paginate(
        params.page,
        params.limit,
        state.config.default_page_size,
        state.config.max_page_size,
    );
    let filter = SchoolYearFilter {
        status: params.status,
        search: params.search,
    };

    let repo = SchoolYearRepository::new(&state.db);
    let page = repo.list(filter, &window, scope.0).await?;

    Ok(Json(page.map(SchoolYearDto::from)))
}

/// Get a school year by id
#[utoipa::path(
    get,
    path = "/api/v1/school-years/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "School year identifier")),
    responses(
        (status = 200, description = "School year", body = SchoolYearDto),
        (status = 404, description = "School year not found", body = ApiError)
    ),
    tag = "school-years"
)]
pub async fn get_school_year(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Path(id): Path<i32>,
) -> Result<Json<SchoolYearDto>, ApiError> {
    let repo = SchoolYearRepository::new(&state.db);
    let found = repo.get(id, scope.0).await?;
    Ok(Json(found.into()))
}

/// Update a school year
#[utoipa::path(
    patch,
    path = "/api/v1/school-years/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "School year identifier")),
    request_body = UpdateSchoolYearDto,
    responses(
        (status = 200, description = "Updated school year", body = SchoolYearDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "School year not found", body = ApiError)
    ),
    tag = "school-years"
)]
pub async fn update_school_year(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Path(id): Path<i32>,
    Json(request): Json<UpdateSchoolYearDto>,
) -> Result<Json<SchoolYearDto>, ApiError> {
    let start_date = request
        .start_date
        .as_deref()
        .map(|value| parse_iso_date("start_date", value))
        .transpose()?;
    let end_date = request
        .end_date
        .as_deref()
        .map(|value| parse_iso_date("end_date", value))
        .transpose()?;

    let repo = SchoolYearRepository::new(&state.db);
    let updated = repo
        .update(
            id,
            scope.0,
            UpdateSchoolYear {
                title: request.title,
                start_date,
                end_date,
                status: request.status,
            },
        )
        .await?;

    Ok(Json(updated.into()))
}

/// Soft-delete a school year
#[utoipa::path(
    delete,
    path = "/api/v1/school-years/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "School year identifier")),
    responses(
        (status = 204, description = "School year deleted"),
        (status = 404, description = "School year not found", body = ApiError)
    ),
    tag = "school-years"
)]
pub async fn delete_school_year(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let repo = SchoolYearRepository::new(&state.db);
    repo.remove(id, scope.0).await?;
    Ok(StatusCode::NO_CONTENT)
}
