//! # Company API Handlers
//!
//! Companies are the root tenant entities. Creation registers a new tenant;
//! every other operation is scoped so that a caller only ever sees the
//! company it is authenticated for.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::{CompanyScope, OperatorAuth};
use crate::error::ApiError;
use crate::models::company;
use crate::pagination::{Paginated, paginate};
use crate::repositories::{CompanyFilter, CompanyRepository, CreateCompany, UpdateCompany};
use crate::server::AppState;

/// Company representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyDto {
    /// Unique identifier
    pub id: i32,
    /// Display name
    #[schema(example = "Acme School")]
    pub name: String,
    /// Contact email
    #[schema(example = "admin@acme.edu")]
    pub email: String,
    /// Logo URL (optional)
    pub logo: Option<String>,
    /// Contact phone number (optional)
    pub phone: Option<String>,
    /// Website URL (optional)
    pub website: Option<String>,
    /// Lifecycle status
    pub status: i32,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl From<company::Model> for CompanyDto {
    fn from(model: company::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            logo: model.logo,
            phone: model.phone,
            website: model.website,
            status: model.status,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// Request payload for creating a company
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCompanyDto {
    /// Display name (required, max 255 characters)
    #[schema(example = "Acme School")]
    pub name: String,
    /// Contact email (required, unique)
    #[schema(example = "admin@acme.edu")]
    pub email: String,
    pub logo: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub status: Option<i32>,
}

/// Request payload for updating a company; absent fields are left unchanged
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCompanyDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub logo: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub status: Option<i32>,
}

/// Query parameters for listing companies
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CompanyListParams {
    /// Page number, 1-based
    pub page: Option<u64>,
    /// Page size
    pub limit: Option<u64>,
    /// Filter on lifecycle status
    pub status: Option<i32>,
    /// Contains-match over name and email
    pub search: Option<String>,
}

/// Register a new company (tenant)
#[utoipa::path(
    post,
    path = "/api/v1/companies",
    security(("bearer_auth" = [])),
    request_body = CreateCompanyDto,
    responses(
        (status = 201, description = "Company created", body = CompanyDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 409, description = "Email already registered", body = ApiError)
    ),
    tag = "companies"
)]
pub async fn create_company(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    _scope: CompanyScope,
    Json(request): Json<CreateCompanyDto>,
) -> Result<(StatusCode, Json<CompanyDto>), ApiError> {
    let repo = CompanyRepository::new(&state.db);
    let created = repo
        .create(CreateCompany {
            name: request.name,
            email: request.email,
            logo: request.logo,
            phone: request.phone,
            website: request.website,
            status: request.status,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List companies visible to the caller
#[utoipa::path(
    get,
    path = "/api/v1/companies",
    security(("bearer_auth" = [])),
    params(CompanyListParams),
    responses(
        (status = 200, description = "Paginated companies", body = Paginated<CompanyDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "companies"
)]
pub async fn list_companies(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Query(params): Query<CompanyListParams>,
) -> Result<Json<Paginated<CompanyDto>>, ApiError> {
    let window = paginate(
        params.page,
        params.limit,
        state.config.default_page_size,
        state.config.max_page_size,
    );
    let filter = CompanyFilter {
        status: params.status,
        search: params.search,
    };

    let repo = CompanyRepository::new(&state.db);
    let page = repo.list(filter, &window, scope.0).await?;

    Ok(Json(page.map(CompanyDto::from)))
}

/// Get a company by id
#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Company identifier")),
    responses(
        (status = 200, description = "Company", body = CompanyDto),
        (status = 404, description = "Company not found", body = ApiError)
    ),
    tag = "companies"
)]
pub async fn get_company(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Path(id): Path<i32>,
) -> Result<Json<CompanyDto>, ApiError> {
    let repo = CompanyRepository::new(&state.db);
    let found = repo.get(id, scope.0).await?;
    Ok(Json(found.into()))
}

/// Update a company
#[utoipa::path(
    patch,
    path = "/api/v1/companies/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Company identifier")),
    request_body = UpdateCompanyDto,
    responses(
        (status = 200, description = "Updated company", body = CompanyDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Company not found", body = ApiError)
    ),
    tag = "companies"
)]
pub async fn update_company(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Path(id): Path<i32>,
    Json(request): Json<UpdateCompanyDto>,
) -> Result<Json<CompanyDto>, ApiError> {
    let repo = CompanyRepository::new(&state.db);
    let updated = repo
        .update(
            id,
            scope.0,
            UpdateCompany {
                name: request.name,
                email: request.email,
                logo: request.logo,
                phone: request.phone,
                website: request.website,
                status: request.status,
            },
        )
        .await?;

    Ok(Json(updated.into()))
}

/// Soft-delete a company
#[utoipa::path(
    delete,
    path = "/api/v1/companies/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Company identifier")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 404, description = "Company not found", body = ApiError)
    ),
    tag = "companies"
)]
pub async fn delete_company(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let repo = CompanyRepository::new(&state.db);
    repo.remove(id, scope.0).await?;
    Ok(StatusCode::NO_CONTENT)
}
