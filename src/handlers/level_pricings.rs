//! # Level Pricing API Handlers

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
use crate::repositories::level_pricing::LevelPricingWithCompany;
use crate::repositories::{
    CreateLevelPricing, LevelPricingFilter, LevelPricingRepository, UpdateLevelPricing,
};
use crate::server::AppState;

/// Level pricing representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LevelPricingDto {
    /// Unique identifier
    pub id: i32,
    /// Level this plan applies to
    pub level_id: i32,
    /// Display title
    #[schema(example = "Monthly")]
    pub title: String,
    /// Price amount
    #[schema(example = 500.0)]
    pub amount: f64,
    /// Number of payment occurrences
    pub occurrences: i32,
    /// Whether the plan repeats monthly (0 or 1)
    pub every_month: i16,
    /// Lifecycle status in {-2,-1,0,1,2}
    pub status: i32,
    /// Owning company
    pub company: Option<CompanyDto>,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl From<LevelPricingWithCompany> for LevelPricingDto {
    fn from((model, loaded_company): LevelPricingWithCompany) -> Self {
        Self {
            id: model.id,
            level_id: model.level_id,
            title: model.title,
            amount: model.amount,
            occurrences: model.occurrences,
            every_month: model.every_month,
            status: model.status,
            company: loaded_company.map(CompanyDto::from),
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// Request payload for creating a pricing plan
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateLevelPricingDto {
    /// Level the plan applies to; must belong to the caller's company
    pub level_id: i32,
    /// Display title (required, max 255 characters)
    #[schema(example = "Monthly")]
    pub title: String,
    /// Price amount; strictly positive
    #[schema(example = 500.0)]
    pub amount: f64,
    /// Number of payment occurrences (default 1)
    pub occurrences: Option<i32>,
    /// Whether the plan repeats monthly, 0 or 1 (default 0)
    pub every_month: Option<i16>,
    /// Lifecycle status in {-2,-1,0,1,2} (default 2)
    pub status: Option<i32>,
}

/// Request payload for updating a pricing plan; absent fields are left
/// unchanged
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateLevelPricingDto {
    pub level_id: Option<i32>,
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub occurrences: Option<i32>,
    pub every_month: Option<i16>,
    pub status: Option<i32>,
}

/// Query parameters for listing pricing plans
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct LevelPricingListParams {
    /// Page number, 1-based
    pub page: Option<u64>,
    /// Page size
    pub limit: Option<u64>,
    /// Filter on lifecycle status
    pub status: Option<i32>,
    /// Filter on the referenced level
    pub level_id: Option<i32>,
    /// Contains-match over the title
    pub search: Option<String>,
}

/// Create a pricing plan
#[utoipa::path(
    post,
    path = "/api/v1/level-pricings",
    security(("bearer_auth" = [])),
    request_body = CreateLevelPricingDto,
    responses(
        (status = 201, description = "Pricing plan created", body = LevelPricingDto),
        (status = 400, description = "Validation failed (including cross-company level)", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "level-pricings"
)]
pub async fn create_level_pricing(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Json(request): Json<CreateLevelPricingDto>,
) -> Result<(StatusCode, Json<LevelPricingDto>), ApiError> {
    let repo = LevelPricingRepository::new(&state.db);
    let created = repo
        .create(
            CreateLevelPricing {
                level_id: request.level_id,
                title: request.title,
                amount: request.amount,
                occurrences: request.occurrences,
                every_month: request.every_month,
                status: request.status,
            },
            scope.0,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List pricing plans for the caller's company
#[utoipa::path(
    get,
    path = "/api/v1/level-pricings",
    security(("bearer_auth" = [])),
    params(LevelPricingListParams),
    responses(
        (status = 200, description = "Paginated pricing plans", body = Paginated<LevelPricingDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "level-pricings"
)]
pub async fn list_level_pricings(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Query(params): Query<LevelPricingListParams>,
) -> Result<Json<Paginated<LevelPricingDto>>, ApiError> {
    let window = paginate(
        params.page,
        params.limit,
        state.config.default_page_size,
        state.config.max_page_size,
    );
    let filter = LevelPricingFilter {
        status: params.status,
        level_id: params.level_id,
        search: params.search,
    };

    let repo = LevelPricingRepository::new(&state.db);
    let page = repo.list(filter, &window, scope.0).await?;

    Ok(Json(page.map(LevelPricingDto::from)))
}

/// Get a pricing plan by id
#[utoipa::path(
    get,
    path = "/api/v1/level-pricings/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Pricing plan identifier")),
    responses(
        (status = 200, description = "Pricing plan", body = LevelPricingDto),
        (status = 404, description = "Pricing plan not found", body = ApiError)
    ),
    tag = "level-pricings"
)]
pub async fn get_level_pricing(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Path(id): Path<i32>,
) -> Result<Json<LevelPricingDto>, ApiError> {
    let repo = LevelPricingRepository::new(&state.db);
    let found = repo.get(id, scope.0).await?;
    Ok(Json(found.into()))
}

/// Update a pricing plan
#[utoipa::path(
    patch,
    path = "/api/v1/level-pricings/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Pricing plan identifier")),
    request_body = UpdateLevelPricingDto,
    responses(
        (status = 200, description = "Updated pricing plan", body = LevelPricingDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Pricing plan not found", body = ApiError)
    ),
    tag = "level-pricings"
)]
pub async fn update_level_pricing(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Path(id): Path<i32>,
    Json(request): Json<UpdateLevelPricingDto>,
) -> Result<Json<LevelPricingDto>, ApiError> {
    let repo = LevelPricingRepository::new(&state.db);
    let updated = repo
        .update(
            id,
            scope.0,
            UpdateLevelPricing {
                level_id: request.level_id,
                title: request.title,
                amount: request.amount,
                occurrences: request.occurrences,
                every_month: request.every_month,
                status: request.status,
            },
        )
        .await?;

    Ok(Json(updated.into()))
}

/// Soft-delete a pricing plan
#[utoipa::path(
    delete,
    path = "/api/v1/level-pricings/{id}",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Pricing plan identifier")),
    responses(
        (status = 204, description = "Pricing plan deleted"),
        (status = 404, description = "Pricing plan not found", body = ApiError)
    ),
    tag = "level-pricings"
)]
pub async fn delete_level_pricing(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    scope: CompanyScope,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let repo = LevelPricingRepository::new(&state.db);
    repo.remove(id, scope.0).await?;
    Ok(StatusCode::NO_CONTENT)
}
