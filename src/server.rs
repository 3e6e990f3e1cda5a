//! # Server Configuration
//!
//! This module contains the server setup and configuration for the
//! back-office API.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::auth_middleware;
use crate::config::AppConfig;
use crate::handlers::{
    self, companies, level_pricings, planning_session_types, school_years,
};
use crate::telemetry;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
}

/// Builds an AppState for tests.
pub fn create_test_app_state(config: AppConfig, db: DatabaseConnection) -> AppState {
    AppState {
        config: Arc::new(config),
        db,
    }
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/companies",
            post(companies::create_company).get(companies::list_companies),
        )
        .route(
            "/companies/{id}",
            get(companies::get_company)
                .patch(companies::update_company)
                .delete(companies::delete_company),
        )
        .route(
            "/school-years",
            post(school_years::create_school_year).get(school_years::list_school_years),
        )
        .route(
            "/school-years/{id}",
            get(school_years::get_school_year)
                .patch(school_years::update_school_year)
                .delete(school_years::delete_school_year),
        )
        .route(
            "/level-pricings",
            post(level_pricings::create_level_pricing).get(level_pricings::list_level_pricings),
        )
        .route(
            "/level-pricings/{id}",
            get(level_pricings::get_level_pricing)
                .patch(level_pricings::update_level_pricing)
                .delete(level_pricings::delete_level_pricing),
        )
        .route(
            "/planning-session-types",
            post(planning_session_types::create_planning_session_type)
                .get(planning_session_types::list_planning_session_types),
        )
        .route(
            "/planning-session-types/{id}",
            get(planning_session_types::get_planning_session_type)
                .patch(planning_session_types::update_planning_session_type)
                .delete(planning_session_types::delete_planning_session_type),
        )
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state.config),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::health))
        .nest("/api/v1", api)
        .layer(middleware::from_fn(telemetry::trace_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;
    let profile = config.profile.clone();

    let state = AppState {
        config: Arc::new(config),
        db,
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, %profile, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::health,
        crate::handlers::companies::create_company,
        crate::handlers::companies::list_companies,
        crate::handlers::companies::get_company,
        crate::handlers::companies::update_company,
        crate::handlers::companies::delete_company,
        crate::handlers::school_years::create_school_year,
        crate::handlers::school_years::list_school_years,
        crate::handlers::school_years::get_school_year,
        crate::handlers::school_years::update_school_year,
        crate::handlers::school_years::delete_school_year,
        crate::handlers::level_pricings::create_level_pricing,
        crate::handlers::level_pricings::list_level_pricings,
        crate::handlers::level_pricings::get_level_pricing,
        crate::handlers::level_pricings::update_level_pricing,
        crate::handlers::level_pricings::delete_level_pricing,
        crate::handlers::planning_session_types::create_planning_session_type,
        crate::handlers::planning_session_types::list_planning_session_types,
        crate::handlers::planning_session_types::get_planning_session_type,
        crate::handlers::planning_session_types::update_planning_session_type,
        crate::handlers::planning_session_types::delete_planning_session_type,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::handlers::HealthStatus,
            crate::error::ApiError,
            crate::handlers::companies::CompanyDto,
            crate::handlers::companies::CreateCompanyDto,
            crate::handlers::companies::UpdateCompanyDto,
            crate::handlers::school_years::SchoolYearDto,
            crate::handlers::school_years::CreateSchoolYearDto,
            crate::handlers::school_years::UpdateSchoolYearDto,
            crate::handlers::level_pricings::LevelPricingDto,
            crate::handlers::level_pricings::CreateLevelPricingDto,
            crate::handlers::level_pricings::UpdateLevelPricingDto,
            crate::handlers::planning_session_types::PlanningSessionTypeDto,
            crate::handlers::planning_session_types::CreatePlanningSessionTypeDto,
            crate::handlers::planning_session_types::UpdatePlanningSessionTypeDto,
            crate::pagination::Paginated<crate::handlers::companies::CompanyDto>,
            crate::pagination::Paginated<crate::handlers::school_years::SchoolYearDto>,
            crate::pagination::Paginated<crate::handlers::level_pricings::LevelPricingDto>,
            crate::pagination::Paginated<crate::handlers::planning_session_types::PlanningSessionTypeDto>,
            crate::pagination::PageMeta,
        )
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Back-Office API",
        description = "Multi-tenant back-office API for companies, school years, level pricing plans, and planning session types",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
