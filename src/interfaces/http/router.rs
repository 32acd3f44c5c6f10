//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::modules::{analytics, calculations, health, metrics, request_id};
use crate::application::AllocationService;
use crate::domain::{
    Bill, BillCalculation, BillPeriod, CalculatedExpense, DashboardSummary, MeterReading,
    MonthlyTotals, Owner, OwnerConsumption, ReadingRefs, UnattributedCostPolicy,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        calculations::allocate,
        calculations::allocate_resolved,
        analytics::period_consumption,
        analytics::monthly_stats,
        analytics::owner_stats,
        analytics::summary,
    ),
    components(
        schemas(
            ApiResponse<String>,
            ApiResponse<BillCalculation>,
            health::HealthResponse,
            // Records
            Owner,
            MeterReading,
            Bill,
            BillPeriod,
            ReadingRefs,
            UnattributedCostPolicy,
            BillCalculation,
            CalculatedExpense,
            MonthlyTotals,
            OwnerConsumption,
            DashboardSummary,
            // Requests
            calculations::AllocateRequest,
            calculations::ResolveAllocationRequest,
            analytics::PeriodConsumptionRequest,
            analytics::PeriodConsumptionResponse,
            analytics::MonthlyStatsRequest,
            analytics::OwnerStatsRequest,
            analytics::SummaryRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Calculations", description = "Split a utility bill among co-owners by metered consumption"),
        (name = "Analytics", description = "Dashboard statistics over readings and past calculations"),
    ),
    info(
        title = "Utility Split API",
        version = "1.0.0",
        description = "Stateless cost allocation for shared electricity bills",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `prometheus` is `None` when metrics are disabled; `/metrics` is then not
/// mounted.
pub fn create_api_router(
    service: Arc<AllocationService>,
    prometheus: Option<PrometheusHandle>,
) -> Router {
    let health_state = health::HealthState {
        started_at: Arc::new(Instant::now()),
        policy: service.default_policy(),
    };

    let calculation_routes = Router::new()
        .route("/", post(calculations::allocate))
        .route("/resolve", post(calculations::allocate_resolved))
        .with_state(calculations::CalculationState {
            service: service.clone(),
        });

    let analytics_routes = Router::new()
        .route("/period-consumption", post(analytics::period_consumption))
        .route("/monthly", post(analytics::monthly_stats))
        .route("/owners", post(analytics::owner_stats))
        .route("/summary", post(analytics::summary))
        .with_state(analytics::AnalyticsState { service });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check).with_state(health_state))
        .nest("/api/v1/calculations", calculation_routes)
        .nest("/api/v1/analytics", analytics_routes);

    if let Some(handle) = prometheus {
        router = router.route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics::MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
