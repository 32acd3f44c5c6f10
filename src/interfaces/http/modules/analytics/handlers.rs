//! Analytics API handlers
//!
//! Summaries over data supplied in the request body. Calculations passed in
//! are used as-is; nothing is re-allocated.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use super::dto::*;
use crate::application::AllocationService;
use crate::domain::{DashboardSummary, MonthlyTotals, OwnerConsumption};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct AnalyticsState {
    pub service: Arc<AllocationService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/analytics/period-consumption",
    tag = "Analytics",
    request_body = PeriodConsumptionRequest,
    responses(
        (status = 200, description = "Total consumption across the readings", body = ApiResponse<PeriodConsumptionResponse>)
    )
)]
pub async fn period_consumption(
    State(state): State<AnalyticsState>,
    ValidatedJson(req): ValidatedJson<PeriodConsumptionRequest>,
) -> Json<ApiResponse<PeriodConsumptionResponse>> {
    let total_consumption = state.service.period_consumption(&req.readings, &req.owners);
    Json(ApiResponse::success(PeriodConsumptionResponse {
        total_consumption,
        reading_count: req.readings.len(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/analytics/monthly",
    tag = "Analytics",
    request_body = MonthlyStatsRequest,
    responses(
        (status = 200, description = "Per-owner cost by month, oldest first", body = ApiResponse<Vec<MonthlyTotals>>)
    )
)]
pub async fn monthly_stats(
    State(state): State<AnalyticsState>,
    ValidatedJson(req): ValidatedJson<MonthlyStatsRequest>,
) -> Json<ApiResponse<Vec<MonthlyTotals>>> {
    Json(ApiResponse::success(
        state.service.monthly_stats(&req.calculations, req.months_back),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/analytics/owners",
    tag = "Analytics",
    request_body = OwnerStatsRequest,
    responses(
        (status = 200, description = "Total consumption per owner", body = ApiResponse<Vec<OwnerConsumption>>)
    )
)]
pub async fn owner_stats(
    State(state): State<AnalyticsState>,
    ValidatedJson(req): ValidatedJson<OwnerStatsRequest>,
) -> Json<ApiResponse<Vec<OwnerConsumption>>> {
    Json(ApiResponse::success(
        state.service.owner_stats(&req.calculations, &req.owners),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/analytics/summary",
    tag = "Analytics",
    request_body = SummaryRequest,
    responses(
        (status = 200, description = "Dashboard headline figures", body = ApiResponse<DashboardSummary>)
    )
)]
pub async fn summary(
    State(state): State<AnalyticsState>,
    ValidatedJson(req): ValidatedJson<SummaryRequest>,
) -> Json<ApiResponse<DashboardSummary>> {
    Json(ApiResponse::success(
        state.service.summary(&req.owners, &req.readings, &req.bills),
    ))
}
