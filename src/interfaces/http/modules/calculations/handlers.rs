//! Calculation REST API handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use super::dto::{AllocateRequest, ResolveAllocationRequest};
use crate::application::AllocationService;
use crate::domain::BillCalculation;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct CalculationState {
    pub service: Arc<AllocationService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/calculations",
    tag = "Calculations",
    request_body = AllocateRequest,
    responses(
        (status = 200, description = "Per-owner cost breakdown", body = ApiResponse<BillCalculation>),
        (status = 400, description = "Malformed JSON"),
        (status = 422, description = "Invalid bill, readings or owners")
    )
)]
pub async fn allocate(
    State(state): State<CalculationState>,
    ValidatedJson(req): ValidatedJson<AllocateRequest>,
) -> Result<Json<ApiResponse<BillCalculation>>, ApiError> {
    state
        .service
        .calculate(
            &req.bill,
            &req.start_reading,
            &req.end_reading,
            &req.owners,
            req.policy,
        )
        .map(|calc| Json(ApiResponse::success(calc)))
        .map_err(domain_error)
}

#[utoipa::path(
    post,
    path = "/api/v1/calculations/resolve",
    tag = "Calculations",
    request_body = ResolveAllocationRequest,
    responses(
        (status = 200, description = "Per-owner cost breakdown", body = ApiResponse<BillCalculation>),
        (status = 404, description = "A referenced reading is not in the list"),
        (status = 422, description = "Invalid input or fewer than two readings in the period")
    )
)]
pub async fn allocate_resolved(
    State(state): State<CalculationState>,
    ValidatedJson(req): ValidatedJson<ResolveAllocationRequest>,
) -> Result<Json<ApiResponse<BillCalculation>>, ApiError> {
    state
        .service
        .calculate_bill(&req.bill, &req.readings, &req.owners, req.policy)
        .map(|calc| Json(ApiResponse::success(calc)))
        .map_err(domain_error)
}
