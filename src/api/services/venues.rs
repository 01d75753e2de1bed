//! 场所端点：列表、筛选项、汇总

use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use std::sync::Arc;
use tracing::trace;

use crate::services::VenueService;
use crate::storage::{SummaryMetrics, VenueFilter};

use super::helpers::{json_response, success_response};
use super::types::VenueQuery;

/// `/venues/summary` 响应体，`filters` 与 `data` 同级
#[derive(Debug, Serialize)]
struct SummaryResponse {
    success: bool,
    data: SummaryMetrics,
    filters: VenueFilter,
    message: &'static str,
}

/// GET /venues
pub async fn list_venues(
    service: web::Data<Arc<VenueService>>,
    query: web::Query<VenueQuery>,
) -> ActixResult<HttpResponse> {
    trace!("Venue list request: {:?}", query);

    let request = query.to_list_request()?;
    let response = service.list(request).await?;

    Ok(HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(response))
}

/// GET /venues/filter-options
pub async fn filter_options(service: web::Data<Arc<VenueService>>) -> ActixResult<HttpResponse> {
    let options = service.filter_options().await?;
    Ok(success_response(
        options,
        "Filter options retrieved successfully",
    ))
}

/// GET /venues/summary
pub async fn venue_summary(
    service: web::Data<Arc<VenueService>>,
    query: web::Query<VenueQuery>,
) -> ActixResult<HttpResponse> {
    let filter = query.to_filter()?;
    let data = service.summary(&filter).await?;

    Ok(json_response(
        actix_web::http::StatusCode::OK,
        &SummaryResponse {
            success: true,
            data,
            filters: filter,
            message: "Venue summary statistics retrieved successfully",
        },
    ))
}
