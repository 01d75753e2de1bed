//! API 路由配置

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::warn;

use super::health::HealthService;
use super::helpers::{ApiResponse, json_response};
use super::users::{create_user, list_users};
use super::venues::{filter_options, list_venues, venue_summary};

/// 场所路由 `/venues`
///
/// 固定路径需在列表路由之前注册
pub fn venues_routes() -> actix_web::Scope {
    web::scope("/venues")
        .route("/filter-options", web::get().to(filter_options))
        .route("/summary", web::get().to(venue_summary))
        .route("", web::get().to(list_venues))
}

/// 用户路由 `/users`
pub fn users_routes() -> actix_web::Scope {
    web::scope("/users")
        .route("", web::get().to(list_users))
        .route("", web::post().to(create_user))
}

/// 挂载在 `api_prefix` 下的全部路由
pub fn api_routes(api_prefix: &str) -> actix_web::Scope {
    web::scope(api_prefix)
        .route("/health", web::get().to(HealthService::health_check))
        .route("/stats", web::get().to(HealthService::stats))
        .service(users_routes())
        .service(venues_routes())
}

/// 未匹配的路由
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| req.path());

    json_response(
        StatusCode::NOT_FOUND,
        &ApiResponse::failure(format!("Route {} not found", path), None),
    )
}

fn bad_request(message: String) -> HttpResponse {
    json_response(
        StatusCode::BAD_REQUEST,
        &ApiResponse::failure(message, None),
    )
}

/// JSON body 解析失败时返回 400 envelope
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err: JsonPayloadError, _req| {
            warn!("Rejected JSON body: {}", err);
            let response = bad_request(format!("Invalid JSON body: {}", err));
            InternalError::from_response(err, response).into()
        })
}

/// Query string 解析失败时返回 400 envelope
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req| {
        warn!("Rejected query string: {}", err);
        let response = bad_request(format!("Invalid query string: {}", err));
        InternalError::from_response(err, response).into()
    })
}
