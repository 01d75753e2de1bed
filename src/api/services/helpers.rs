//! API 响应帮助函数
//!
//! 统一的 envelope：`{success, data?, message?, error?, stack?}`，
//! 以及 `VenueError` 到 HTTP 响应的映射。

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use tracing::{error, warn};

use crate::errors::VenueError;

/// 非 operational 错误在生产环境下统一返回的消息
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
            stack: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(error: impl Into<String>, stack: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
            stack,
        }
    }
}

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

/// 构建成功响应（200 + envelope）
pub fn success_response<T: Serialize>(data: T, message: &str) -> HttpResponse {
    json_response(StatusCode::OK, &ApiResponse::ok(data, message))
}

/// 错误响应体
pub fn error_body(err: &VenueError, development: bool) -> ApiResponse<()> {
    let message = if err.is_operational() || development {
        err.message().to_string()
    } else {
        GENERIC_ERROR_MESSAGE.to_string()
    };
    let stack = development.then(|| format!("{} {}: {}", err.code(), err.error_type(), err.message()));
    ApiResponse::failure(message, stack)
}

fn is_development() -> bool {
    crate::config::try_get_config()
        .map(|config| config.app.environment.is_development())
        .unwrap_or(false)
}

impl ResponseError for VenueError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        // method / path 由外层 request span 提供
        if self.is_operational() {
            warn!("{} {}: {}", self.code(), self.error_type(), self.message());
        } else {
            error!("{} {}: {}", self.code(), self.error_type(), self.message());
        }

        json_response(self.status_code(), &error_body(self, is_development()))
    }
}
