//! Request ID middleware
//!
//! 沿用客户端传入的 X-Request-ID（否则生成 UUID v4），放进 request
//! extensions 和 tracing span，并写回响应头。

use actix_web::{
    Error, HttpMessage,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
    middleware::Next,
};
use tracing::{Instrument, info_span};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 客户端传入的 ID 最长接受的字节数
const MAX_INCOMING_ID_LEN: usize = 128;

/// 请求 ID，handler 可通过 `req.extensions().get::<RequestId>()` 读取
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

fn incoming_request_id(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?.trim();
    (!value.is_empty() && value.len() <= MAX_INCOMING_ID_LEN).then(|| value.to_string())
}

pub async fn request_id(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let id = incoming_request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());
    req.extensions_mut().insert(RequestId(id.clone()));

    // 之后的日志（包括错误处理）都带上 method / path
    let span = info_span!(
        "request",
        request_id = %id,
        method = %req.method(),
        path = %req.path(),
    );

    let mut response = next.call(req).instrument(span).await?;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    Ok(response)
}
