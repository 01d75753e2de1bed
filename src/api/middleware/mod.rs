//! HTTP middleware
//!
//! 均为 `actix_web::middleware::from_fn` 形式的 async fn，
//! 使用方式：`.wrap(from_fn(request_id))`。

pub mod request_id;
pub mod timing;

pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id};
pub use timing::timing;
