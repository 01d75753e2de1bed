//! HTTP handlers
//!
//! 每个端点模块只做参数解析和响应包装，业务逻辑在 `crate::services` 中。

pub mod health;
pub mod helpers;
pub mod routes;
pub mod types;
pub mod users;
pub mod venues;

pub use health::{AppStartTime, HealthService};
pub use helpers::{ApiResponse, error_body, json_response, success_response};
pub use routes::{api_routes, json_config, not_found, query_config};
pub use types::VenueQuery;
