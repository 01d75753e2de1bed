use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, trace};

use crate::errors::VenueError;
use crate::storage::SeaOrmStorage;

use super::helpers::{ApiResponse, json_response, success_response};

/// 健康检查中数据库 ping 的超时
const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// 进程启动时刻，用于计算 uptime
#[derive(Clone, Copy, Debug)]
pub struct AppStartTime(chrono::DateTime<chrono::Utc>);

impl AppStartTime {
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    pub fn uptime_secs(&self, at: chrono::DateTime<chrono::Utc>) -> u64 {
        u64::try_from((at - self.0).num_seconds()).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
    /// 运行秒数
    pub uptime: u64,
}

/// `/health` 与 `/stats`，直接访问 storage
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        storage: web::Data<Arc<SeaOrmStorage>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> HttpResponse {
        let start = Instant::now();

        let ping = match tokio::time::timeout(PING_TIMEOUT, storage.ping()).await {
            Ok(result) => result,
            Err(_) => Err(VenueError::database_connection("Database ping timed out")),
        };

        let now = chrono::Utc::now();
        let uptime = app_start_time.uptime_secs(now);

        match ping {
            Ok(()) => {
                trace!("Health check passed in {:?}", start.elapsed());
                success_response(
                    HealthStatus {
                        status: "healthy",
                        timestamp: now.to_rfc3339(),
                        uptime,
                    },
                    "API is healthy and database is connected",
                )
            }
            Err(e) => {
                error!("Health check failed: {}", e);
                json_response(
                    StatusCode::SERVICE_UNAVAILABLE,
                    &ApiResponse {
                        success: false,
                        data: Some(HealthStatus {
                            status: "unhealthy",
                            timestamp: now.to_rfc3339(),
                            uptime,
                        }),
                        message: None,
                        error: Some("Database connection failed".to_string()),
                        stack: None,
                    },
                )
            }
        }
    }

    /// 各表行数
    pub async fn stats(storage: web::Data<Arc<SeaOrmStorage>>) -> ActixResult<HttpResponse> {
        let counts = storage.table_counts().await?;
        Ok(success_response(
            counts,
            "Database statistics retrieved successfully",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_never_negative() {
        let start = AppStartTime::now();
        let earlier = chrono::Utc::now() - chrono::Duration::seconds(30);
        assert_eq!(start.uptime_secs(earlier), 0);
        let later = chrono::Utc::now() + chrono::Duration::seconds(90);
        assert!(start.uptime_secs(later) >= 89);
    }
}
