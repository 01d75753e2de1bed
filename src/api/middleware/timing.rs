//! 访问日志：method、path、status 和耗时

use actix_web::{
    Error,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};
use std::time::Instant;
use tracing::{debug, info, warn};

/// 健康检查只在 debug 级别记录
fn is_health_check(path: &str) -> bool {
    path.ends_with("/health")
}

pub async fn timing(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.path().to_string();

    let result = next.call(req).await;
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    match &result {
        Ok(response) => {
            let status = response.status().as_u16();
            if is_health_check(&path) {
                debug!(%method, %path, status, latency_ms, "request completed");
            } else {
                info!(%method, %path, status, latency_ms, "request completed");
            }
        }
        Err(e) => warn!(%method, %path, latency_ms, "request failed: {}", e),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_health_check() {
        assert!(is_health_check("/api/health"));
        assert!(!is_health_check("/api/venues"));
    }
}
