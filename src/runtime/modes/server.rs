use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    http::Method,
    middleware::{Compress, DefaultHeaders, from_fn},
    web,
};
use anyhow::Result;
use tracing::{error, info, warn};

use crate::api::middleware::{request_id, timing};
use crate::api::services::{api_routes, json_config, not_found, query_config};
use crate::config::CorsConfig;
use crate::runtime::lifetime::{self, startup::StartupContext};

/// 根据 `[cors]` 构造中间件；`enabled = false` 时返回 actix-cors 的默认（同源）策略
pub fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    if !cors_config.enabled {
        return Cors::default();
    }

    let wildcard = cors_config.allowed_origins.iter().any(|o| o == "*");
    let mut cors = if wildcard {
        Cors::default().allow_any_origin()
    } else {
        cors_config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| Method::from_bytes(m.trim().to_ascii_uppercase().as_bytes()).ok())
        .collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    cors = cors_config
        .allowed_headers
        .iter()
        .fold(cors, |cors, header| cors.allowed_header(header.as_str()))
        .max_age(cors_config.max_age as usize);

    // 通配 origin 与 credentials 不能同时开启
    match (wildcard, cors_config.allow_credentials) {
        (false, true) => cors.supports_credentials(),
        (true, true) => {
            warn!("cors: allow_credentials ignored because allowed_origins contains \"*\"");
            cors
        }
        _ => cors,
    }
}

/// 注册 app_data、路由和 404 处理
///
/// 集成测试复用这里以获得与生产一致的路由表。
pub fn configure_app(cfg: &mut web::ServiceConfig, ctx: &StartupContext, api_prefix: &str) {
    cfg.app_data(web::Data::new(ctx.storage.clone()))
        .app_data(web::Data::new(ctx.venue_service.clone()))
        .app_data(web::Data::new(ctx.user_service.clone()))
        .app_data(web::Data::new(ctx.app_start_time.clone()))
        .app_data(json_config())
        .app_data(query_config())
        .service(api_routes(api_prefix))
        .default_service(web::to(not_found));
}

pub async fn run_server() -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| {
            error!("Server startup failed: {}", e);
            e
        })?;

    let config = crate::config::get_config();

    let workers = config.server.cpu_count.clamp(1, 32);
    let cors_config = config.cors.clone();

    let api_prefix = config.server.api_prefix.clone();
    let storage = startup.storage.clone();
    let ctx = startup.clone();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&cors_config);

        App::new()
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-store")))
            .wrap(Compress::default())
            .wrap(cors)
            .wrap(from_fn(timing))
            // 最后注册的在最外层，timing 和错误日志都落在 request span 内
            .wrap(from_fn(request_id))
            .configure(|cfg| configure_app(cfg, &ctx, &api_prefix))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(workers)
    .bind(&bind_address)?;

    info!(
        workers,
        backend = storage.backend_name(),
        "Listening on http://{}{}",
        bind_address,
        config.server.api_prefix
    );

    let result = server.run().await;

    lifetime::shutdown::shutdown(&storage).await;

    result.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_variants_build() {
        let _ = build_cors_middleware(&CorsConfig::default());

        let wildcard = CorsConfig {
            allowed_origins: vec!["*".into()],
            allowed_methods: vec!["get".into(), "bogus method".into()],
            ..CorsConfig::default()
        };
        let _ = build_cors_middleware(&wildcard);

        let disabled = CorsConfig {
            enabled: false,
            ..CorsConfig::default()
        };
        let _ = build_cors_middleware(&disabled);
    }
}
