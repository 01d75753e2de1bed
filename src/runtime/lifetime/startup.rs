use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::services::AppStartTime;
use crate::services::{UserService, VenueService};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// 服务器运行所需的共享对象
#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub venue_service: Arc<VenueService>,
    pub user_service: Arc<UserService>,
    pub app_start_time: AppStartTime,
}

impl StartupContext {
    /// 基于已有存储构建上下文
    pub fn from_storage(storage: Arc<SeaOrmStorage>) -> Self {
        Self {
            venue_service: Arc::new(VenueService::new(storage.clone())),
            user_service: Arc::new(UserService::new(storage.clone())),
            storage,
            app_start_time: AppStartTime::now(),
        }
    }
}

/// 准备服务器启动的上下文：连接数据库、执行迁移、创建 service
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let counts = storage
        .table_counts()
        .await
        .context("Failed to read table counts")?;
    info!(
        "Database ready: {} chains, {} stores, {} entities",
        counts.chains, counts.stores, counts.entities
    );

    debug!("Pre-startup completed in {:?}", start_time.elapsed());
    Ok(StartupContext::from_storage(storage))
}
