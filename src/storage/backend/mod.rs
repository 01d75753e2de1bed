//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod aggregate;
mod connection;
mod converters;
pub mod filter;
mod mutations;
mod query;

use std::time::Duration;

use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::{info, warn};

use crate::errors::{Result, VenueError};

pub use connection::{DatabaseBackend, PoolSettings, connect, run_migrations};
pub use converters::{VenueRow, decimal_to_string, row_to_list_item};
pub use filter::{FilterClause, VenueFilter, escape_like};
pub use query::{MAX_CITY_OPTIONS, SortField, SortOrder};

/// 关闭连接池的超时时间（秒）
const CLOSE_TIMEOUT_SECS: u64 = 10;

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend: DatabaseBackend,
}

impl SeaOrmStorage {
    /// 连接数据库并运行迁移，后端类型由 URL 推断
    pub async fn new(database_url: &str, pool: &PoolSettings) -> Result<Self> {
        if database_url.trim().is_empty() {
            return Err(VenueError::database_config("database_url 未设置"));
        }

        let backend = DatabaseBackend::from_url(database_url)?;
        let db = connect(database_url, backend, pool).await?;
        run_migrations(&db).await?;

        info!("{} storage initialized", backend.as_str().to_uppercase());
        Ok(SeaOrmStorage { db, backend })
    }

    pub fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.as_str()
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// SELECT 1
    pub async fn ping(&self) -> Result<()> {
        self.db
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| VenueError::database_connection(format!("数据库不可用: {}", e)))?;
        Ok(())
    }

    /// 关闭连接池（带超时）
    pub async fn close(&self) {
        match tokio::time::timeout(
            Duration::from_secs(CLOSE_TIMEOUT_SECS),
            self.db.clone().close(),
        )
        .await
        {
            Ok(Ok(())) => info!("Database connections closed"),
            Ok(Err(e)) => warn!("Failed to close database connections: {}", e),
            Err(_) => warn!(
                "Closing database connections timed out after {} seconds",
                CLOSE_TIMEOUT_SECS
            ),
        }
    }
}
