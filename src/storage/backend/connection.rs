//! 数据库连接
//!
//! 后端类型由 URL 推断；SQLite 走 sqlx 连接池以便设置 WAL 和外键，
//! MySQL / PostgreSQL 走 SeaORM 的 `ConnectOptions`。

use std::str::FromStr;
use std::time::Duration;

use sea_orm::sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, SqlxSqliteConnector};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::errors::{Result, VenueError};
use migration::{Migrator, MigratorTrait};

/// SQLite 写锁等待时间
const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// 支持的数据库后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Sqlite,
    /// MySQL 与 MariaDB
    MySql,
    Postgres,
}

impl DatabaseBackend {
    /// 从数据库 URL 推断后端
    pub fn from_url(database_url: &str) -> Result<Self> {
        let url = database_url.trim();
        if url.starts_with("sqlite:")
            || url == ":memory:"
            || url.ends_with(".db")
            || url.ends_with(".sqlite")
        {
            Ok(Self::Sqlite)
        } else if url.starts_with("mysql://") || url.starts_with("mariadb://") {
            Ok(Self::MySql)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Self::Postgres)
        } else {
            Err(VenueError::database_config(format!(
                "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
                database_url
            )))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
        }
    }
}

impl std::fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 连接池参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    /// 建立连接与获取连接的超时
    pub timeout: Duration,
}

impl PoolSettings {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            max_connections: config.pool_size.max(1),
            timeout: Duration::from_secs(config.timeout.max(1)),
        }
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self::from_config(&DatabaseConfig::default())
    }
}

/// mariadb:// 交给 MySQL 驱动
fn driver_url(database_url: &str, backend: DatabaseBackend) -> String {
    match (backend, database_url.strip_prefix("mariadb://")) {
        (DatabaseBackend::MySql, Some(rest)) => format!("mysql://{}", rest),
        _ => database_url.to_string(),
    }
}

/// 按后端建立连接
pub async fn connect(
    database_url: &str,
    backend: DatabaseBackend,
    pool: &PoolSettings,
) -> Result<DatabaseConnection> {
    debug!(
        "Connecting to {} (max {} connections, timeout {:?})",
        backend, pool.max_connections, pool.timeout
    );
    match backend {
        DatabaseBackend::Sqlite => connect_sqlite(database_url, pool).await,
        DatabaseBackend::MySql | DatabaseBackend::Postgres => {
            connect_pooled(&driver_url(database_url, backend), backend, pool).await
        }
    }
}

async fn connect_sqlite(database_url: &str, pool: &PoolSettings) -> Result<DatabaseConnection> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| VenueError::database_config(format!("SQLite URL 解析失败: {}", e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(SQLITE_BUSY_TIMEOUT)
        // stores / entities 的外键依赖它
        .foreign_keys(true);

    let sqlx_pool = SqlitePoolOptions::new()
        .max_connections(pool.max_connections)
        .acquire_timeout(pool.timeout)
        .connect_with(options)
        .await
        .map_err(|e| {
            VenueError::database_connection(format!("无法连接到 SQLite 数据库: {}", e))
        })?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(sqlx_pool))
}

async fn connect_pooled(
    database_url: &str,
    backend: DatabaseBackend,
    pool: &PoolSettings,
) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(pool.max_connections)
        .min_connections(1)
        .connect_timeout(pool.timeout)
        .acquire_timeout(pool.timeout)
        .sqlx_logging(false);

    Database::connect(options).await.map_err(|e| {
        VenueError::database_connection(format!(
            "无法连接到 {} 数据库: {}",
            backend.as_str().to_uppercase(),
            e
        ))
    })
}

/// 执行未应用的迁移
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None)
        .await
        .map_err(|e| VenueError::database_operation(format!("迁移失败: {}", e)))?;

    info!("Database schema is up to date");
    Ok(())
}
