use std::sync::Arc;

use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::{DatabaseBackend, PoolSettings, SeaOrmStorage, SortField, SortOrder, VenueFilter};
pub use models::{
    EntitySeed, FilterOptions, InsertOutcome, NewUser, StateOption, StoreSeed, SummaryMetrics,
    TableCounts, User, VenueListItem, VenueSeed,
};

pub struct StorageFactory;

impl StorageFactory {
    /// 按全局配置创建存储
    pub async fn create() -> Result<Arc<SeaOrmStorage>> {
        let config = crate::config::get_config();
        Self::create_with_url(&config.database.database_url).await
    }

    /// 使用指定的数据库 URL 创建存储（连接池参数取全局配置）
    pub async fn create_with_url(database_url: &str) -> Result<Arc<SeaOrmStorage>> {
        let config = crate::config::get_config();
        let pool = PoolSettings::from_config(&config.database);

        let storage = SeaOrmStorage::new(database_url, &pool).await?;
        Ok(Arc::new(storage))
    }
}
