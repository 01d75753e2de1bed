use sea_orm_migration::prelude::*;

use crate::m20250601_000001_initial_tables::{Store, Venue};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (索引名, 表, 列)
fn store_indexes() -> Vec<(&'static str, Store)> {
    vec![
        ("idx_stores_city", Store::City),
        ("idx_stores_state_code", Store::StateCode),
        ("idx_stores_dma", Store::Dma),
        ("idx_stores_sub_category", Store::SubCategory),
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, col) in store_indexes() {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Store::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        // 列表默认按 foot_traffic 排序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_entities_foot_traffic")
                    .table(Venue::Table)
                    .col(Venue::FootTraffic)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_entities_chain_id")
                    .table(Venue::Table)
                    .col(Venue::ChainId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_entities_chain_id")
                    .table(Venue::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_entities_foot_traffic")
                    .table(Venue::Table)
                    .to_owned(),
            )
            .await?;

        for (name, _) in store_indexes() {
            manager
                .drop_index(Index::drop().name(name).table(Store::Table).to_owned())
                .await?;
        }

        Ok(())
    }
}
