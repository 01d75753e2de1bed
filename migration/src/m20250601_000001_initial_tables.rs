use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users 表（演示资源，与场所数据无关）
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(User::Name).string().not_null())
                    .col(ColumnDef::new(User::LastName).string().null())
                    .col(ColumnDef::new(User::Email).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Chain::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Chain::ChainId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Chain::ChainName).string().not_null())
                    .to_owned(),
            )
            .await?;

        // stores 表，(chain_id, store_id) 联合主键
        manager
            .create_table(
                Table::create()
                    .table(Store::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Store::ChainId).string().not_null())
                    .col(ColumnDef::new(Store::StoreId).string().not_null())
                    .col(ColumnDef::new(Store::Name).string().not_null())
                    .col(ColumnDef::new(Store::Latitude).double().null())
                    .col(ColumnDef::new(Store::Longitude).double().null())
                    .col(ColumnDef::new(Store::Country).string().null())
                    .col(ColumnDef::new(Store::StateCode).string().not_null())
                    .col(ColumnDef::new(Store::StateName).string().not_null())
                    .col(ColumnDef::new(Store::City).string().not_null())
                    .col(ColumnDef::new(Store::PostalCode).string().null())
                    .col(ColumnDef::new(Store::FormattedCity).string().null())
                    .col(ColumnDef::new(Store::StreetAddress).string().null())
                    .col(ColumnDef::new(Store::SubCategory).string().null())
                    .col(ColumnDef::new(Store::Dma).string().null())
                    .col(ColumnDef::new(Store::Cbsa).string().null())
                    .col(ColumnDef::new(Store::AreaSqft).integer().null())
                    .col(ColumnDef::new(Store::DateOpened).date().null())
                    .col(ColumnDef::new(Store::DateClosed).date().null())
                    .primary_key(Index::create().col(Store::ChainId).col(Store::StoreId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stores_chain")
                            .from(Store::Table, Store::ChainId)
                            .to(Chain::Table, Chain::ChainId),
                    )
                    .to_owned(),
            )
            .await?;

        // entities 表，store_id 可为空（无实体门店的场所）
        manager
            .create_table(
                Table::create()
                    .table(Venue::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Venue::EntityId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Venue::EntityType).string().null())
                    .col(ColumnDef::new(Venue::ChainId).string().not_null())
                    .col(ColumnDef::new(Venue::StoreId).string().null())
                    .col(ColumnDef::new(Venue::Name).string().null())
                    .col(ColumnDef::new(Venue::City).string().null())
                    .col(ColumnDef::new(Venue::StateCode).string().null())
                    .col(ColumnDef::new(Venue::StateName).string().null())
                    .col(ColumnDef::new(Venue::SubCategory).string().null())
                    .col(ColumnDef::new(Venue::Dma).string().null())
                    .col(
                        ColumnDef::new(Venue::FootTraffic)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Venue::Sales).decimal_len(14, 2).null())
                    .col(ColumnDef::new(Venue::AvgDwellTimeMin).integer().null())
                    .col(ColumnDef::new(Venue::FtPerSqft).decimal_len(14, 4).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entities_chain")
                            .from(Venue::Table, Venue::ChainId)
                            .to(Chain::Table, Chain::ChainId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entities_store")
                            .from(Venue::Table, (Venue::ChainId, Venue::StoreId))
                            .to(Store::Table, (Store::ChainId, Store::StoreId)),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Venue::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Store::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Chain::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Name,
    LastName,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Chain {
    #[sea_orm(iden = "chains")]
    Table,
    ChainId,
    ChainName,
}

#[derive(DeriveIden)]
pub(crate) enum Store {
    #[sea_orm(iden = "stores")]
    Table,
    ChainId,
    StoreId,
    Name,
    Latitude,
    Longitude,
    Country,
    StateCode,
    StateName,
    City,
    PostalCode,
    FormattedCity,
    StreetAddress,
    SubCategory,
    Dma,
    Cbsa,
    AreaSqft,
    DateOpened,
    DateClosed,
}

#[derive(DeriveIden)]
pub(crate) enum Venue {
    #[sea_orm(iden = "entities")]
    Table,
    EntityId,
    EntityType,
    ChainId,
    StoreId,
    Name,
    City,
    StateCode,
    StateName,
    SubCategory,
    Dma,
    FootTraffic,
    Sales,
    AvgDwellTimeMin,
    FtPerSqft,
}
