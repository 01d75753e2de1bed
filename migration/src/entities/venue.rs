use sea_orm::entity::prelude::*;

/// 场所（POI），对应 `entities` 表
///
/// `store_id` 为空时没有关联门店，此时 name/city/state 等描述字段
/// 直接保存在本表中作为后备值。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub entity_id: String,
    pub entity_type: Option<String>,
    pub chain_id: String,
    pub store_id: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub state_name: Option<String>,
    pub sub_category: Option<String>,
    pub dma: Option<String>,
    pub foot_traffic: i32,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    pub sales: Option<Decimal>,
    pub avg_dwell_time_min: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((14, 4)))", nullable)]
    pub ft_per_sqft: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chain::Entity",
        from = "Column::ChainId",
        to = "super::chain::Column::ChainId"
    )]
    Chain,
    #[sea_orm(
        belongs_to = "super::store::Entity",
        from = "(Column::ChainId, Column::StoreId)",
        to = "(super::store::Column::ChainId, super::store::Column::StoreId)"
    )]
    Store,
}

impl Related<super::chain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chain.def()
    }
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
