use sea_orm::entity::prelude::*;

/// 门店，由 (chain_id, store_id) 联合主键唯一标识
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stores")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub chain_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub store_id: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
    pub state_code: String,
    pub state_name: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub formatted_city: Option<String>,
    pub street_address: Option<String>,
    pub sub_category: Option<String>,
    pub dma: Option<String>,
    pub cbsa: Option<String>,
    pub area_sqft: Option<i32>,
    /// NULL 表示未知
    pub date_opened: Option<Date>,
    /// NULL 表示仍在营业
    pub date_closed: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chain::Entity",
        from = "Column::ChainId",
        to = "super::chain::Column::ChainId"
    )]
    Chain,
}

impl Related<super::chain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chain.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
