use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::FromQueryResult;

use crate::storage::models::{EntitySeed, StoreSeed, User, VenueListItem};
use migration::entities::{chain, store, user, venue};

/// 列表查询的扁平结果行（entities LEFT JOIN chains LEFT JOIN stores）
///
/// entity 与 store 同名字段分别带 `entity_` / `store_` 前缀别名。
#[derive(Debug, Clone, Default, FromQueryResult)]
pub struct VenueRow {
    pub entity_id: String,
    pub entity_type: Option<String>,
    pub chain_id: String,
    pub store_id: Option<String>,
    pub entity_name: Option<String>,
    pub entity_city: Option<String>,
    pub entity_state_code: Option<String>,
    pub entity_state_name: Option<String>,
    pub entity_sub_category: Option<String>,
    pub entity_dma: Option<String>,
    pub foot_traffic: i32,
    pub sales: Option<Decimal>,
    pub avg_dwell_time_min: Option<i32>,
    pub ft_per_sqft: Option<Decimal>,
    pub chain_name: Option<String>,
    /// stores.store_id，为空说明没有关联门店
    pub store_key: Option<String>,
    pub store_name: Option<String>,
    pub store_city: Option<String>,
    pub store_state_code: Option<String>,
    pub store_state_name: Option<String>,
    pub store_sub_category: Option<String>,
    pub store_dma: Option<String>,
    pub date_opened: Option<NaiveDate>,
    pub date_closed: Option<NaiveDate>,
}

/// Decimal 转字符串，去掉多余的尾随零
pub fn decimal_to_string(value: Decimal, scale: u32) -> String {
    value.round_dp(scale).normalize().to_string()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 将查询行转换为列表 DTO
///
/// 描述性字段优先取门店，其次取 entity 自身；无门店的场所视为营业中。
pub fn row_to_list_item(row: VenueRow) -> VenueListItem {
    let has_store = row.store_key.is_some();

    let name = row
        .store_name
        .or(row.entity_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| format!("Entity {}", row.entity_id));

    VenueListItem {
        name,
        entity_type: row.entity_type,
        chain_id: row.chain_id,
        chain_name: row.chain_name.unwrap_or_default(),
        store_id: row.store_id,
        sub_category: row.store_sub_category.or(row.entity_sub_category),
        dma: row.store_dma.or(row.entity_dma),
        city: row.store_city.or(row.entity_city),
        state_code: row.store_state_code.or(row.entity_state_code),
        state_name: row.store_state_name.or(row.entity_state_name),
        open: !has_store || row.date_closed.is_none(),
        date_opened: row.date_opened.map(format_date),
        date_closed: row.date_closed.map(format_date),
        foot_traffic: row.foot_traffic,
        sales: row.sales.map(|d| decimal_to_string(d, 2)),
        avg_dwell_time_min: row.avg_dwell_time_min,
        ft_per_sqft: row.ft_per_sqft.map(|d| decimal_to_string(d, 4)),
        entity_id: row.entity_id,
    }
}

/// 将 Sea-ORM Model 转换为 User
pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        last_name: model.last_name,
        email: model.email,
        created_at: model.created_at,
    }
}

pub fn chain_active_model(chain_id: &str, chain_name: &str) -> chain::ActiveModel {
    use sea_orm::ActiveValue::*;

    chain::ActiveModel {
        chain_id: Set(chain_id.to_string()),
        chain_name: Set(chain_name.to_string()),
    }
}

pub fn store_active_model(chain_id: &str, seed: &StoreSeed) -> store::ActiveModel {
    use sea_orm::ActiveValue::*;

    store::ActiveModel {
        chain_id: Set(chain_id.to_string()),
        store_id: Set(seed.store_id.clone()),
        name: Set(seed.name.clone()),
        latitude: Set(seed.latitude),
        longitude: Set(seed.longitude),
        country: Set(seed.country.clone()),
        state_code: Set(seed.state_code.clone()),
        state_name: Set(seed.state_name.clone()),
        city: Set(seed.city.clone()),
        postal_code: Set(seed.postal_code.clone()),
        formatted_city: Set(seed.formatted_city.clone()),
        street_address: Set(seed.street_address.clone()),
        sub_category: Set(seed.sub_category.clone()),
        dma: Set(seed.dma.clone()),
        cbsa: Set(seed.cbsa.clone()),
        area_sqft: Set(seed.area_sqft),
        date_opened: Set(seed.date_opened),
        date_closed: Set(seed.date_closed),
    }
}

/// 有门店时 entity 只保存外键，描述性字段留空
pub fn venue_active_model(
    chain_id: &str,
    store_id: Option<&str>,
    seed: &EntitySeed,
) -> venue::ActiveModel {
    use sea_orm::ActiveValue::*;

    let own = |v: &Option<String>| if store_id.is_some() { None } else { v.clone() };

    venue::ActiveModel {
        entity_id: Set(seed.entity_id.clone()),
        entity_type: Set(seed.entity_type.clone()),
        chain_id: Set(chain_id.to_string()),
        store_id: Set(store_id.map(str::to_string)),
        name: Set(own(&seed.name)),
        city: Set(own(&seed.city)),
        state_code: Set(own(&seed.state_code)),
        state_name: Set(own(&seed.state_name)),
        sub_category: Set(own(&seed.sub_category)),
        dma: Set(own(&seed.dma)),
        foot_traffic: Set(seed.foot_traffic),
        sales: Set(seed.sales),
        avg_dwell_time_min: Set(seed.avg_dwell_time_min),
        ft_per_sqft: Set(seed.ft_per_sqft),
    }
}
