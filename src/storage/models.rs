//! 存储层返回给上层的数据结构
//!
//! JSON 字段一律使用 camelCase，供 dashboard 直接消费。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::TS_EXPORT_PATH;

/// 场所列表项（entity + chain + store 扁平化）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct VenueListItem {
    pub entity_id: String,
    pub entity_type: Option<String>,
    pub name: String,
    pub chain_id: String,
    pub chain_name: String,
    pub store_id: Option<String>,
    pub sub_category: Option<String>,
    pub dma: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub state_name: Option<String>,
    pub open: bool,
    /// YYYY-MM-DD
    pub date_opened: Option<String>,
    pub date_closed: Option<String>,
    pub foot_traffic: i32,
    /// 十进制字符串（去掉尾随 0），例如 "1234.5"
    pub sales: Option<String>,
    pub avg_dwell_time_min: Option<i32>,
    pub ft_per_sqft: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct StateOption {
    pub code: String,
    pub name: String,
}

/// 下拉筛选项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub chain_names: Vec<String>,
    pub categories: Vec<String>,
    pub dmas: Vec<String>,
    pub cities: Vec<String>,
    pub states: Vec<StateOption>,
}

/// 汇总统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    #[ts(type = "number")]
    pub total_venues: u64,
    #[ts(type = "number")]
    pub total_foot_traffic: i64,
    pub total_sales: f64,
    pub average_foot_traffic: f64,
    pub average_sales: f64,
    #[ts(type = "number")]
    pub open_venues: u64,
    #[ts(type = "number")]
    pub closed_venues: u64,
    #[ts(type = "number")]
    pub unique_chains: u64,
    #[ts(type = "number")]
    pub unique_cities: u64,
    #[ts(type = "number")]
    pub unique_states: u64,
}

/// 用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub last_name: Option<String>,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 新建用户（已校验）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub last_name: Option<String>,
    pub email: String,
}

/// 各表行数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct TableCounts {
    #[ts(type = "number")]
    pub chains: u64,
    #[ts(type = "number")]
    pub stores: u64,
    #[ts(type = "number")]
    pub entities: u64,
}

/// 单行导入结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyExists,
}

/// 导入用：链 + 可选门店 + 场所，已完成校验
#[derive(Debug, Clone, PartialEq)]
pub struct VenueSeed {
    pub chain_id: String,
    pub chain_name: String,
    pub store: Option<StoreSeed>,
    pub entity: EntitySeed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreSeed {
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
    pub date_opened: Option<chrono::NaiveDate>,
    pub date_closed: Option<chrono::NaiveDate>,
}

/// 场所本身的字段；没有门店时描述性字段直接存在 entity 上
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySeed {
    pub entity_id: String,
    pub entity_type: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub state_name: Option<String>,
    pub sub_category: Option<String>,
    pub dma: Option<String>,
    pub foot_traffic: i32,
    pub sales: Option<rust_decimal::Decimal>,
    pub avg_dwell_time_min: Option<i32>,
    pub ft_per_sqft: Option<rust_decimal::Decimal>,
}
