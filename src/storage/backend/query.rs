//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, JoinType, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::{VenueRow, model_to_user, row_to_list_item};
use super::filter::VenueFilter;
use crate::errors::Result;
use crate::storage::models::{FilterOptions, StateOption, TableCounts, User, VenueListItem};

use migration::entities::{chain, store, user, venue};

/// 城市下拉最多返回的条数
pub const MAX_CITY_OPTIONS: u64 = 100;

/// 列表可排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    FootTraffic,
    Sales,
    ChainName,
    City,
}

impl SortField {
    /// 未知字段回退到 footTraffic
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("sales") => Self::Sales,
            Some("chainName") => Self::ChainName,
            Some("city") => Self::City,
            _ => Self::FootTraffic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FootTraffic => "footTraffic",
            Self::Sales => "sales",
            Self::ChainName => "chainName",
            Self::City => "city",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// 大小写不敏感，其余值按 asc 处理
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    fn as_order(&self) -> Order {
        match self {
            Self::Asc => Order::Asc,
            Self::Desc => Order::Desc,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct StateRow {
    code: String,
    name: Option<String>,
}

/// entities LEFT JOIN chains LEFT JOIN stores，带过滤条件
///
/// 无门店的场所同样保留，其 stores.* 列为 NULL。
pub(super) fn joined_venues(condition: Condition) -> Select<venue::Entity> {
    venue::Entity::find()
        .join(JoinType::LeftJoin, venue::Relation::Chain.def())
        .join(JoinType::LeftJoin, venue::Relation::Store.def())
        .filter(condition)
}

fn select_venue_columns(select: Select<venue::Entity>) -> Select<venue::Entity> {
    select
        .select_only()
        .column_as(venue::Column::EntityId, "entity_id")
        .column_as(venue::Column::EntityType, "entity_type")
        .column_as(venue::Column::ChainId, "chain_id")
        .column_as(venue::Column::StoreId, "store_id")
        .column_as(venue::Column::Name, "entity_name")
        .column_as(venue::Column::City, "entity_city")
        .column_as(venue::Column::StateCode, "entity_state_code")
        .column_as(venue::Column::StateName, "entity_state_name")
        .column_as(venue::Column::SubCategory, "entity_sub_category")
        .column_as(venue::Column::Dma, "entity_dma")
        .column_as(venue::Column::FootTraffic, "foot_traffic")
        .column_as(venue::Column::Sales, "sales")
        .column_as(venue::Column::AvgDwellTimeMin, "avg_dwell_time_min")
        .column_as(venue::Column::FtPerSqft, "ft_per_sqft")
        .column_as(chain::Column::ChainName, "chain_name")
        .column_as(store::Column::StoreId, "store_key")
        .column_as(store::Column::Name, "store_name")
        .column_as(store::Column::City, "store_city")
        .column_as(store::Column::StateCode, "store_state_code")
        .column_as(store::Column::StateName, "store_state_name")
        .column_as(store::Column::SubCategory, "store_sub_category")
        .column_as(store::Column::Dma, "store_dma")
        .column_as(store::Column::DateOpened, "date_opened")
        .column_as(store::Column::DateClosed, "date_closed")
}

fn apply_sort(
    select: Select<venue::Entity>,
    field: SortField,
    order: SortOrder,
) -> Select<venue::Entity> {
    let order = order.as_order();
    let select = match field {
        SortField::FootTraffic => select.order_by(venue::Column::FootTraffic, order),
        SortField::Sales => select.order_by(venue::Column::Sales, order),
        SortField::ChainName => select.order_by(chain::Column::ChainName, order),
        SortField::City => select.order_by(store::Column::City, order),
    };
    // 同值时按 entity_id 保证分页稳定
    select.order_by_asc(venue::Column::EntityId)
}

impl SeaOrmStorage {
    /// 分页查询场所，同时返回过滤后的总数
    pub async fn list_venues(
        &self,
        skip: u64,
        take: u64,
        filter: &VenueFilter,
        sort_field: SortField,
        sort_order: SortOrder,
    ) -> Result<(Vec<VenueListItem>, u64)> {
        let condition = filter.to_condition();

        let page_query = apply_sort(
            select_venue_columns(joined_venues(condition.clone())),
            sort_field,
            sort_order,
        )
        .offset(skip)
        .limit(take)
        .into_model::<VenueRow>()
        .all(&self.db);

        let count_query = joined_venues(condition).count(&self.db);

        let (rows, total) = tokio::try_join!(page_query, count_query)?;
        debug!(
            "list_venues: skip={}, take={}, returned={}, total={}",
            skip,
            take,
            rows.len(),
            total
        );

        Ok((rows.into_iter().map(row_to_list_item).collect(), total))
    }

    /// 下拉筛选项（不受过滤条件影响）
    pub async fn filter_options(&self) -> Result<FilterOptions> {
        let db = &self.db;

        let chain_names = chain::Entity::find()
            .select_only()
            .column(chain::Column::ChainName)
            .order_by_asc(chain::Column::ChainName)
            .into_tuple::<String>()
            .all(db);

        let categories = store::Entity::find()
            .select_only()
            .column(store::Column::SubCategory)
            .distinct()
            .filter(store::Column::SubCategory.is_not_null())
            .order_by_asc(store::Column::SubCategory)
            .into_tuple::<String>()
            .all(db);

        let dmas = store::Entity::find()
            .select_only()
            .column(store::Column::Dma)
            .distinct()
            .filter(store::Column::Dma.is_not_null())
            .order_by_asc(store::Column::Dma)
            .into_tuple::<String>()
            .all(db);

        let cities = store::Entity::find()
            .select_only()
            .column(store::Column::City)
            .distinct()
            .order_by_asc(store::Column::City)
            .limit(MAX_CITY_OPTIONS)
            .into_tuple::<String>()
            .all(db);

        // 每个 state_code 取一个名称
        let states = store::Entity::find()
            .select_only()
            .column_as(store::Column::StateCode, "code")
            .column_as(store::Column::StateName.min(), "name")
            .group_by(store::Column::StateCode)
            .order_by_asc(store::Column::StateName.min())
            .order_by_asc(store::Column::StateCode)
            .into_model::<StateRow>()
            .all(db);

        let (chain_names, categories, dmas, cities, states) =
            tokio::try_join!(chain_names, categories, dmas, cities, states)?;

        Ok(FilterOptions {
            chain_names,
            categories,
            dmas,
            cities,
            states: states
                .into_iter()
                .map(|s| StateOption {
                    name: s.name.unwrap_or_default(),
                    code: s.code,
                })
                .collect(),
        })
    }

    /// 所有用户，最新创建的在前
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let models = user::Entity::find()
            .order_by_desc(user::Column::CreatedAt)
            .order_by_desc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(model_to_user).collect())
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(model_to_user))
    }

    /// 各表行数
    pub async fn table_counts(&self) -> Result<TableCounts> {
        let db = &self.db;
        let (chains, stores, entities) = tokio::try_join!(
            chain::Entity::find().count(db),
            store::Entity::find().count(db),
            venue::Entity::find().count(db),
        )?;

        Ok(TableCounts {
            chains,
            stores,
            entities,
        })
    }
}
