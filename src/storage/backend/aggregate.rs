//! Aggregations over the filtered venue set (SeaORM DSL)

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sea_orm::{
    ColumnTrait, Condition, FromQueryResult, PaginatorTrait, QuerySelect, Select,
    sea_query::{Alias, Expr, Func},
};
use tracing::debug;

use super::filter::VenueFilter;
use super::{DatabaseBackend, SeaOrmStorage};
use super::query::joined_venues;
use crate::errors::Result;
use crate::storage::models::SummaryMetrics;

use migration::entities::{store, venue};

/// 聚合查询结果
#[derive(Debug, Default, FromQueryResult)]
struct SummaryRow {
    total_venues: i64,
    total_foot_traffic: Option<i64>,
    total_sales: Option<Decimal>,
    sales_count: i64,
    unique_chains: i64,
    unique_cities: i64,
    unique_states: i64,
}

impl SummaryRow {
    fn into_metrics(self, open_venues: u64, closed_venues: u64) -> SummaryMetrics {
        let total_venues = self.total_venues.max(0) as u64;
        let total_foot_traffic = self.total_foot_traffic.unwrap_or(0);
        let total_sales = self.total_sales.unwrap_or(Decimal::ZERO);

        // 没有匹配的行时平均值为 0
        let average_foot_traffic = if total_venues > 0 {
            total_foot_traffic as f64 / total_venues as f64
        } else {
            0.0
        };
        // 只对有 sales 的行求平均（与 SQL AVG 一致）
        let average_sales = if self.sales_count > 0 {
            (total_sales / Decimal::from(self.sales_count))
                .to_f64()
                .unwrap_or(0.0)
        } else {
            0.0
        };

        SummaryMetrics {
            total_venues,
            total_foot_traffic,
            total_sales: total_sales.to_f64().unwrap_or(0.0),
            average_foot_traffic,
            average_sales,
            open_venues,
            closed_venues,
            unique_chains: self.unique_chains.max(0) as u64,
            unique_cities: self.unique_cities.max(0) as u64,
            unique_states: self.unique_states.max(0) as u64,
        }
    }
}

/// 整数列的 SUM 在 MySQL 上是 DECIMAL、在 Postgres 上可能是 NUMERIC，统一转成 64 位整数
fn integer_sum(column: venue::Column, backend: DatabaseBackend) -> Expr {
    let target = match backend {
        DatabaseBackend::MySql => "SIGNED",
        DatabaseBackend::Sqlite | DatabaseBackend::Postgres => "BIGINT",
    };
    Expr::from(Func::cast_as(column.sum(), Alias::new(target)))
}

fn count_distinct(column: impl ColumnTrait) -> Expr {
    Expr::from(Func::count_distinct(Expr::col(column.as_column_ref())))
}

/// 汇总 SELECT，列名与 [`SummaryRow`] 对应
fn summary_select(condition: Condition, backend: DatabaseBackend) -> Select<venue::Entity> {
    joined_venues(condition)
        .select_only()
        .column_as(venue::Column::EntityId.count(), "total_venues")
        .column_as(
            integer_sum(venue::Column::FootTraffic, backend),
            "total_foot_traffic",
        )
        .column_as(venue::Column::Sales.sum(), "total_sales")
        .column_as(venue::Column::Sales.count(), "sales_count")
        .column_as(count_distinct(venue::Column::ChainId), "unique_chains")
        .column_as(count_distinct(store::Column::City), "unique_cities")
        .column_as(count_distinct(store::Column::StateCode), "unique_states")
}

impl SeaOrmStorage {
    /// 过滤后场所的汇总统计
    ///
    /// 与列表使用同一组 JOIN 和过滤条件。
    pub async fn summarize(&self, filter: &VenueFilter) -> Result<SummaryMetrics> {
        let db = &self.db;
        let condition = filter.to_condition();

        let aggregate = summary_select(condition.clone(), self.backend)
            .into_model::<SummaryRow>()
            .one(db);

        // 无门店的场所 stores.date_closed 为 NULL，计入 open
        let open_count =
            joined_venues(condition.clone().add(store::Column::DateClosed.is_null())).count(db);
        let closed_count =
            joined_venues(condition.add(store::Column::DateClosed.is_not_null())).count(db);

        let (row, open_venues, closed_venues) =
            tokio::try_join!(aggregate, open_count, closed_count)?;

        let metrics = row
            .unwrap_or_default()
            .into_metrics(open_venues, closed_venues);
        debug!("summarize: {:?}", metrics);
        Ok(metrics)
    }
}
