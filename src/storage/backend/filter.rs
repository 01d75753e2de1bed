//! Venue filter builder
//!
//! `VenueFilter` 是经过解析的强类型过滤条件，每个字段对应一个
//! `FilterClause`，最终 AND 合并成一个 SeaORM `Condition`。
//! 谓词引用的 chains / stores 列依赖查询时的 LEFT JOIN。

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, Condition, ExprTrait,
    sea_query::{Expr, Func, LikeExpr},
};
use serde::Serialize;

use migration::entities::{chain, store};

/// 场所过滤条件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dma: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opened_after: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opened_before: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_after: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_before: Option<NaiveDate>,
}

/// 单个过滤谓词
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterClause {
    ChainName(String),
    Category(String),
    Dma(String),
    City(String),
    StateCode(String),
    StateName(String),
    /// true: 未关闭（含无门店的场所）
    Open(bool),
    OpenedAfter(NaiveDate),
    OpenedBefore(NaiveDate),
    ClosedAfter(NaiveDate),
    ClosedBefore(NaiveDate),
}

impl FilterClause {
    /// 转换为 SQL 条件
    pub fn to_condition(&self) -> Condition {
        let cond = Condition::all();
        match self {
            Self::ChainName(s) => cond.add(contains_ci(chain::Column::ChainName, s)),
            Self::Category(s) => cond.add(contains_ci(store::Column::SubCategory, s)),
            Self::Dma(s) => cond.add(contains_ci(store::Column::Dma, s)),
            Self::City(s) => cond.add(contains_ci(store::Column::City, s)),
            Self::StateCode(s) => cond.add(store::Column::StateCode.eq(s.to_uppercase())),
            Self::StateName(s) => cond.add(contains_ci(store::Column::StateName, s)),
            Self::Open(true) => cond.add(store::Column::DateClosed.is_null()),
            Self::Open(false) => cond.add(store::Column::DateClosed.is_not_null()),
            Self::OpenedAfter(d) => cond.add(store::Column::DateOpened.gte(*d)),
            Self::OpenedBefore(d) => cond.add(store::Column::DateOpened.lte(*d)),
            Self::ClosedAfter(d) => cond.add(store::Column::DateClosed.gte(*d)),
            Self::ClosedBefore(d) => cond.add(store::Column::DateClosed.lte(*d)),
        }
    }
}

impl VenueFilter {
    /// 按固定顺序展开为谓词列表，空字符串视为未设置
    pub fn clauses(&self) -> Vec<FilterClause> {
        let mut clauses = Vec::new();

        if let Some(s) = non_empty(&self.chain_name) {
            clauses.push(FilterClause::ChainName(s));
        }
        if let Some(s) = non_empty(&self.category) {
            clauses.push(FilterClause::Category(s));
        }
        if let Some(s) = non_empty(&self.dma) {
            clauses.push(FilterClause::Dma(s));
        }
        if let Some(s) = non_empty(&self.city) {
            clauses.push(FilterClause::City(s));
        }
        if let Some(s) = non_empty(&self.state_code) {
            clauses.push(FilterClause::StateCode(s));
        }
        if let Some(s) = non_empty(&self.state_name) {
            clauses.push(FilterClause::StateName(s));
        }
        if let Some(open) = self.open {
            clauses.push(FilterClause::Open(open));
        }
        if let Some(d) = self.opened_after {
            clauses.push(FilterClause::OpenedAfter(d));
        }
        if let Some(d) = self.opened_before {
            clauses.push(FilterClause::OpenedBefore(d));
        }
        if let Some(d) = self.closed_after {
            clauses.push(FilterClause::ClosedAfter(d));
        }
        if let Some(d) = self.closed_before {
            clauses.push(FilterClause::ClosedBefore(d));
        }

        clauses
    }

    /// 合并所有谓词（AND）
    pub fn to_condition(&self) -> Condition {
        self.clauses()
            .iter()
            .fold(Condition::all(), |cond, clause| cond.add(clause.to_condition()))
    }

    pub fn is_empty(&self) -> bool {
        self.clauses().is_empty()
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// 转义 LIKE 通配符，按字面匹配
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 大小写不敏感的子串匹配：LOWER(col) LIKE '%input%'
fn contains_ci<C: ColumnTrait>(col: C, input: &str) -> Expr {
    let pattern = format!("%{}%", escape_like(&input.to_lowercase()));
    Func::lower(Expr::col(col.as_column_ref())).like(LikeExpr::new(pattern).escape('\\'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::entities::venue;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn render(filter: &VenueFilter) -> String {
        venue::Entity::find()
            .filter(filter.to_condition())
            .build(DbBackend::Sqlite)
            .to_string()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_filter_has_no_where() {
        let filter = VenueFilter::default();
        assert!(filter.is_empty());
        assert!(!render(&filter).contains("WHERE"));
    }

    #[test]
    fn test_empty_strings_are_ignored() {
        let filter = VenueFilter {
            city: Some("".into()),
            dma: Some("   ".into()),
            ..Default::default()
        };
        assert!(filter.clauses().is_empty());
    }

    #[test]
    fn test_clause_order_is_fixed() {
        let filter = VenueFilter {
            closed_before: Some(date("2024-01-01")),
            city: Some("Austin".into()),
            chain_name: Some("Acme".into()),
            open: Some(false),
            ..Default::default()
        };
        assert_eq!(
            filter.clauses(),
            vec![
                FilterClause::ChainName("Acme".into()),
                FilterClause::City("Austin".into()),
                FilterClause::Open(false),
                FilterClause::ClosedBefore(date("2024-01-01")),
            ]
        );
    }

    #[test]
    fn test_city_is_case_insensitive_substring() {
        let sql = render(&VenueFilter {
            city: Some("AusTin".into()),
            ..Default::default()
        });
        assert!(sql.contains(r#"LOWER("stores"."city") LIKE '%austin%'"#), "{sql}");
    }

    #[test]
    fn test_chain_name_targets_chains_table() {
        let sql = render(&VenueFilter {
            chain_name: Some("acme".into()),
            ..Default::default()
        });
        assert!(sql.contains(r#"LOWER("chains"."chain_name") LIKE '%acme%'"#), "{sql}");
    }

    #[test]
    fn test_state_code_is_uppercased_equality() {
        let sql = render(&VenueFilter {
            state_code: Some("ca".into()),
            ..Default::default()
        });
        assert!(sql.contains(r#""stores"."state_code" = 'CA'"#), "{sql}");
    }

    #[test]
    fn test_open_flag() {
        let open = render(&VenueFilter {
            open: Some(true),
            ..Default::default()
        });
        assert!(open.contains(r#""stores"."date_closed" IS NULL"#), "{open}");

        let closed = render(&VenueFilter {
            open: Some(false),
            ..Default::default()
        });
        assert!(closed.contains(r#""stores"."date_closed" IS NOT NULL"#), "{closed}");
    }

    #[test]
    fn test_date_ranges() {
        let sql = render(&VenueFilter {
            opened_after: Some(date("2020-01-01")),
            closed_before: Some(date("2023-12-31")),
            ..Default::default()
        });
        assert!(sql.contains(r#""stores"."date_opened" >= '2020-01-01'"#), "{sql}");
        assert!(sql.contains(r#""stores"."date_closed" <= '2023-12-31'"#), "{sql}");
        assert!(sql.contains(" AND "), "{sql}");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off"), r"50\%\_off");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_serialize_only_present_keys() {
        let filter = VenueFilter {
            city: Some("austin".into()),
            open: Some(true),
            opened_after: Some(date("2020-05-01")),
            ..Default::default()
        };
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"city": "austin", "open": true, "openedAfter": "2020-05-01"})
        );
    }
}
