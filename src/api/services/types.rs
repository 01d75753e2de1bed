//! API 请求参数类型
//!
//! Query string 保持原样（全部为 `Option<String>`），再由这里解析成
//! 强类型的 `VenueFilter` / `VenueListRequest`。

use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::{Result, VenueError};
use crate::services::{VenueListRequest, parse_pagination};
use crate::storage::{SortField, SortOrder, VenueFilter};
use crate::utils::parse_date;

/// `/venues` 与 `/venues/summary` 的 query 参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,

    pub chain_name: Option<String>,
    pub category: Option<String>,
    pub dma: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub state_name: Option<String>,
    pub open: Option<String>,
    pub opened_after: Option<String>,
    pub opened_before: Option<String>,
    pub closed_after: Option<String>,
    pub closed_before: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn text_param(value: &Option<String>) -> Option<String> {
    non_empty(value).map(str::to_string)
}

fn date_param(key: &str, value: &Option<String>) -> Result<Option<NaiveDate>> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => parse_date(raw).map(Some).map_err(|_| {
            VenueError::date_parse(format!("Invalid date format for {}: {}", key, raw))
        }),
    }
}

impl VenueQuery {
    /// 解析过滤条件，日期格式错误时返回 `DateParse`
    pub fn to_filter(&self) -> Result<VenueFilter> {
        Ok(VenueFilter {
            chain_name: text_param(&self.chain_name),
            category: text_param(&self.category),
            dma: text_param(&self.dma),
            city: text_param(&self.city),
            state_code: text_param(&self.state_code),
            state_name: text_param(&self.state_name),
            open: non_empty(&self.open).map(|v| v.eq_ignore_ascii_case("true")),
            opened_after: date_param("openedAfter", &self.opened_after)?,
            opened_before: date_param("openedBefore", &self.opened_before)?,
            closed_after: date_param("closedAfter", &self.closed_after)?,
            closed_before: date_param("closedBefore", &self.closed_before)?,
        })
    }

    pub fn to_list_request(&self) -> Result<VenueListRequest> {
        Ok(VenueListRequest {
            pagination: Some(parse_pagination(
                self.page.as_deref(),
                self.page_size.as_deref(),
            )),
            filter: self.to_filter()?,
            sort_field: SortField::parse(self.sort_by.as_deref()),
            sort_order: SortOrder::parse(self.sort_order.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{
        FilterOptions, StateOption, SummaryMetrics, TableCounts, User, VenueListItem,
    };
    use ts_rs::TS;

    fn query(pairs: &str) -> VenueQuery {
        actix_web::web::Query::<VenueQuery>::from_query(pairs)
            .map(|q| q.into_inner())
            .unwrap()
    }

    #[test]
    fn test_empty_query_has_no_filters() {
        let filter = query("").to_filter().unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_text_filters_are_trimmed_and_empty_ignored() {
        let filter = query("city=%20austin%20&dma=&chainName=Star").to_filter().unwrap();
        assert_eq!(filter.city.as_deref(), Some("austin"));
        assert_eq!(filter.dma, None);
        assert_eq!(filter.chain_name.as_deref(), Some("Star"));
    }

    #[test]
    fn test_open_flag_parsing() {
        assert_eq!(query("open=TRUE").to_filter().unwrap().open, Some(true));
        assert_eq!(query("open=yes").to_filter().unwrap().open, Some(false));
        assert_eq!(query("open=false").to_filter().unwrap().open, Some(false));
        assert_eq!(query("open=").to_filter().unwrap().open, None);
    }

    #[test]
    fn test_dates_are_parsed() {
        let filter = query("openedAfter=2020-01-01&closedBefore=2023-06-30T12:00:00Z")
            .to_filter()
            .unwrap();
        assert_eq!(filter.opened_after, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(filter.closed_before, NaiveDate::from_ymd_opt(2023, 6, 30));
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        let err = query("openedBefore=01/02/2020").to_filter().unwrap_err();
        assert!(matches!(err, VenueError::DateParse(_)));
        assert_eq!(
            err.message(),
            "Invalid date format for openedBefore: 01/02/2020"
        );
    }

    #[test]
    fn test_list_request_defaults() {
        let request = query("").to_list_request().unwrap();
        let pagination = request.pagination.unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.page_size, 20);
        assert_eq!(request.sort_field, SortField::FootTraffic);
        assert_eq!(request.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_list_request_sort_and_paging() {
        let request = query("page=3&pageSize=500&sortBy=chainName&sortOrder=DESC")
            .to_list_request()
            .unwrap();
        let pagination = request.pagination.unwrap();
        assert_eq!(pagination.page, 3);
        assert_eq!(pagination.page_size, 200);
        assert_eq!(pagination.skip, 400);
        assert_eq!(request.sort_field, SortField::ChainName);
        assert_eq!(request.sort_order, SortOrder::Desc);
    }

    #[test]
    fn export_typescript_types() {
        // cargo test export_typescript_types -- --nocapture
        let cfg = ts_rs::Config::default();
        VenueListItem::export_all(&cfg).expect("Failed to export VenueListItem");
        FilterOptions::export_all(&cfg).expect("Failed to export FilterOptions");
        StateOption::export_all(&cfg).expect("Failed to export StateOption");
        SummaryMetrics::export_all(&cfg).expect("Failed to export SummaryMetrics");
        TableCounts::export_all(&cfg).expect("Failed to export TableCounts");
        User::export_all(&cfg).expect("Failed to export User");
        println!("TypeScript types exported to {}", crate::config::TS_EXPORT_PATH);
    }
}
