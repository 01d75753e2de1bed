//! Venue query service
//!
//! Shared between the HTTP handlers and anything else that needs the
//! venue list, the filter options or the summary.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::errors::Result;
use crate::services::pagination::{PaginationParams, summarize};
use crate::storage::{
    FilterOptions, SeaOrmStorage, SortField, SortOrder, SummaryMetrics, VenueFilter,
    VenueListItem,
};

// ============ Request/Response DTOs ============

/// Parsed list request
#[derive(Debug, Clone, Default)]
pub struct VenueListRequest {
    pub pagination: Option<PaginationParams>,
    pub filter: VenueFilter,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Serialize)]
pub struct SortInfo {
    pub field: &'static str,
    pub order: &'static str,
}

/// `/venues` 响应体（无 envelope）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueListResponse {
    pub items: Vec<VenueListItem>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub filters: VenueFilter,
    pub sort: SortInfo,
}

// ============ Service ============

pub struct VenueService {
    storage: Arc<SeaOrmStorage>,
}

impl VenueService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn list(&self, request: VenueListRequest) -> Result<VenueListResponse> {
        let pagination = request
            .pagination
            .unwrap_or_else(|| crate::services::pagination::parse_pagination(None, None));

        let (items, total_items) = self
            .storage
            .list_venues(
                pagination.skip,
                pagination.take,
                &request.filter,
                request.sort_field,
                request.sort_order,
            )
            .await?;

        let summary = summarize(total_items, pagination.page, pagination.page_size);
        debug!(
            "Venue list page {}/{} ({} items)",
            summary.page, summary.total_pages, summary.total_items
        );

        Ok(VenueListResponse {
            items,
            page: summary.page,
            page_size: summary.page_size,
            total_items: summary.total_items,
            total_pages: summary.total_pages,
            filters: request.filter,
            sort: SortInfo {
                field: request.sort_field.as_str(),
                order: request.sort_order.as_str(),
            },
        })
    }

    pub async fn filter_options(&self) -> Result<FilterOptions> {
        self.storage.filter_options().await
    }

    pub async fn summary(&self, filter: &VenueFilter) -> Result<SummaryMetrics> {
        self.storage.summarize(filter).await
    }
}
