//! 导入行验证逻辑
//!
//! 将 `CsvVenueRow`（原始字符串）转换为 `VenueSeed`，并报告行号。

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::warn;

use crate::errors::VenueError;
use crate::storage::{EntitySeed, StoreSeed, VenueSeed};
use crate::utils::csv_handler::CsvVenueRow;
use crate::utils::parse_date;

/// 单行验证错误
#[derive(Debug, Clone)]
pub struct ImportRowError {
    pub row_num: usize,
    pub entity_id: Option<String>,
    pub error: VenueError,
}

impl std::fmt::Display for ImportRowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.entity_id {
            Some(id) => write!(f, "Row {} ({}): {}", self.row_num, id, self.error.message()),
            None => write!(f, "Row {}: {}", self.row_num, self.error.message()),
        }
    }
}

fn required(value: &Option<String>, field: &str) -> Result<String, VenueError> {
    value
        .clone()
        .ok_or_else(|| VenueError::validation(format!("Missing required field '{}'", field)))
}

fn parse_opt<T: FromStr>(value: &Option<String>, field: &str) -> Result<Option<T>, VenueError> {
    match value {
        None => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(|_| {
            VenueError::validation(format!("Invalid value for '{}': '{}'", field, s))
        }),
    }
}

fn parse_opt_decimal(value: &Option<String>, field: &str) -> Result<Option<Decimal>, VenueError> {
    match value {
        None => Ok(None),
        Some(s) => Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map(Some)
            .map_err(|_| {
                VenueError::validation(format!("Invalid decimal for '{}': '{}'", field, s))
            }),
    }
}

fn parse_opt_date(
    value: &Option<String>,
    field: &str,
) -> Result<Option<chrono::NaiveDate>, VenueError> {
    match value {
        None => Ok(None),
        Some(s) => parse_date(s).map(Some).map_err(|e| {
            VenueError::date_parse(format!("Invalid date for '{}': '{}' ({})", field, s, e))
        }),
    }
}

/// 验证并转换单个 CSV 行
///
/// 验证顺序：
/// 1. entity_id / chain_id / chain_name 必填
/// 2. foot_traffic 为非负整数（空值为 0）
/// 3. 其余数值与日期字段可解析
/// 4. 有 store_id 时 name / city / state_code / state_name 必填
pub fn validate_venue_row(row: CsvVenueRow, row_num: usize) -> Result<VenueSeed, ImportRowError> {
    let entity_id = row.entity_id.clone();
    build_seed(row, row_num).map_err(|error| ImportRowError {
        row_num,
        entity_id,
        error,
    })
}

fn build_seed(row: CsvVenueRow, row_num: usize) -> Result<VenueSeed, VenueError> {
    let entity_id = required(&row.entity_id, "entity_id")?;
    let chain_id = required(&row.chain_id, "chain_id")?;
    let chain_name = required(&row.chain_name, "chain_name")?;

    let foot_traffic = parse_opt::<i64>(&row.foot_traffic, "foot_traffic")?.unwrap_or(0);
    if foot_traffic < 0 {
        return Err(VenueError::validation(format!(
            "foot_traffic must be >= 0, got {}",
            foot_traffic
        )));
    }
    let foot_traffic = i32::try_from(foot_traffic).map_err(|_| {
        VenueError::validation(format!("foot_traffic out of range: {}", foot_traffic))
    })?;

    let date_opened = parse_opt_date(&row.date_opened, "date_opened")?;
    let date_closed = parse_opt_date(&row.date_closed, "date_closed")?;
    if let (Some(opened), Some(closed)) = (date_opened, date_closed)
        && closed < opened
    {
        warn!(
            "Row {}: entity {} closed ({}) before it opened ({}), importing anyway",
            row_num, entity_id, closed, opened
        );
    }

    let entity = EntitySeed {
        entity_id,
        entity_type: row.entity_type.clone(),
        name: row.name.clone(),
        city: row.city.clone(),
        state_code: row.state_code.as_ref().map(|s| s.to_uppercase()),
        state_name: row.state_name.clone(),
        sub_category: row.sub_category.clone(),
        dma: row.dma.clone(),
        foot_traffic,
        sales: parse_opt_decimal(&row.sales, "sales")?,
        avg_dwell_time_min: parse_opt::<i32>(&row.avg_dwell_time_min, "avg_dwell_time_min")?,
        ft_per_sqft: parse_opt_decimal(&row.ft_per_sqft, "ft_per_sqft")?,
    };

    let store = match &row.store_id {
        None => None,
        Some(store_id) => Some(StoreSeed {
            store_id: store_id.clone(),
            name: required(&row.name, "name")?,
            latitude: parse_opt::<f64>(&row.latitude, "latitude")?,
            longitude: parse_opt::<f64>(&row.longitude, "longitude")?,
            country: row.country.clone(),
            state_code: required(&row.state_code, "state_code")?.to_uppercase(),
            state_name: required(&row.state_name, "state_name")?,
            city: required(&row.city, "city")?,
            postal_code: row.postal_code.clone(),
            formatted_city: row.formatted_city.clone(),
            street_address: row.street_address.clone(),
            sub_category: row.sub_category.clone(),
            dma: row.dma.clone(),
            cbsa: row.cbsa.clone(),
            area_sqft: parse_opt::<i32>(&row.area_sqft, "area_sqft")?,
            date_opened,
            date_closed,
        }),
    };

    Ok(VenueSeed {
        chain_id,
        chain_name,
        store,
        entity,
    })
}
