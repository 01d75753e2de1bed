//! CSV 种子数据读取
//!
//! 扁平 CSV：每行一个场所，同时携带 chain 和 store 信息。
//! 未知列忽略，缺失列为 None；字段两端空白会被裁掉，空字段视为 None。

use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::errors::VenueError;

/// CSV 行数据结构
///
/// 数值和日期保持原始字符串，由导入校验统一解析并报告行号。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CsvVenueRow {
    pub entity_id: Option<String>,
    pub entity_type: Option<String>,
    pub chain_id: Option<String>,
    pub chain_name: Option<String>,
    pub store_id: Option<String>,
    pub name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub country: Option<String>,
    pub state_code: Option<String>,
    pub state_name: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub formatted_city: Option<String>,
    pub street_address: Option<String>,
    pub sub_category: Option<String>,
    pub dma: Option<String>,
    pub cbsa: Option<String>,
    pub area_sqft: Option<String>,
    pub date_opened: Option<String>,
    pub date_closed: Option<String>,
    pub foot_traffic: Option<String>,
    pub sales: Option<String>,
    pub avg_dwell_time_min: Option<String>,
    pub ft_per_sqft: Option<String>,
}

/// 读取结果：成功解析的行与解析失败的行，均带 CSV 行号（1-based，含 header）
#[derive(Debug, Default)]
pub struct CsvReadResult {
    pub rows: Vec<(usize, CsvVenueRow)>,
    pub errors: Vec<(usize, String)>,
}

impl CsvReadResult {
    pub fn total_rows(&self) -> usize {
        self.rows.len() + self.errors.len()
    }
}

/// 从任意 reader 读取场所 CSV
pub fn read_venue_rows<R: Read>(reader: R) -> Result<CsvReadResult, VenueError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // header 本身读不出来时整体失败
    csv_reader.headers()?;

    let mut result = CsvReadResult::default();
    for (row_idx, record) in csv_reader.deserialize::<CsvVenueRow>().enumerate() {
        let row_num = row_idx + 2; // 跳过 header

        match record {
            Ok(row) => result.rows.push((row_num, normalize_row(row))),
            Err(e) => result
                .errors
                .push((row_num, format!("CSV parse error: {}", e))),
        }
    }

    Ok(result)
}

/// 从 CSV 文件读取场所
pub fn import_from_csv<P: AsRef<Path>>(path: P) -> Result<CsvReadResult, VenueError> {
    let file = File::open(path.as_ref()).map_err(|e| {
        VenueError::file_operation(format!(
            "Failed to open file {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;
    read_venue_rows(BufReader::new(file))
}

/// 空字符串统一为 None
fn normalize_row(row: CsvVenueRow) -> CsvVenueRow {
    fn clean(v: Option<String>) -> Option<String> {
        v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
    }

    CsvVenueRow {
        entity_id: clean(row.entity_id),
        entity_type: clean(row.entity_type),
        chain_id: clean(row.chain_id),
        chain_name: clean(row.chain_name),
        store_id: clean(row.store_id),
        name: clean(row.name),
        latitude: clean(row.latitude),
        longitude: clean(row.longitude),
        country: clean(row.country),
        state_code: clean(row.state_code),
        state_name: clean(row.state_name),
        city: clean(row.city),
        postal_code: clean(row.postal_code),
        formatted_city: clean(row.formatted_city),
        street_address: clean(row.street_address),
        sub_category: clean(row.sub_category),
        dma: clean(row.dma),
        cbsa: clean(row.cbsa),
        area_sqft: clean(row.area_sqft),
        date_opened: clean(row.date_opened),
        date_closed: clean(row.date_closed),
        foot_traffic: clean(row.foot_traffic),
        sales: clean(row.sales),
        avg_dwell_time_min: clean(row.avg_dwell_time_min),
        ft_per_sqft: clean(row.ft_per_sqft),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rows_with_unknown_and_missing_columns() {
        let data = "\
entity_id,chain_id,chain_name,city,extra_column
e1,c1,Acme,Austin,ignored
e2 , c1 ,Acme,,x
";
        let result = read_venue_rows(data.as_bytes()).unwrap();
        assert_eq!(result.total_rows(), 2);
        assert!(result.errors.is_empty());

        let (row_num, first) = &result.rows[0];
        assert_eq!(*row_num, 2);
        assert_eq!(first.entity_id.as_deref(), Some("e1"));
        assert_eq!(first.city.as_deref(), Some("Austin"));
        assert!(first.store_id.is_none());

        let (_, second) = &result.rows[1];
        assert_eq!(second.entity_id.as_deref(), Some("e2"));
        assert_eq!(second.chain_id.as_deref(), Some("c1"));
        assert!(second.city.is_none());
    }

    #[test]
    fn test_read_rows_with_short_record() {
        let data = "entity_id,chain_id,chain_name,foot_traffic\ne1,c1\n";
        let result = read_venue_rows(data.as_bytes()).unwrap();
        assert_eq!(result.rows.len(), 1);
        let (_, row) = &result.rows[0];
        assert_eq!(row.chain_id.as_deref(), Some("c1"));
        assert!(row.chain_name.is_none());
        assert!(row.foot_traffic.is_none());
    }

    #[test]
    fn test_missing_file_is_file_operation_error() {
        let err = import_from_csv("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, VenueError::FileOperation(_)));
    }
}
