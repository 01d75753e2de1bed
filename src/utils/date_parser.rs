use chrono::{DateTime, NaiveDate};

/// 解析日期，支持：
/// - YYYY-MM-DD：2023-10-01
/// - RFC3339（取日期部分）：2023-10-01T12:00:00Z
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    let input = input.trim();

    match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(date_err) => DateTime::parse_from_rfc3339(input)
            .map(|dt| dt.date_naive())
            .map_err(|_| date_err),
    }
}
