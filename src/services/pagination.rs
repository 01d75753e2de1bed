//! 分页参数解析

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 200;
const MAX_OFFSET: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u64,
    pub page_size: u64,
    pub skip: u64,
    pub take: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSummary {
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

/// 读取前导整数（可带符号），与 JS `parseInt(s, 10)` 行为一致
///
/// `"12abc"` -> 12，`"abc"` -> None
fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // 超长数字按饱和处理
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// 解析分页参数，永不失败
///
/// - page: 缺失 / 非法 / < 1 时为 1
/// - page_size: 缺失 / 非法 / 0 时为 20，其余夹在 [1, 200]
/// - skip 不超过 `i64::MAX`，数据库驱动以有符号整数绑定 OFFSET
pub fn parse_pagination(page: Option<&str>, page_size: Option<&str>) -> PaginationParams {
    let page_size = match page_size.and_then(parse_int_prefix) {
        None | Some(0) => DEFAULT_PAGE_SIZE,
        Some(n) => n.clamp(1, MAX_PAGE_SIZE as i64) as u64,
    };

    let max_page = MAX_OFFSET / page_size + 1;
    let page = match page.and_then(parse_int_prefix) {
        Some(p) if p >= 1 => (p as u64).min(max_page),
        _ => 1,
    };

    PaginationParams {
        page,
        page_size,
        skip: (page - 1) * page_size,
        take: page_size,
    }
}

/// 生成分页摘要
pub fn summarize(total_items: u64, page: u64, page_size: u64) -> PaginationSummary {
    let total_pages = if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    };

    PaginationSummary {
        page,
        page_size,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = parse_pagination(None, None);
        assert_eq!(
            p,
            PaginationParams {
                page: 1,
                page_size: 20,
                skip: 0,
                take: 20
            }
        );
    }

    #[test]
    fn test_page_and_size() {
        let p = parse_pagination(Some("3"), Some("50"));
        assert_eq!((p.page, p.page_size, p.skip, p.take), (3, 50, 100, 50));
    }

    #[test]
    fn test_page_size_clamped() {
        assert_eq!(parse_pagination(None, Some("500")).page_size, 200);
        assert_eq!(parse_pagination(None, Some("-5")).page_size, 1);
        assert_eq!(parse_pagination(None, Some("0")).page_size, 20);
        assert_eq!(parse_pagination(None, Some("abc")).page_size, 20);
    }

    #[test]
    fn test_page_floor() {
        assert_eq!(parse_pagination(Some("0"), None).page, 1);
        assert_eq!(parse_pagination(Some("-3"), None).page, 1);
        assert_eq!(parse_pagination(Some("x"), None).page, 1);
        assert_eq!(parse_pagination(Some(""), None).page, 1);
    }

    #[test]
    fn test_int_prefix_like_parse_int() {
        assert_eq!(parse_int_prefix("12abc"), Some(12));
        assert_eq!(parse_int_prefix(" 7 "), Some(7));
        assert_eq!(parse_int_prefix("3.9"), Some(3));
        assert_eq!(parse_int_prefix("+4"), Some(4));
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_pagination(Some("2x"), Some("10y")).skip, 10);
    }

    #[test]
    fn test_huge_page_keeps_offset_in_i64_range() {
        for (page, size) in [
            ("99999999999999999999999", "200"),
            ("100000000000000000", "200"),
            ("9223372036854775807", "1"),
            ("99999999999999999999", "20"),
        ] {
            let p = parse_pagination(Some(page), Some(size));
            assert!(p.skip <= i64::MAX as u64, "page={} size={}", page, size);
            assert_eq!(p.skip, (p.page - 1) * p.page_size);
        }

        let p = parse_pagination(Some("100000000000000000"), Some("200"));
        assert_eq!(p.page, i64::MAX as u64 / 200 + 1);
    }

    #[test]
    fn test_summarize() {
        assert_eq!(summarize(0, 1, 20).total_pages, 0);
        assert_eq!(summarize(1, 1, 20).total_pages, 1);
        assert_eq!(summarize(40, 1, 20).total_pages, 2);
        assert_eq!(summarize(41, 3, 20).total_pages, 3);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let json = serde_json::to_value(summarize(41, 2, 20)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 2, "pageSize": 20, "totalItems": 41, "totalPages": 3})
        );
    }
}
