//! 日期显示模块
//!
//! 后端日期字段格式不统一（RFC 3339、纯日期、日/月/年），
//! 这里统一解析为 `NaiveDate`，再按用途格式化：
//! - 列表/卡片显示：`05 Jan 2024`
//! - 表单草稿（`<input type="date">`）：`2024-01-05`

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%d %b %Y";
const INPUT_FORMAT: &str = "%Y-%m-%d";

/// 依次尝试后端出现过的几种格式
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// 列表显示格式；无法解析时原样返回
pub fn display_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// 表单输入格式；无法解析时原样返回
pub fn input_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format(INPUT_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// 月份缩写（1..=12），越界返回空串
pub fn month_label(month: u32) -> &'static str {
    const LABELS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    month
        .checked_sub(1)
        .and_then(|i| LABELS.get(i as usize))
        .copied()
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(parse_date("2024-01-05T10:20:30.000Z"), Some(expected));
        assert_eq!(parse_date("2024-01-05T10:20:30"), Some(expected));
        assert_eq!(parse_date("2024-01-05"), Some(expected));
        assert_eq!(parse_date("05/01/2024"), Some(expected));
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("  "), None);
    }

    #[test]
    fn test_formats() {
        assert_eq!(display_date("2024-01-05T00:00:00Z"), "05 Jan 2024");
        assert_eq!(input_date("2024-01-05T00:00:00Z"), "2024-01-05");
        assert_eq!(display_date("pending"), "pending");
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(1), "Jan");
        assert_eq!(month_label(12), "Dec");
        assert_eq!(month_label(0), "");
        assert_eq!(month_label(13), "");
    }
}
