//! 日期解析 - 业务能力层

use crate::error::{AutomationError, AutomationResult};
use crate::models::ResolvedDate;

/// 从 `Date` 字段解析投递日期，格式为 `日/月`
///
/// 日必须在 1..=31，月必须在 1..=12，不校验某月是否真的有 31 天。
/// 第二个 `/` 之后的内容被忽略。
pub fn resolve_date(date_field: Option<&str>) -> AutomationResult<ResolvedDate> {
    let raw = date_field.ok_or_else(|| AutomationError::DateFormat {
        value: "<空>".to_string(),
    })?;
    let invalid = || AutomationError::DateFormat {
        value: raw.to_string(),
    };

    let mut parts = raw.split('/');
    let day = parts.next().and_then(parse_number).ok_or_else(invalid)?;
    let month = parts.next().and_then(parse_number).ok_or_else(invalid)?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(invalid());
    }

    Ok(ResolvedDate::new(day, month))
}

/// 十进制整数，非数字返回 `None`（不会变成 0），两端的空白忽略
fn parse_number(token: &str) -> Option<u8> {
    let token = token.trim_matches(|c: char| c.is_ascii_whitespace());
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // 超过 u8 的值一定超出范围
    token.parse::<u8>().ok().or(Some(u8::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_every_valid_pair() {
        for month in 1..=12u8 {
            for day in 1..=31u8 {
                let date = resolve_date(Some(&format!("{}/{}", day, month))).unwrap();
                assert_eq!((date.day(), date.month()), (day, month));
            }
        }
    }

    #[test]
    fn test_rejects_malformed_dates() {
        for raw in [
            "0/5", "15/13", "abc/5", "15", "", "/", "15/", "/5", "-1/5", "15/0", "32/1", "5/3 3",
            "1e1/5", " /5",
        ] {
            let err = resolve_date(Some(raw)).unwrap_err();
            assert!(
                matches!(err, AutomationError::DateFormat { ref value } if value == raw),
                "{:?} 应被拒绝",
                raw
            );
        }
    }

    #[test]
    fn test_rejects_absent_field() {
        assert!(matches!(
            resolve_date(None),
            Err(AutomationError::DateFormat { .. })
        ));
    }

    #[test]
    fn test_large_numbers_do_not_wrap() {
        assert!(resolve_date(Some("256/1")).is_err());
        assert!(resolve_date(Some("1/268")).is_err());
        assert!(resolve_date(Some("99999999999/1")).is_err());
    }

    #[test]
    fn test_leading_zeros_and_trailing_year() {
        let date = resolve_date(Some("05/03")).unwrap();
        assert_eq!((date.day(), date.month()), (5, 3));

        let date = resolve_date(Some("24/11/2024")).unwrap();
        assert_eq!((date.day(), date.month()), (24, 11));
    }

    #[test]
    fn test_whitespace_around_numbers_is_ignored() {
        for raw in ["24/11 ", " 24/11", "24 / 11", "\t24/11\r"] {
            let date = resolve_date(Some(raw)).unwrap();
            assert_eq!((date.day(), date.month()), (24, 11), "{:?}", raw);
        }
    }

    #[test]
    fn test_day_month_pairing_is_not_cross_checked() {
        let date = resolve_date(Some("31/4")).unwrap();
        assert_eq!((date.day(), date.month()), (31, 4));
        assert!(resolve_date(Some("30/2")).is_ok());
    }
}
