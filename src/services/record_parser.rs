//! 记录解析 - 业务能力层
//!
//! 把粘贴的一行制表符分隔数据映射到固定的 16 个字段

use crate::models::{ParsedRecord, RecordField};

/// 解析一行报表数据
///
/// - 按制表符切分，第 i 个值对应第 i 个字段
/// - 值不足时剩余字段为 `None`，空值同样视为缺失
/// - 多出的值直接丢弃
/// - 不做 trim / 转义 / 引号处理，值内部的制表符无法与分隔符区分
///
/// 永不失败，错误留给下游（日期解析）发现
pub fn parse_record(raw: &str) -> ParsedRecord {
    let mut values: [Option<String>; 16] = Default::default();

    for (slot, token) in values.iter_mut().zip(raw.split('\t')) {
        if !token.is_empty() {
            *slot = Some(token.to_string());
        }
    }

    debug_assert_eq!(values.len(), RecordField::ALL.len());
    ParsedRecord::from_values(values)
}
