use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// 报表行的固定字段（顺序即粘贴数据的列顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Date,
    Day,
    Network,
    OfferName,
    At,
    Inbox,
    Nc,
    L,
    Dollar,
    Epc,
    Ecpm,
    Conv,
    Ctr,
    From,
    Subject,
    SubId,
}

impl RecordField {
    /// 全部字段，按列顺序排列
    pub const ALL: [RecordField; 16] = [
        RecordField::Date,
        RecordField::Day,
        RecordField::Network,
        RecordField::OfferName,
        RecordField::At,
        RecordField::Inbox,
        RecordField::Nc,
        RecordField::L,
        RecordField::Dollar,
        RecordField::Epc,
        RecordField::Ecpm,
        RecordField::Conv,
        RecordField::Ctr,
        RecordField::From,
        RecordField::Subject,
        RecordField::SubId,
    ];

    /// 报表中的列名
    pub fn header(self) -> &'static str {
        match self {
            RecordField::Date => "Date",
            RecordField::Day => "Day",
            RecordField::Network => "Network",
            RecordField::OfferName => "Offer Name",
            RecordField::At => "@",
            RecordField::Inbox => "Inbox",
            RecordField::Nc => "NC",
            RecordField::L => "L",
            RecordField::Dollar => "$",
            RecordField::Epc => "EPC",
            RecordField::Ecpm => "eCPM",
            RecordField::Conv => "Conv",
            RecordField::Ctr => "CTR",
            RecordField::From => "From",
            RecordField::Subject => "Subject",
            RecordField::SubId => "Sub ID",
        }
    }

    /// 列的位置（从 0 开始）
    pub fn index(self) -> usize {
        self as usize
    }

    /// 按列名查找字段
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.header() == header)
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// 电子表格中除零产生的占位值，预览时忽略
const SPREADSHEET_DIV_ZERO: &str = "#DIV/0!";

/// 一行报表数据解析后的记录
///
/// 第 i 个字段对应第 i 个制表符分隔的值，缺失的字段为 `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRecord {
    values: [Option<String>; 16],
}

impl ParsedRecord {
    pub(crate) fn from_values(values: [Option<String>; 16]) -> Self {
        Self { values }
    }

    /// 获取字段值
    pub fn get(&self, field: RecordField) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    /// 按列名获取字段值，未知列名返回 `None`
    pub fn get_by_header(&self, header: &str) -> Option<&str> {
        RecordField::from_header(header).and_then(|field| self.get(field))
    }

    /// 有值的字段数量
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// 按列顺序遍历全部字段
    pub fn iter(&self) -> impl Iterator<Item = (RecordField, Option<&str>)> + '_ {
        RecordField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    /// 预览：只保留有意义的字段（跳过空值和 `#DIV/0!`）
    pub fn preview(&self) -> Vec<(RecordField, &str)> {
        self.iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .filter(|(_, value)| !value.is_empty() && *value != SPREADSHEET_DIV_ZERO)
            .collect()
    }
}

impl Serialize for ParsedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.header(), &value)?;
        }
        map.end()
    }
}
