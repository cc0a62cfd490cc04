use std::fmt;

/// 投递日期（日/月）
///
/// 只能通过 [`crate::services::resolve_date`] 构造，日在 1..=31，月在 1..=12
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    day: u8,
    month: u8,
}

impl ResolvedDate {
    pub(crate) fn new(day: u8, month: u8) -> Self {
        Self { day, month }
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    /// 日下拉框的值，两位补零
    pub fn day_value(&self) -> String {
        format!("{:02}", self.day)
    }

    /// 月下拉框的值，两位补零
    pub fn month_value(&self) -> String {
        format!("{:02}", self.month)
    }
}

impl fmt::Display for ResolvedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.day, self.month)
    }
}
