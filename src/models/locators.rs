use serde::{Deserialize, Serialize};

/// 目标站点的控件定位规则
///
/// 站点结构变化时只需要更新数据文件（见 `site_locators.toml`），不需要改代码
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteLocators {
    /// 数据版本，站点结构变化时递增
    pub version: u32,
    /// 投递年份，固定值，不随请求变化
    pub delivery_year: String,
    /// 指定行的 "Schedule Message" 按钮
    pub schedule_button: String,
    pub year_select: String,
    pub month_select: String,
    pub day_select: String,
    pub from_field: String,
    pub subject_field: String,
}

impl Default for SiteLocators {
    fn default() -> Self {
        Self {
            version: 1,
            delivery_year: "2024".to_string(),
            schedule_button: r#"#Chloe_KYI td#Chloe_KYI_action > button[data-toggle="tooltip"][title="Schedule Message"]"#.to_string(),
            year_select: r#"select[name="year[delivery]"]"#.to_string(),
            month_select: r#"select[name="month[delivery]"]"#.to_string(),
            day_select: r#"select[name="day[delivery]"]"#.to_string(),
            from_field: "#from".to_string(),
            subject_field: r#"input[name="subject"]"#.to_string(),
        }
    }
}
