use std::time::Duration;

use thiserror::Error;

use crate::models::RecordField;
use crate::workflow::SchedulerStep;

/// 自动化运行错误
///
/// 每个变体对应状态机中的一种失败方式，`Display` 文本会原样返回给调用方
#[derive(Debug, Error)]
pub enum AutomationError {
    /// 记录解析错误（保留，解析本身永不失败）
    #[error("记录解析失败: {0}")]
    Parse(String),

    /// 请求参数不完整
    #[error("请求参数无效: {0}")]
    InvalidRequest(String),

    /// 日期字段缺失、非数字或超出范围
    #[error("无效日期: {value}")]
    DateFormat { value: String },

    /// 记录缺少必填字段
    #[error("记录缺少字段: {field}")]
    MissingField { field: RecordField },

    /// 启动浏览器或 HTTP 认证失败
    #[error("启动浏览器会话失败: {source}")]
    AuthLaunch {
        #[source]
        source: DriverError,
    },

    /// 目标页面加载失败
    #[error("导航到 {url} 失败: {source}")]
    Navigation {
        url: String,
        #[source]
        source: DriverError,
    },

    /// 无法定位或操作页面控件
    #[error("[{step}] 无法操作元素 {locator}: {source}")]
    ElementNotFound {
        step: SchedulerStep,
        locator: String,
        #[source]
        source: DriverError,
    },

    /// 其他错误
    #[error("未知错误: {0}")]
    Unknown(String),
}

/// 浏览器驱动层错误
///
/// 驱动只描述"发生了什么"，由状态机决定归入哪种 [`AutomationError`]
#[derive(Debug, Error)]
pub enum DriverError {
    /// 浏览器进程启动失败
    #[error("浏览器启动失败: {0}")]
    Launch(String),

    /// 页面中没有匹配的元素
    #[error("元素不存在: {selector}")]
    ElementMissing { selector: String },

    /// 操作超时
    #[error("操作超时 ({0:?})")]
    Timeout(Duration),

    /// CDP 调用失败
    #[error("CDP 调用失败: {0}")]
    Protocol(String),
}

impl From<chromiumoxide::error::CdpError> for DriverError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        DriverError::Protocol(err.to_string())
    }
}

impl From<serde_json::Error> for DriverError {
    fn from(err: serde_json::Error) -> Self {
        DriverError::Protocol(format!("JSON解析失败: {}", err))
    }
}

/// 自动化结果类型
pub type AutomationResult<T> = Result<T, AutomationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_error_message_carries_url_and_cause() {
        let err = AutomationError::Navigation {
            url: "https://example.test/panel".to_string(),
            source: DriverError::Timeout(Duration::from_secs(5)),
        };

        let message = err.to_string();
        assert!(message.contains("https://example.test/panel"));
        assert!(message.contains("5s"));
    }

    #[test]
    fn test_element_error_names_step() {
        let err = AutomationError::ElementNotFound {
            step: SchedulerStep::SetMonth,
            locator: "select[name=\"month[delivery]\"]".to_string(),
            source: DriverError::ElementMissing {
                selector: "select[name=\"month[delivery]\"]".to_string(),
            },
        };

        let message = err.to_string();
        assert!(message.starts_with("[SetMonth]"));
        assert!(message.ends_with("元素不存在: select[name=\"month[delivery]\"]"));
    }
}
