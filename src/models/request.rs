use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AutomationError, AutomationResult};

/// 成功时返回给调用方的固定消息
pub const SUCCESS_MESSAGE: &str = "Automation completed successfully.";

/// 调用方发来的排期请求
///
/// 只在一次运行期间存在，核心不保存任何字段
#[derive(Clone, Default, Deserialize)]
pub struct ScheduleRequest {
    /// 粘贴的制表符分隔报表数据
    pub writeup: String,
    /// 目标页面
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl ScheduleRequest {
    /// 校验请求：数据不能为空，连接信息必须完整
    pub fn validate(&self) -> AutomationResult<()> {
        if self.writeup.trim().is_empty() {
            return Err(AutomationError::InvalidRequest(
                "报表数据为空".to_string(),
            ));
        }
        if self.url.is_empty() || self.username.is_empty() || self.password.is_empty() {
            return Err(AutomationError::InvalidRequest(
                "URL、用户名和密码都必须填写".to_string(),
            ));
        }
        Ok(())
    }

    /// 用配置中的默认值填充空字段
    pub fn with_defaults(mut self, defaults: &RequestDefaults) -> Self {
        fill_if_empty(&mut self.url, defaults.url.as_deref());
        fill_if_empty(&mut self.username, defaults.username.as_deref());
        fill_if_empty(&mut self.password, defaults.password.as_deref());
        self
    }

    /// 本次会话使用的认证信息
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

fn fill_if_empty(slot: &mut String, default: Option<&str>) {
    if slot.is_empty() {
        if let Some(value) = default {
            *slot = value.to_string();
        }
    }
}

impl fmt::Debug for ScheduleRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleRequest")
            .field("writeup_len", &self.writeup.len())
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// HTTP 认证信息
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// 调用方字段的默认值（代替 UI 端记住的输入）
#[derive(Clone, Default)]
pub struct RequestDefaults {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for RequestDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDefaults")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// 一次自动化运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomationOutcome {
    Success,
    Failure { message: String },
}

impl<T> From<AutomationResult<T>> for AutomationOutcome {
    fn from(result: AutomationResult<T>) -> Self {
        match result {
            Ok(_) => AutomationOutcome::Success,
            Err(e) => AutomationOutcome::Failure {
                message: e.to_string(),
            },
        }
    }
}

/// 结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Error,
}

/// 返回给调用方的结果消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPayload {
    pub status: ResultStatus,
    pub message: String,
}

impl ResultPayload {
    pub fn success() -> Self {
        Self {
            status: ResultStatus::Success,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }
}
