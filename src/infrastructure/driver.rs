//! 浏览器驱动接口
//!
//! 状态机只依赖这两个 trait，真实实现见 [`super::chromium`]

use async_trait::async_trait;

use crate::error::DriverError;
use crate::models::Credentials;

/// 启动一个带 HTTP 认证的浏览器会话
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self, credentials: &Credentials) -> Result<Box<dyn FormSession>, DriverError>;
}

/// 一个打开的浏览器会话，只暴露填表需要的操作
///
/// 元素操作在元素出现前会一直等待，超时由调用方控制
#[async_trait]
pub trait FormSession: Send {
    /// 打开页面
    async fn goto(&mut self, url: &str) -> Result<(), DriverError>;

    /// 当前页面标题
    async fn title(&mut self) -> Result<Option<String>, DriverError>;

    /// 点击元素
    async fn click(&mut self, selector: &str) -> Result<(), DriverError>;

    /// 选择下拉框中 value 等于 `value` 的选项
    async fn select_option(&mut self, selector: &str, value: &str) -> Result<(), DriverError>;

    /// 填写输入框
    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), DriverError>;

    /// 关闭会话并释放浏览器
    async fn close(self: Box<Self>) -> Result<(), DriverError>;
}
