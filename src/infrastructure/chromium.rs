//! 基于 chromiumoxide 的浏览器驱动

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::auth::Credentials as CdpCredentials;
use chromiumoxide::element::Element;
use chromiumoxide::Browser;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::browser::{launch_browser, LaunchOptions};
use crate::error::DriverError;
use crate::infrastructure::driver::{BrowserLauncher, FormSession};
use crate::infrastructure::js_executor::{js_string, JsExecutor};
use crate::models::Credentials;

/// 等待元素出现时的轮询间隔
const ELEMENT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// 每次请求启动一个新的 Chromium 进程
pub struct ChromiumLauncher {
    options: LaunchOptions,
}

impl ChromiumLauncher {
    pub fn new(options: LaunchOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self, credentials: &Credentials) -> Result<Box<dyn FormSession>, DriverError> {
        let (mut browser, page, handler_task) = launch_browser(&self.options).await?;

        // 页面遇到 HTTP 认证质询时自动应答
        let auth = page
            .authenticate(CdpCredentials {
                username: credentials.username.clone(),
                password: credentials.password.clone(),
            })
            .await;
        if let Err(e) = auth {
            let _ = browser.close().await;
            let _ = browser.wait().await;
            handler_task.abort();
            return Err(DriverError::Launch(format!("设置 HTTP 认证失败: {}", e)));
        }
        info!("✓ 浏览器会话已建立 (用户: {})", credentials.username);

        Ok(Box::new(ChromiumSession {
            browser,
            executor: JsExecutor::new(page),
            handler_task,
        }))
    }
}

/// 一个 Chromium 会话：浏览器进程 + 单个页面
pub struct ChromiumSession {
    browser: Browser,
    executor: JsExecutor,
    handler_task: JoinHandle<()>,
}

/// 页面内 DOM 写操作的返回值
#[derive(Debug, Deserialize)]
struct DomWriteReport {
    found: bool,
    applied: bool,
}

impl ChromiumSession {
    /// 轮询直到元素出现
    async fn wait_for_element(&self, selector: &str) -> Element {
        loop {
            match self.executor.page().find_element(selector).await {
                Ok(element) => return element,
                Err(e) => {
                    debug!("等待元素 {}: {}", selector, e);
                    sleep(ELEMENT_POLL_INTERVAL).await;
                }
            }
        }
    }

    /// 等元素出现后反复执行写脚本，直到页面报告写入成功
    ///
    /// 下拉框的选项可能在元素出现之后才异步加载，由步骤超时限制总等待时间
    async fn write_dom(&self, selector: &str, script: String) -> Result<(), DriverError> {
        self.wait_for_element(selector).await;
        poll_until_applied(selector, ELEMENT_POLL_INTERVAL, || {
            self.executor.eval_as::<DomWriteReport>(script.clone())
        })
        .await
    }
}

async fn poll_until_applied<F, Fut>(
    selector: &str,
    interval: Duration,
    mut attempt: F,
) -> Result<(), DriverError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<DomWriteReport, DriverError>>,
{
    loop {
        let report = attempt().await?;
        if !report.found {
            return Err(DriverError::ElementMissing {
                selector: selector.to_string(),
            });
        }
        if report.applied {
            return Ok(());
        }
        debug!("等待 {} 可写入", selector);
        sleep(interval).await;
    }
}

#[async_trait]
impl FormSession for ChromiumSession {
    async fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        self.executor.page().goto(url).await?;
        Ok(())
    }

    async fn title(&mut self) -> Result<Option<String>, DriverError> {
        Ok(self.executor.page().get_title().await?)
    }

    async fn click(&mut self, selector: &str) -> Result<(), DriverError> {
        let element = self.wait_for_element(selector).await;
        element.click().await?;
        Ok(())
    }

    async fn select_option(&mut self, selector: &str, value: &str) -> Result<(), DriverError> {
        self.write_dom(selector, select_option_script(selector, value))
            .await
    }

    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), DriverError> {
        self.write_dom(selector, fill_script(selector, value)).await
    }

    async fn close(self: Box<Self>) -> Result<(), DriverError> {
        let ChromiumSession {
            mut browser,
            executor,
            handler_task,
        } = *self;
        drop(executor);

        let result = browser.close().await;
        if let Err(e) = browser.wait().await {
            warn!("等待浏览器进程退出失败: {}", e);
        }
        handler_task.abort();

        result.map(|_| ()).map_err(DriverError::from)
    }
}

/// 选择下拉框选项，并触发 input / change 事件
fn select_option_script(selector: &str, value: &str) -> String {
    format!(
        r#"
        (() => {{
            const el = document.querySelector({selector});
            if (!el) return {{ found: false, applied: false }};
            const value = {value};
            const options = Array.from(el.options || []);
            if (!options.some(o => o.value === value)) return {{ found: true, applied: false }};
            el.value = value;
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return {{ found: true, applied: true }};
        }})()
        "#,
        selector = js_string(selector),
        value = js_string(value),
    )
}

/// 填写输入框，并触发 input / change 事件
fn fill_script(selector: &str, value: &str) -> String {
    format!(
        r#"
        (() => {{
            const el = document.querySelector({selector});
            if (!el) return {{ found: false, applied: false }};
            el.focus();
            el.value = {value};
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return {{ found: true, applied: true }};
        }})()
        "#,
        selector = js_string(selector),
        value = js_string(value),
    )
}
