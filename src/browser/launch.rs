use std::path::PathBuf;

use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::DriverError;

/// 浏览器启动参数
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// 是否无头运行（默认有界面，方便操作员最后确认）
    pub headless: bool,
    /// 浏览器可执行文件，未指定时自动查找
    pub executable: Option<PathBuf>,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: false,
            executable: None,
            viewport_width: 1920,
            viewport_height: 1080,
        }
    }
}

/// 启动浏览器并打开一个空白页面
///
/// 返回浏览器、页面以及处理浏览器事件的后台任务
pub async fn launch_browser(
    options: &LaunchOptions,
) -> Result<(Browser, Page, JoinHandle<()>), DriverError> {
    info!(
        "🚀 启动浏览器 ({})...",
        if options.headless { "无头" } else { "有界面" }
    );

    let mut builder = BrowserConfig::builder()
        .window_size(options.viewport_width, options.viewport_height)
        .viewport(Viewport {
            width: options.viewport_width,
            height: options.viewport_height,
            ..Viewport::default()
        })
        .args(vec![
            "--no-sandbox",            // 禁用沙盒，防止权限问题导致的崩溃
            "--disable-dev-shm-usage", // 防止共享内存不足
        ]);
    builder = if options.headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    if let Some(path) = &options.executable {
        debug!("浏览器路径: {}", path.display());
        builder = builder.chrome_executable(path);
    }

    let config = builder.build().map_err(|e| {
        error!("配置浏览器失败: {}", e);
        DriverError::Launch(format!("配置浏览器失败: {}", e))
    })?;

    let (mut browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        DriverError::Launch(e.to_string())
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = match browser.new_page("about:blank").await {
        Ok(page) => page,
        Err(e) => {
            error!("创建页面失败: {}", e);
            let _ = browser.close().await;
            let _ = browser.wait().await;
            handler_task.abort();
            return Err(DriverError::Launch(format!("创建页面失败: {}", e)));
        }
    };

    Ok((browser, page, handler_task))
}
