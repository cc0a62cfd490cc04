/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::SiteLocators;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则 verbose 时为 debug，默认 info。
/// 日志写到 stderr，stdout 留给结果消息。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, locators: &SiteLocators) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!(
        "🌐 浏览器: {} {}x{}",
        if config.headless { "无头" } else { "有界面" },
        config.viewport_width,
        config.viewport_height
    );
    info!(
        "⏱ 超时: 启动 {}s / 导航 {}s / 元素 {}s",
        config.launch_timeout_secs, config.navigation_timeout_secs, config.step_timeout_secs
    );
    info!(
        "📌 定位规则 v{}，投递年份 {}",
        locators.version, locators.delivery_year
    );
    if let Some(path) = &config.journal_file {
        info!("📝 运行日志: {}", path);
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
