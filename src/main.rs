use std::sync::Arc;

use anyhow::Result;
use schedule_message_submit::app;
use schedule_message_submit::models::load_site_locators;
use schedule_message_submit::utils::logging;
use schedule_message_submit::{ChromiumLauncher, Config, RequestChannel, SchedulePipeline};
use tokio::io::BufReader;
use tracing::warn;

/// 从 stdin 逐行读取 JSON 请求，每个请求向 stdout 输出一行 JSON 结果
#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    let locators = load_site_locators(config.locators_file.as_deref()).await?;
    logging::log_startup(&config, &locators);

    let launcher = Arc::new(ChromiumLauncher::new(config.launch_options()));
    let channel = RequestChannel::spawn(SchedulePipeline::from_config(&config, launcher, locators));

    let mut stdout = tokio::io::stdout();
    let result = app::serve(
        &channel,
        &config.defaults,
        BufReader::new(tokio::io::stdin()),
        &mut stdout,
        ctrl_c(),
    )
    .await;

    channel.shutdown().await;
    result
}

/// Ctrl-C 信号；无法注册时只能靠输入结束来退出
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("无法监听 Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
