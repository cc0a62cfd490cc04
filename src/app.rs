//! 命令行接入 - 接入层
//!
//! 每行输入一个 JSON 请求，每个请求输出一行 JSON 结果。
//!
//! 表单填好后浏览器停在 HoldForReview 等人工确认，所以输入结束时
//! 如果还有保留的会话，会继续等待退出信号，而不是马上关闭浏览器。

use std::future::Future;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::models::{RequestDefaults, ResultPayload, ScheduleRequest};
use crate::orchestrator::RequestChannel;

/// 处理输入中的全部请求，直到输入结束或收到退出信号
///
/// # 参数
/// - `channel`: 请求通道，调用方负责在返回后 `shutdown()`
/// - `defaults`: 请求中空字段的默认值
/// - `input` / `output`: 逐行的 JSON 请求与结果
/// - `shutdown`: 退出信号（命令行中为 Ctrl-C）
pub async fn serve<R, W, S>(
    channel: &RequestChannel,
    defaults: &RequestDefaults,
    input: R,
    output: &mut W,
    shutdown: S,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut lines = input.lines();
    let mut holding = false;

    info!("⌨️ 等待请求 (每行一个 JSON)...");
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("读取输入失败")?,
            _ = &mut shutdown => {
                info!("🛑 收到退出信号");
                return Ok(());
            }
        };

        let Some(line) = line else {
            if holding {
                info!("⏸ 输入已结束，表单保持打开等待确认，按 Ctrl-C 关闭浏览器并退出");
                (&mut shutdown).await;
                info!("🛑 收到退出信号");
            }
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }

        let payload = match serde_json::from_str::<ScheduleRequest>(&line) {
            Ok(request) => {
                let request = request.with_defaults(defaults);
                tokio::select! {
                    payload = channel.submit(request) => {
                        // 新请求开始时上一个会话已释放，只有成功的请求会留下会话
                        holding = payload.is_success();
                        payload
                    }
                    _ = &mut shutdown => {
                        warn!("🛑 请求处理中收到退出信号，当前请求结束后关闭");
                        return Ok(());
                    }
                }
            }
            Err(e) => {
                warn!("无法解析请求: {}", e);
                ResultPayload::error(format!("请求格式错误: {}", e))
            }
        };

        let mut out = serde_json::to_string(&payload)?;
        out.push('\n');
        output.write_all(out.as_bytes()).await?;
        output.flush().await?;
    }
}
