//! 请求通道 - 编排层
//!
//! ## 职责
//!
//! 调用方与自动化核心之间的异步边界：
//!
//! 1. **单槽排队**：容量为 1 的 mpsc 通道，后台只有一个 worker
//! 2. **逐个处理**：上一个请求的结果送出之前，下一个请求不会开始
//! 3. **一问一答**：每个请求自带 oneshot 回复槽，恰好收到一个结果
//! 4. **会话保管**：worker 持有停在 HoldForReview 的会话，
//!    收到下一个请求、`release_held()` 或关闭通道时释放

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::error::AutomationError;
use crate::models::{ResultPayload, ScheduleRequest};
use crate::orchestrator::pipeline::SchedulePipeline;
use crate::workflow::{HeldSession, ScheduleCtx};

enum Command {
    Schedule {
        request: ScheduleRequest,
        reply: oneshot::Sender<ResultPayload>,
    },
    ReleaseHeld {
        reply: oneshot::Sender<bool>,
    },
}

/// 请求通道
pub struct RequestChannel {
    tx: mpsc::Sender<Command>,
    worker: JoinHandle<()>,
}

impl RequestChannel {
    /// 启动后台 worker
    pub fn spawn(pipeline: SchedulePipeline) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let worker = tokio::spawn(run_worker(pipeline, rx));
        Self { tx, worker }
    }

    /// 提交一个请求并等待结果
    ///
    /// 永远返回一个结果；worker 不可用时返回 `error`
    pub async fn submit(&self, request: ScheduleRequest) -> ResultPayload {
        let (reply_tx, reply_rx) = oneshot::channel();
        let command = Command::Schedule {
            request,
            reply: reply_tx,
        };

        if self.tx.send(command).await.is_err() {
            return unknown_error("请求通道已关闭");
        }

        match reply_rx.await {
            Ok(payload) => payload,
            Err(_) => unknown_error("自动化任务意外终止"),
        }
    }

    /// 释放当前保留的会话，返回是否真的有会话被释放
    pub async fn release_held(&self) -> bool {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self
            .tx
            .send(Command::ReleaseHeld { reply: reply_tx })
            .await
            .is_err()
        {
            return false;
        }
        reply_rx.await.unwrap_or(false)
    }

    /// 关闭通道：等待进行中的请求结束，并释放保留的会话
    pub async fn shutdown(self) {
        let RequestChannel { tx, worker } = self;
        drop(tx);
        if let Err(e) = worker.await {
            error!("请求通道 worker 异常退出: {}", e);
        }
    }
}

fn unknown_error(message: &str) -> ResultPayload {
    ResultPayload::error(AutomationError::Unknown(message.to_string()).to_string())
}

async fn run_worker(pipeline: SchedulePipeline, mut rx: mpsc::Receiver<Command>) {
    let mut held: Option<HeldSession> = None;
    let mut next_request_id: u64 = 0;

    while let Some(command) = rx.recv().await {
        match command {
            Command::Schedule { request, reply } => {
                next_request_id += 1;
                let ctx = ScheduleCtx::new(next_request_id);

                // 同一时间只保留一个浏览器会话
                if let Some(previous) = held.take() {
                    previous.release().await;
                }

                let run = pipeline.process_request(&ctx, request).await;
                held = run.held;

                if reply.send(run.payload).is_err() {
                    warn!("{} 调用方已不再等待结果", ctx);
                }
            }
            Command::ReleaseHeld { reply } => {
                let released = match held.take() {
                    Some(session) => {
                        session.release().await;
                        true
                    }
                    None => false,
                };
                let _ = reply.send(released);
            }
        }
    }

    if let Some(session) = held.take() {
        session.release().await;
    }
    info!("📪 请求通道已关闭");
}
