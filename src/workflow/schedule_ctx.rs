//! 请求处理上下文
//!
//! 封装"我正在处理第几个请求"这一信息

use std::fmt::Display;

use chrono::{DateTime, Local};

/// 请求处理上下文
#[derive(Debug, Clone)]
pub struct ScheduleCtx {
    /// 请求编号（从1开始，仅用于日志显示）
    pub request_id: u64,

    /// 收到请求的时间
    pub received_at: DateTime<Local>,
}

impl ScheduleCtx {
    /// 创建新的请求上下文
    pub fn new(request_id: u64) -> Self {
        Self {
            request_id,
            received_at: Local::now(),
        }
    }

    /// 从收到请求到现在经过的毫秒数
    pub fn elapsed_ms(&self) -> i64 {
        (Local::now() - self.received_at).num_milliseconds()
    }
}

impl Display for ScheduleCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[请求 #{}]", self.request_id)
    }
}
