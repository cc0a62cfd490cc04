//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `request_channel` - 请求通道
//! - 接收调用方的请求，逐个交给管线处理
//! - 每个请求恰好回复一个结果
//! - 保管停在 HoldForReview 的浏览器会话
//!
//! ### `pipeline` - 单个请求处理管线
//! - 校验请求、解析记录和日期
//! - 调用 `ScheduleFlow` 驱动浏览器
//! - 生成结果消息、写运行日志
//!
//! ## 层次关系
//!
//! ```text
//! request_channel (逐个处理请求)
//!     ↓
//! pipeline (处理单个 ScheduleRequest)
//!     ↓
//! workflow::ScheduleFlow (状态机)
//!     ↓
//! infrastructure (BrowserLauncher / FormSession)
//! ```

pub mod pipeline;
pub mod request_channel;

pub use pipeline::{PipelineRun, SchedulePipeline};
pub use request_channel::RequestChannel;
