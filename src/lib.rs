//! # Schedule Message Submit
//!
//! 把粘贴的一行报表数据填进目标站点的消息排期表单
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 启动 Chromium
//! - `infrastructure/` - `BrowserLauncher` / `FormSession` 接口及 chromiumoxide 实现
//!
//! ### ② 业务能力层（Services）
//! - `parse_record` - 制表符分隔数据 → 16 个字段
//! - `resolve_date` - `日/月` → 投递日期
//! - `report` - 运行结果 → 结果消息
//! - `RunJournal` - 写运行日志
//!
//! ### ③ 流程层（Workflow）
//! - `ScheduleFlow` - 顺序执行、失败即停的填表状态机，停在 HoldForReview
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/pipeline` - 单个请求：校验 → 解析 → 填表 → 结果
//! - `orchestrator/request_channel` - 单槽请求通道，逐个处理请求
//!
//! ### ⑤ 接入层（App）
//! - `app::serve` - 逐行 JSON 请求 → 逐行 JSON 结果，输入结束后继续保留待确认的表单
//!
//! ## 模块结构

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AutomationError, AutomationResult, DriverError};
pub use infrastructure::{BrowserLauncher, ChromiumLauncher, FormSession};
pub use models::{
    AutomationOutcome, ParsedRecord, RecordField, ResolvedDate, ResultPayload, ResultStatus,
    ScheduleRequest, SiteLocators,
};
pub use orchestrator::{RequestChannel, SchedulePipeline};
pub use services::{parse_record, report, resolve_date};
pub use workflow::{HeldSession, ScheduleCtx, ScheduleFlow, SchedulerStep, StepTimeouts};
