//! 单个请求处理管线 - 编排层
//!
//! ## 职责
//!
//! 把一个 `ScheduleRequest` 变成一个 `ResultPayload`：
//!
//! 1. 校验请求
//! 2. 解析记录、解析日期、检查必填字段
//! 3. 交给 `ScheduleFlow` 驱动浏览器
//! 4. 生成结果消息并写运行日志
//!
//! 任何错误都在这里收口，转换成 `error` 结果，错误文本原样返回。

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{AutomationError, AutomationResult};
use crate::infrastructure::BrowserLauncher;
use crate::models::{
    AutomationOutcome, ParsedRecord, RecordField, ResultPayload, ScheduleRequest, SiteLocators,
};
use crate::services::{parse_record, report, resolve_date, RunJournal};
use crate::utils::logging::truncate_text;
use crate::workflow::{FormInput, HeldSession, ScheduleCtx, ScheduleFlow, StepTimeouts};

/// 一次处理的产出
#[derive(Debug)]
pub struct PipelineRun {
    /// 返回给调用方的结果
    pub payload: ResultPayload,
    /// 成功时保持打开、等待人工确认的会话
    pub held: Option<HeldSession>,
}

/// 请求处理管线
pub struct SchedulePipeline {
    launcher: Arc<dyn BrowserLauncher>,
    locators: SiteLocators,
    timeouts: StepTimeouts,
    journal: Option<RunJournal>,
}

impl SchedulePipeline {
    pub fn new(
        launcher: Arc<dyn BrowserLauncher>,
        locators: SiteLocators,
        timeouts: StepTimeouts,
    ) -> Self {
        Self {
            launcher,
            locators,
            timeouts,
            journal: None,
        }
    }

    /// 按配置创建（超时、运行日志）
    pub fn from_config(
        config: &Config,
        launcher: Arc<dyn BrowserLauncher>,
        locators: SiteLocators,
    ) -> Self {
        let pipeline = Self::new(launcher, locators, config.step_timeouts());
        match &config.journal_file {
            Some(path) => pipeline.with_journal(RunJournal::with_path(path.clone())),
            None => pipeline,
        }
    }

    pub fn with_journal(mut self, journal: RunJournal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// 处理一个请求，总是产生一个结果
    pub async fn process_request(
        &self,
        ctx: &ScheduleCtx,
        request: ScheduleRequest,
    ) -> PipelineRun {
        info!("\n{} {}", ctx, "=".repeat(40));
        info!("{} 📥 收到请求: {}", ctx, request.url);
        debug!("{} {:?}", ctx, request);

        let (record, result) = match request.validate() {
            Err(e) => (None, Err(e)),
            Ok(()) => {
                let record = parse_record(&request.writeup);
                log_record(ctx, &record);
                let result = self.automate(ctx, &request, &record).await;
                (Some(record), result)
            }
        };

        let (outcome, held) = match result {
            Ok(held) => (AutomationOutcome::Success, Some(held)),
            Err(e) => (AutomationOutcome::from(AutomationResult::<()>::Err(e)), None),
        };
        let payload = report(outcome);

        if payload.is_success() {
            info!("{} ✅ {} (耗时 {} ms)", ctx, payload.message, ctx.elapsed_ms());
        } else {
            error!("{} ❌ {} (耗时 {} ms)", ctx, payload.message, ctx.elapsed_ms());
        }

        if let Some(journal) = &self.journal {
            if let Err(e) = journal.append(ctx.request_id, record.as_ref(), &payload) {
                warn!("{} ⚠️ 写入运行日志 {} 失败: {}", ctx, journal.path(), e);
            }
        }

        PipelineRun { payload, held }
    }

    async fn automate(
        &self,
        ctx: &ScheduleCtx,
        request: &ScheduleRequest,
        record: &ParsedRecord,
    ) -> AutomationResult<HeldSession> {
        let date = resolve_date(record.get(RecordField::Date))?;
        let from = required_field(record, RecordField::From)?;
        let subject = required_field(record, RecordField::Subject)?;

        info!(
            "{} 📅 投递日期: {}-{}-{}",
            ctx,
            self.locators.delivery_year,
            date.month_value(),
            date.day_value()
        );

        let flow = ScheduleFlow::new(self.launcher.as_ref(), &self.locators, self.timeouts);
        let input = FormInput {
            date,
            from,
            subject,
        };
        flow.run(ctx, &request.credentials(), &request.url, &input)
            .await
    }
}

fn required_field(record: &ParsedRecord, field: RecordField) -> AutomationResult<&str> {
    record
        .get(field)
        .ok_or(AutomationError::MissingField { field })
}

fn log_record(ctx: &ScheduleCtx, record: &ParsedRecord) {
    info!(
        "{} 📋 解析到 {}/{} 个字段",
        ctx,
        record.present_count(),
        RecordField::ALL.len()
    );
    for (field, value) in record.preview() {
        debug!("{}   {}: {}", ctx, field, truncate_text(value, 60));
    }
}
