//! 排期表单填写流程 - 流程层
//!
//! 严格按顺序执行的状态机，没有重试，也不根据页面内容分支：
//!
//! ```text
//! Start → Navigate → LocateScheduler → SetYear → SetMonth → SetDay
//!       → FillFrom → FillSubject → HoldForReview
//! ```
//!
//! 任意一步失败立即中止，先释放浏览器会话再返回错误。
//! 全部成功后停在 HoldForReview：会话保持打开，由操作员人工确认并提交，
//! 流程本身从不提交表单。

use std::fmt;
use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::error::{AutomationError, AutomationResult, DriverError};
use crate::infrastructure::{BrowserLauncher, FormSession};
use crate::models::{Credentials, ResolvedDate, SiteLocators};
use crate::workflow::schedule_ctx::ScheduleCtx;

/// 状态机中的各个状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulerStep {
    Start,
    Navigate,
    LocateScheduler,
    SetYear,
    SetMonth,
    SetDay,
    FillFrom,
    FillSubject,
    HoldForReview,
}

impl SchedulerStep {
    /// 执行顺序
    pub const SEQUENCE: [SchedulerStep; 9] = [
        SchedulerStep::Start,
        SchedulerStep::Navigate,
        SchedulerStep::LocateScheduler,
        SchedulerStep::SetYear,
        SchedulerStep::SetMonth,
        SchedulerStep::SetDay,
        SchedulerStep::FillFrom,
        SchedulerStep::FillSubject,
        SchedulerStep::HoldForReview,
    ];

    pub fn is_terminal(self) -> bool {
        self == SchedulerStep::HoldForReview
    }
}

impl fmt::Display for SchedulerStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// 每一步的超时时间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTimeouts {
    /// 启动浏览器
    pub launch: Duration,
    /// 打开页面并读取标题
    pub navigation: Duration,
    /// 单个元素操作（也用于关闭会话）
    pub element: Duration,
}

impl Default for StepTimeouts {
    fn default() -> Self {
        Self {
            launch: Duration::from_secs(60),
            navigation: Duration::from_secs(60),
            element: Duration::from_secs(30),
        }
    }
}

/// 要写入表单的内容
#[derive(Debug, Clone, Copy)]
pub struct FormInput<'a> {
    pub date: ResolvedDate,
    pub from: &'a str,
    pub subject: &'a str,
}

/// 停在 HoldForReview 的浏览器会话
///
/// 持有者负责在合适的时候调用 [`HeldSession::release`]
pub struct HeldSession {
    session: Box<dyn FormSession>,
    request_id: u64,
    held_since: DateTime<Local>,
    close_timeout: Duration,
}

impl HeldSession {
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    pub fn held_since(&self) -> DateTime<Local> {
        self.held_since
    }

    /// 关闭会话
    pub async fn release(self) {
        info!(
            "🧹 释放请求 #{} 保留的浏览器会话 (保留于 {})",
            self.request_id,
            self.held_since.format("%H:%M:%S")
        );
        close_session(self.session, self.close_timeout).await;
    }
}

impl fmt::Debug for HeldSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeldSession")
            .field("request_id", &self.request_id)
            .field("held_since", &self.held_since)
            .finish()
    }
}

/// 排期表单填写流程
///
/// - 不持有浏览器，每次 run() 通过 launcher 新建会话
/// - 只依赖驱动接口，不认识 chromiumoxide
pub struct ScheduleFlow<'a> {
    launcher: &'a dyn BrowserLauncher,
    locators: &'a SiteLocators,
    timeouts: StepTimeouts,
}

impl<'a> ScheduleFlow<'a> {
    pub fn new(
        launcher: &'a dyn BrowserLauncher,
        locators: &'a SiteLocators,
        timeouts: StepTimeouts,
    ) -> Self {
        Self {
            launcher,
            locators,
            timeouts,
        }
    }

    /// 执行完整流程，成功时返回保持打开的会话
    pub async fn run(
        &self,
        ctx: &ScheduleCtx,
        credentials: &Credentials,
        url: &str,
        input: &FormInput<'_>,
    ) -> AutomationResult<HeldSession> {
        let mut session = self.start(ctx, credentials).await?;

        match self.populate(ctx, session.as_mut(), url, input).await {
            Ok(()) => {
                info!(
                    "{} ⏸ {}: 表单已填写，等待操作员确认提交",
                    ctx,
                    SchedulerStep::HoldForReview
                );
                Ok(HeldSession {
                    session,
                    request_id: ctx.request_id,
                    held_since: Local::now(),
                    close_timeout: self.timeouts.element,
                })
            }
            Err(e) => {
                error!("{} ❌ 流程中止: {}", ctx, e);
                close_session(session, self.timeouts.element).await;
                info!("{} 🧹 浏览器会话已释放", ctx);
                Err(e)
            }
        }
    }

    async fn start(
        &self,
        ctx: &ScheduleCtx,
        credentials: &Credentials,
    ) -> AutomationResult<Box<dyn FormSession>> {
        info!("{} ▶ {}", ctx, SchedulerStep::Start);

        match timeout(self.timeouts.launch, self.launcher.launch(credentials)).await {
            Ok(Ok(session)) => Ok(session),
            Ok(Err(source)) => Err(AutomationError::AuthLaunch { source }),
            Err(_) => Err(AutomationError::AuthLaunch {
                source: DriverError::Timeout(self.timeouts.launch),
            }),
        }
    }

    async fn populate(
        &self,
        ctx: &ScheduleCtx,
        session: &mut dyn FormSession,
        url: &str,
        input: &FormInput<'_>,
    ) -> AutomationResult<()> {
        self.navigate(ctx, session, url).await?;

        let loc = self.locators;
        let month = input.date.month_value();
        let day = input.date.day_value();

        self.element_step(
            ctx,
            SchedulerStep::LocateScheduler,
            &loc.schedule_button,
            session.click(&loc.schedule_button),
        )
        .await?;
        self.element_step(
            ctx,
            SchedulerStep::SetYear,
            &loc.year_select,
            session.select_option(&loc.year_select, &loc.delivery_year),
        )
        .await?;
        self.element_step(
            ctx,
            SchedulerStep::SetMonth,
            &loc.month_select,
            session.select_option(&loc.month_select, &month),
        )
        .await?;
        self.element_step(
            ctx,
            SchedulerStep::SetDay,
            &loc.day_select,
            session.select_option(&loc.day_select, &day),
        )
        .await?;
        self.element_step(
            ctx,
            SchedulerStep::FillFrom,
            &loc.from_field,
            session.fill(&loc.from_field, input.from),
        )
        .await?;
        self.element_step(
            ctx,
            SchedulerStep::FillSubject,
            &loc.subject_field,
            session.fill(&loc.subject_field, input.subject),
        )
        .await?;

        Ok(())
    }

    async fn navigate(
        &self,
        ctx: &ScheduleCtx,
        session: &mut dyn FormSession,
        url: &str,
    ) -> AutomationResult<()> {
        info!("{} ▶ {} {}", ctx, SchedulerStep::Navigate, url);

        let load = async {
            session.goto(url).await?;
            session.title().await
        };

        match timeout(self.timeouts.navigation, load).await {
            Ok(Ok(title)) => {
                info!("{} ✓ 页面已加载: {}", ctx, title.unwrap_or_default());
                Ok(())
            }
            Ok(Err(source)) => Err(AutomationError::Navigation {
                url: url.to_string(),
                source,
            }),
            Err(_) => Err(AutomationError::Navigation {
                url: url.to_string(),
                source: DriverError::Timeout(self.timeouts.navigation),
            }),
        }
    }

    /// 执行一个元素操作，失败或超时都归为 ElementNotFound
    async fn element_step<F>(
        &self,
        ctx: &ScheduleCtx,
        step: SchedulerStep,
        locator: &str,
        action: F,
    ) -> AutomationResult<()>
    where
        F: Future<Output = Result<(), DriverError>>,
    {
        info!("{} ▶ {}", ctx, step);
        debug!("{} 定位: {}", ctx, locator);

        let source = match timeout(self.timeouts.element, action).await {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(source)) => source,
            Err(_) => DriverError::Timeout(self.timeouts.element),
        };

        Err(AutomationError::ElementNotFound {
            step,
            locator: locator.to_string(),
            source,
        })
    }
}

async fn close_session(session: Box<dyn FormSession>, limit: Duration) {
    match timeout(limit, session.close()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("关闭浏览器会话失败: {}", e),
        Err(_) => warn!("关闭浏览器会话超时 ({:?})", limit),
    }
}
