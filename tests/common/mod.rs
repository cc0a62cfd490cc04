//! 测试用的内存浏览器驱动
//!
//! 记录每个会话执行过的操作，并可以在指定位置注入失败或卡死

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use schedule_message_submit::infrastructure::{BrowserLauncher, FormSession};
use schedule_message_submit::models::Credentials;
use schedule_message_submit::{DriverError, ScheduleRequest, SiteLocators};

pub const TARGET_URL: &str = "https://panel.test/schedule";

/// 驱动收到的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Launch,
    Goto(String),
    Title,
    Click(String),
    Select(String, String),
    Fill(String, String),
    Close,
}

/// 注入的故障
#[derive(Debug, Clone)]
pub enum Fault {
    /// 启动失败
    Launch,
    /// 启动时 panic
    PanicOnLaunch,
    /// 启动永远不返回
    HangOnLaunch,
    /// 打开页面永远不返回
    HangOnGoto,
    /// 打开页面失败
    Goto,
    /// 操作该选择器时报元素不存在
    MissingSelector(String),
    /// 操作该选择器时永远不返回
    HangOn(String),
}

/// 按会话（用户名）标记的操作记录
#[derive(Clone, Default)]
pub struct ActionLog(Arc<Mutex<Vec<(String, Action)>>>);

impl ActionLog {
    fn push(&self, tag: &str, action: Action) {
        self.0.lock().unwrap().push((tag.to_string(), action));
    }

    pub fn entries(&self) -> Vec<(String, Action)> {
        self.0.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.entries().into_iter().map(|(_, a)| a).collect()
    }

    pub fn actions_for(&self, tag: &str) -> Vec<Action> {
        self.entries()
            .into_iter()
            .filter(|(t, _)| t == tag)
            .map(|(_, a)| a)
            .collect()
    }
}

pub struct FakeLauncher {
    log: ActionLog,
    fault: Option<Fault>,
    step_delay: Duration,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self {
            log: ActionLog::default(),
            fault: None,
            step_delay: Duration::ZERO,
        }
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn log(&self) -> ActionLog {
        self.log.clone()
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn launch(&self, credentials: &Credentials) -> Result<Box<dyn FormSession>, DriverError> {
        pause(self.step_delay).await;
        self.log.push(&credentials.username, Action::Launch);
        match &self.fault {
            Some(Fault::Launch) => {
                return Err(DriverError::Launch("找不到浏览器可执行文件".to_string()))
            }
            Some(Fault::PanicOnLaunch) => panic!("模拟驱动崩溃"),
            Some(Fault::HangOnLaunch) => std::future::pending::<()>().await,
            _ => {}
        }
        Ok(Box::new(FakeSession {
            tag: credentials.username.clone(),
            log: self.log.clone(),
            fault: self.fault.clone(),
            step_delay: self.step_delay,
        }))
    }
}

struct FakeSession {
    tag: String,
    log: ActionLog,
    fault: Option<Fault>,
    step_delay: Duration,
}

impl FakeSession {
    async fn element_action(&self, selector: &str, action: Action) -> Result<(), DriverError> {
        pause(self.step_delay).await;
        self.log.push(&self.tag, action);
        match &self.fault {
            Some(Fault::MissingSelector(s)) if s == selector => Err(DriverError::ElementMissing {
                selector: selector.to_string(),
            }),
            Some(Fault::HangOn(s)) if s == selector => std::future::pending().await,
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl FormSession for FakeSession {
    async fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        pause(self.step_delay).await;
        self.log.push(&self.tag, Action::Goto(url.to_string()));
        match self.fault {
            Some(Fault::Goto) => {
                Err(DriverError::Protocol("net::ERR_NAME_NOT_RESOLVED".to_string()))
            }
            Some(Fault::HangOnGoto) => std::future::pending().await,
            _ => Ok(()),
        }
    }

    async fn title(&mut self) -> Result<Option<String>, DriverError> {
        self.log.push(&self.tag, Action::Title);
        Ok(Some("Message Scheduler".to_string()))
    }

    async fn click(&mut self, selector: &str) -> Result<(), DriverError> {
        self.element_action(selector, Action::Click(selector.to_string()))
            .await
    }

    async fn select_option(&mut self, selector: &str, value: &str) -> Result<(), DriverError> {
        self.element_action(
            selector,
            Action::Select(selector.to_string(), value.to_string()),
        )
        .await
    }

    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), DriverError> {
        self.element_action(selector, Action::Fill(selector.to_string(), value.to_string()))
            .await
    }

    async fn close(self: Box<Self>) -> Result<(), DriverError> {
        self.log.push(&self.tag, Action::Close);
        Ok(())
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// 一行完整的报表数据
pub fn writeup(date: &str, from: &str, subject: &str) -> String {
    [
        date, "Tue", "NetA", "Spring Offer", "a@x.test", "92%", "3", "1", "12.50", "0.41",
        "3.20", "7", "1.2%", from, subject, "S-001",
    ]
    .join("\t")
}

pub fn request(username: &str, writeup: String) -> ScheduleRequest {
    ScheduleRequest {
        writeup,
        url: TARGET_URL.to_string(),
        username: username.to_string(),
        password: "s3cret-pass".to_string(),
    }
}

/// 成功填写表单时驱动应收到的完整操作序列
pub fn expected_success_actions(month: &str, day: &str, from: &str, subject: &str) -> Vec<Action> {
    let loc = SiteLocators::default();
    vec![
        Action::Launch,
        Action::Goto(TARGET_URL.to_string()),
        Action::Title,
        Action::Click(loc.schedule_button.clone()),
        Action::Select(loc.year_select.clone(), "2024".to_string()),
        Action::Select(loc.month_select.clone(), month.to_string()),
        Action::Select(loc.day_select.clone(), day.to_string()),
        Action::Fill(loc.from_field.clone(), from.to_string()),
        Action::Fill(loc.subject_field.clone(), subject.to_string()),
    ]
}
