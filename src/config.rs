use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::browser::LaunchOptions;
use crate::models::RequestDefaults;
use crate::workflow::StepTimeouts;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 是否无头运行浏览器
    pub headless: bool,
    /// 浏览器可执行文件路径
    pub browser_executable: Option<String>,
    /// 页面视口大小
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// 启动浏览器的超时（秒）
    pub launch_timeout_secs: u64,
    /// 打开页面的超时（秒）
    pub navigation_timeout_secs: u64,
    /// 单个元素操作的超时（秒）
    pub step_timeout_secs: u64,
    /// 站点定位规则文件，未设置时使用内置规则
    pub locators_file: Option<String>,
    /// 运行日志文件，未设置时不写
    pub journal_file: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 请求中空字段的默认值
    pub defaults: RequestDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            headless: false,
            browser_executable: None,
            viewport_width: 1920,
            viewport_height: 1080,
            launch_timeout_secs: 60,
            navigation_timeout_secs: 60,
            step_timeout_secs: 30,
            locators_file: None,
            journal_file: None,
            verbose_logging: false,
            defaults: RequestDefaults::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置，缺失或无法解析的值使用默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        let text = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            headless: parsed(&lookup, "HEADLESS").unwrap_or(default.headless),
            browser_executable: text("BROWSER_EXECUTABLE").or(default.browser_executable),
            viewport_width: parsed(&lookup, "VIEWPORT_WIDTH").unwrap_or(default.viewport_width),
            viewport_height: parsed(&lookup, "VIEWPORT_HEIGHT")
                .unwrap_or(default.viewport_height),
            launch_timeout_secs: parsed(&lookup, "LAUNCH_TIMEOUT_SECS")
                .unwrap_or(default.launch_timeout_secs),
            navigation_timeout_secs: parsed(&lookup, "NAVIGATION_TIMEOUT_SECS")
                .unwrap_or(default.navigation_timeout_secs),
            step_timeout_secs: parsed(&lookup, "STEP_TIMEOUT_SECS")
                .unwrap_or(default.step_timeout_secs),
            locators_file: text("SITE_LOCATORS_FILE").or(default.locators_file),
            journal_file: text("RUN_JOURNAL_FILE").or(default.journal_file),
            verbose_logging: parsed(&lookup, "VERBOSE_LOGGING")
                .unwrap_or(default.verbose_logging),
            defaults: RequestDefaults {
                url: text("SCHEDULE_URL"),
                username: text("SCHEDULE_USERNAME"),
                password: text("SCHEDULE_PASSWORD"),
            },
        }
    }

    /// 浏览器启动参数
    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            headless: self.headless,
            executable: self.browser_executable.as_ref().map(PathBuf::from),
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
        }
    }

    /// 各步骤超时
    pub fn step_timeouts(&self) -> StepTimeouts {
        StepTimeouts {
            launch: Duration::from_secs(self.launch_timeout_secs),
            navigation: Duration::from_secs(self.navigation_timeout_secs),
            element: Duration::from_secs(self.step_timeout_secs),
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}
