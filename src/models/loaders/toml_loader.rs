use crate::models::locators::SiteLocators;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载站点定位规则
pub async fn load_locators_file(toml_file_path: &Path) -> Result<SiteLocators> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取定位规则文件: {}", toml_file_path.display()))?;

    parse_locators(&content)
        .with_context(|| format!("无法解析定位规则文件: {}", toml_file_path.display()))
}

/// 解析 TOML 格式的定位规则
pub fn parse_locators(content: &str) -> Result<SiteLocators> {
    let locators: SiteLocators = toml::from_str(content)?;

    if locators.delivery_year.is_empty() {
        anyhow::bail!("delivery_year 不能为空");
    }

    Ok(locators)
}

/// 加载定位规则：未指定文件时使用内置规则
pub async fn load_site_locators(path: Option<&str>) -> Result<SiteLocators> {
    match path {
        Some(path) => {
            let locators = load_locators_file(Path::new(path)).await?;
            tracing::info!("已加载定位规则 v{}: {}", locators.version, path);
            Ok(locators)
        }
        None => {
            let locators = SiteLocators::default();
            tracing::info!("使用内置定位规则 v{}", locators.version);
            Ok(locators)
        }
    }
}
