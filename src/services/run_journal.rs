//! 运行日志服务 - 业务能力层
//!
//! 只负责"每次请求追加一行记录"，不关心流程

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

use crate::models::{ParsedRecord, RecordField, ResultPayload, ResultStatus};

/// 运行日志
///
/// 每行记录包含时间、请求编号、日期、发件人、主题和结果，
/// 不写入 URL、用户名或密码
pub struct RunJournal {
    journal_file_path: String,
}

impl RunJournal {
    /// 使用指定文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            journal_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.journal_file_path
    }

    /// 追加一条运行记录
    ///
    /// # 参数
    /// - `request_id`: 请求编号
    /// - `record`: 解析后的记录（请求在解析前就失败时为 `None`）
    /// - `payload`: 返回给调用方的结果
    pub fn append(
        &self,
        request_id: u64,
        record: Option<&ParsedRecord>,
        payload: &ResultPayload,
    ) -> Result<()> {
        let line = format_entry(
            &chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            request_id,
            record,
            payload,
        );
        debug!("写入运行日志: {}", self.journal_file_path);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.journal_file_path)?;
        file.write_all(line.as_bytes())?;

        Ok(())
    }
}

fn format_entry(
    timestamp: &str,
    request_id: u64,
    record: Option<&ParsedRecord>,
    payload: &ResultPayload,
) -> String {
    let field = |f: RecordField| {
        record
            .and_then(|r| r.get(f))
            .map(single_line)
            .unwrap_or_else(|| "-".to_string())
    };
    let status = match payload.status {
        ResultStatus::Success => "success",
        ResultStatus::Error => "error",
    };

    format!(
        "[{}] 请求 #{} | 日期 {} | 发件人 {} | 主题 {} | {} | {}\n",
        timestamp,
        request_id,
        field(RecordField::Date),
        field(RecordField::From),
        field(RecordField::Subject),
        status,
        redact_urls(&single_line(&payload.message))
    )
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// 消息里的 URL 只保留 `scheme://host`，路径、查询参数和账号信息都不落盘
fn redact_urls(text: &str) -> String {
    text.split(' ')
        .map(|word| match word.find("://") {
            Some(pos) => {
                let (scheme, rest) = word.split_at(pos + 3);
                let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
                let host = authority.rsplit('@').next().unwrap_or_default();
                format!("{}{}", scheme, host)
            }
            None if word.starts_with("data:") => "data:".to_string(),
            None => word.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::parse_record;

    #[test]
    fn test_entry_format() {
        let record = parse_record(
            "24/11\tMon\tNetA\t\t\t\t\t\t\t\t\t\t\tAlice\tHello\nWorld",
        );
        let line = format_entry(
            "2024-11-20 09:00:00",
            3,
            Some(&record),
            &ResultPayload::success(),
        );
        assert_eq!(
            line,
            "[2024-11-20 09:00:00] 请求 #3 | 日期 24/11 | 发件人 Alice | 主题 Hello World | success | Automation completed successfully.\n"
        );
    }

    #[test]
    fn test_entry_without_record() {
        let line = format_entry(
            "2024-11-20 09:00:00",
            1,
            None,
            &ResultPayload::error("请求参数无效: 报表数据为空"),
        );
        assert!(line.contains("日期 - | 发件人 - | 主题 -"));
        assert!(line.contains("| error | 请求参数无效"));
    }

    #[test]
    fn test_entry_strips_url_path_and_query() {
        let line = format_entry(
            "2024-11-20 09:00:00",
            2,
            None,
            &ResultPayload::error(
                "导航到 https://ops:pw@panel.test/schedule?token=SECRET123 失败: 操作超时 (1s)",
            ),
        );
        assert!(line.contains("| error | 导航到 https://panel.test 失败: 操作超时 (1s)"));
        assert!(!line.contains("SECRET123"));
        assert!(!line.contains("/schedule"));
        assert!(!line.contains("ops:pw"));
    }

    #[test]
    fn test_redact_urls_keeps_plain_text() {
        assert_eq!(redact_urls("记录缺少字段: From"), "记录缺少字段: From");
        assert_eq!(redact_urls("打开 data:text/html,<p>x</p> 失败"), "打开 data: 失败");
        assert_eq!(redact_urls("http://host.test"), "http://host.test");
    }

    #[test]
    fn test_append_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.txt");
        let journal = RunJournal::with_path(path.to_string_lossy().to_string());

        journal.append(1, None, &ResultPayload::error("a")).unwrap();
        journal.append(2, None, &ResultPayload::success()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("请求 #1"));
        assert!(lines[1].contains("请求 #2"));
    }
}
