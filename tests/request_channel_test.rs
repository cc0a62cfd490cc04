mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{expected_success_actions, request, writeup, Action, FakeLauncher, Fault};
use schedule_message_submit::{
    RequestChannel, ResultStatus, SchedulePipeline, SiteLocators, StepTimeouts,
};

fn channel(launcher: FakeLauncher) -> RequestChannel {
    RequestChannel::spawn(SchedulePipeline::new(
        Arc::new(launcher),
        SiteLocators::default(),
        StepTimeouts::default(),
    ))
}

#[tokio::test]
async fn test_concurrent_requests_do_not_interleave() {
    let launcher = FakeLauncher::new().with_step_delay(Duration::from_millis(5));
    let log = launcher.log();
    let channel = channel(launcher);

    let (first, second) = tokio::join!(
        channel.submit(request("first", writeup("24/11", "Alice", "Hello"))),
        channel.submit(request("second", writeup("5/3", "Bob", "Bye"))),
    );
    assert_eq!(first.status, ResultStatus::Success);
    assert_eq!(second.status, ResultStatus::Success);

    let entries = log.entries();
    let last_first = entries.iter().rposition(|(tag, _)| tag == "first").unwrap();
    let first_second = entries.iter().position(|(tag, _)| tag == "second").unwrap();
    assert!(
        last_first < first_second,
        "两个请求的操作交错了: {:?}",
        entries
    );

    // 第二个请求开始前，第一个请求保留的会话被释放
    let mut expected_first = expected_success_actions("11", "24", "Alice", "Hello");
    expected_first.push(Action::Close);
    assert_eq!(log.actions_for("first"), expected_first);
    assert_eq!(
        log.actions_for("second"),
        expected_success_actions("03", "05", "Bob", "Bye")
    );

    channel.shutdown().await;
    assert_eq!(log.actions_for("second").last(), Some(&Action::Close));
}

#[tokio::test]
async fn test_each_request_gets_exactly_its_own_result() {
    let launcher = FakeLauncher::new();
    let channel = channel(launcher);

    let ok = channel
        .submit(request("ops", writeup("24/11", "Alice", "Hello")))
        .await;
    let bad = channel
        .submit(request("ops", writeup("32/11", "Alice", "Hello")))
        .await;

    assert_eq!(ok.status, ResultStatus::Success);
    assert_eq!(bad.status, ResultStatus::Error);
    assert_eq!(bad.message, "无效日期: 32/11");

    channel.shutdown().await;
}

#[tokio::test]
async fn test_release_held_closes_session_once() {
    let launcher = FakeLauncher::new();
    let log = launcher.log();
    let channel = channel(launcher);

    assert!(!channel.release_held().await);

    let payload = channel
        .submit(request("ops", writeup("24/11", "Alice", "Hello")))
        .await;
    assert!(payload.is_success());
    assert!(!log.actions().contains(&Action::Close));

    assert!(channel.release_held().await);
    assert_eq!(log.actions().last(), Some(&Action::Close));
    assert!(!channel.release_held().await);

    channel.shutdown().await;
    let closes = log
        .actions()
        .into_iter()
        .filter(|a| *a == Action::Close)
        .count();
    assert_eq!(closes, 1);
}

#[tokio::test]
async fn test_failed_request_leaves_nothing_held() {
    let launcher = FakeLauncher::new().with_fault(Fault::Goto);
    let channel = channel(launcher);

    let payload = channel
        .submit(request("ops", writeup("24/11", "Alice", "Hello")))
        .await;
    assert_eq!(payload.status, ResultStatus::Error);
    assert!(!channel.release_held().await);

    channel.shutdown().await;
}

#[tokio::test]
async fn test_worker_crash_still_yields_one_error_result() {
    let launcher = FakeLauncher::new().with_fault(Fault::PanicOnLaunch);
    let channel = channel(launcher);

    let payload = channel
        .submit(request("ops", writeup("24/11", "Alice", "Hello")))
        .await;
    assert_eq!(payload.status, ResultStatus::Error);
    assert_eq!(payload.message, "未知错误: 自动化任务意外终止");

    let payload = channel
        .submit(request("ops", writeup("24/11", "Alice", "Hello")))
        .await;
    assert_eq!(payload.status, ResultStatus::Error);
    assert_eq!(payload.message, "未知错误: 请求通道已关闭");

    channel.shutdown().await;
}
