use crate::models::{AutomationOutcome, ResultPayload};

/// 把运行结果转换为返回给调用方的消息
pub fn report(outcome: AutomationOutcome) -> ResultPayload {
    match outcome {
        AutomationOutcome::Success => ResultPayload::success(),
        AutomationOutcome::Failure { message } => ResultPayload::error(message),
    }
}
