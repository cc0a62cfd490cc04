pub mod schedule_ctx;
pub mod schedule_flow;

pub use schedule_ctx::ScheduleCtx;
pub use schedule_flow::{FormInput, HeldSession, ScheduleFlow, SchedulerStep, StepTimeouts};
