mod inmemory;
mod timer;

use chrono::{DateTime, Utc};
use daymark_reminders_domain::RecurrenceRule;
pub use inmemory::InMemoryJobScheduler;
use std::sync::Arc;
pub use timer::TimerJobScheduler;

/// The action a job performs when its timer fires. Invoked by the
/// scheduler's own timer loop, asynchronously and unordered relative to
/// anything the registering caller does.
pub type JobCallback = Arc<dyn Fn() + Send + Sync>;

/// Opaque handle to one registered timer entry
pub trait JobHandle: Send + Sync {
    fn cancel(&self);
    fn next_invocation(&self) -> Option<DateTime<Utc>>;
}

/// The OS level timer collaborator. Registration is synchronous, the
/// actual firing happens later on the scheduler's own timer loop.
pub trait IJobScheduler: Send + Sync {
    /// Registers a one-shot job at `date`. Instants in the past are a
    /// registration error.
    fn schedule_at(&self, date: DateTime<Utc>, job: JobCallback)
        -> anyhow::Result<Box<dyn JobHandle>>;

    /// Registers a recurring job from a cron expression
    fn schedule_by_cron(
        &self,
        cron_expression: &str,
        job: JobCallback,
    ) -> anyhow::Result<Box<dyn JobHandle>>;

    /// Registers a recurring job from a structured recurrence rule
    fn schedule_by_rule(
        &self,
        rule: &RecurrenceRule,
        job: JobCallback,
    ) -> anyhow::Result<Box<dyn JobHandle>>;
}
