use super::{IJobScheduler, JobCallback, JobHandle};
use anyhow::anyhow;
use chrono::{DateTime, Utc};
use daymark_reminders_domain::RecurrenceRule;
use std::sync::{Arc, Mutex};
use tokio::time::sleep;

/// Scheduler backed by tokio timer tasks. Each registered job is one
/// spawned task that sleeps until its next fire instant and then runs the
/// callback. Cancelling aborts the task.
pub struct TimerJobScheduler {}

impl TimerJobScheduler {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for TimerJobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

struct TimerJobHandle {
    task: tokio::task::JoinHandle<()>,
    next: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl JobHandle for TimerJobHandle {
    fn cancel(&self) {
        self.task.abort();
    }

    fn next_invocation(&self) -> Option<DateTime<Utc>> {
        *self.next.lock().unwrap()
    }
}

impl IJobScheduler for TimerJobScheduler {
    fn schedule_at(
        &self,
        date: DateTime<Utc>,
        job: JobCallback,
    ) -> anyhow::Result<Box<dyn JobHandle>> {
        let delay = (date - Utc::now())
            .to_std()
            .map_err(|_| anyhow!("Cannot schedule a job at {} which is in the past", date))?;
        let next = Arc::new(Mutex::new(Some(date)));
        let slot = next.clone();
        let task = tokio::spawn(async move {
            sleep(delay).await;
            *slot.lock().unwrap() = None;
            job();
        });
        Ok(Box::new(TimerJobHandle { task, next }))
    }

    fn schedule_by_cron(
        &self,
        cron_expression: &str,
        job: JobCallback,
    ) -> anyhow::Result<Box<dyn JobHandle>> {
        let rule = cron_expression.parse::<RecurrenceRule>()?;
        self.schedule_by_rule(&rule, job)
    }

    fn schedule_by_rule(
        &self,
        rule: &RecurrenceRule,
        job: JobCallback,
    ) -> anyhow::Result<Box<dyn JobHandle>> {
        rule.validate()?;
        let rule = rule.clone();
        let next = Arc::new(Mutex::new(rule.next_after(Utc::now())));
        let slot = next.clone();
        let task = tokio::spawn(async move {
            loop {
                // A rule that can never fire again reports a null next
                // invocation and stops its timer loop
                let fire_at = match rule.next_after(Utc::now()) {
                    Some(fire_at) => fire_at,
                    None => {
                        *slot.lock().unwrap() = None;
                        break;
                    }
                };
                *slot.lock().unwrap() = Some(fire_at);
                if let Ok(delay) = (fire_at - Utc::now()).to_std() {
                    sleep(delay).await;
                }
                job();
            }
        });
        Ok(Box::new(TimerJobHandle { task, next }))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn rejects_dates_in_the_past() {
        let scheduler = TimerJobScheduler::new();
        let res = scheduler.schedule_at(Utc::now() - Duration::hours(1), Arc::new(|| {}));
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn rejects_malformed_cron_expressions() {
        let scheduler = TimerJobScheduler::new();
        assert!(scheduler
            .schedule_by_cron("every day at nine", Arc::new(|| {}))
            .is_err());
    }

    #[tokio::test]
    async fn one_shot_job_fires_and_clears_next_invocation() {
        let scheduler = TimerJobScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let count = fired.clone();

        let handle = scheduler
            .schedule_at(
                Utc::now() + Duration::milliseconds(20),
                Arc::new(move || {
                    count.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        assert!(handle.next_invocation().is_some());
        sleep(std::time::Duration::from_millis(100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(handle.next_invocation().is_none());
    }

    #[tokio::test]
    async fn cancelled_job_does_not_fire() {
        let scheduler = TimerJobScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let count = fired.clone();

        let handle = scheduler
            .schedule_at(
                Utc::now() + Duration::milliseconds(50),
                Arc::new(move || {
                    count.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();
        handle.cancel();

        sleep(std::time::Duration::from_millis(100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn recurring_job_reports_next_invocation() {
        let scheduler = TimerJobScheduler::new();
        let rule = RecurrenceRule::default();

        let handle = scheduler.schedule_by_rule(&rule, Arc::new(|| {})).unwrap();

        let next = handle.next_invocation().unwrap();
        assert!(next > Utc::now());
        assert!(next <= Utc::now() + Duration::seconds(61));
        handle.cancel();
    }
}
