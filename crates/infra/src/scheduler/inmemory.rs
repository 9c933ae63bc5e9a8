use super::{IJobScheduler, JobCallback, JobHandle};
use anyhow::anyhow;
use chrono::{DateTime, Utc};
use daymark_reminders_domain::RecurrenceRule;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

struct FakeJob {
    run: JobCallback,
    next: Mutex<Option<DateTime<Utc>>>,
    rule: Option<RecurrenceRule>,
    cancelled: AtomicBool,
}

struct FakeJobHandle {
    job: Arc<FakeJob>,
}

impl JobHandle for FakeJobHandle {
    fn cancel(&self) {
        self.job.cancelled.store(true, Ordering::SeqCst);
    }

    fn next_invocation(&self) -> Option<DateTime<Utc>> {
        if self.job.cancelled.load(Ordering::SeqCst) {
            return None;
        }
        *self.job.next.lock().unwrap()
    }
}

/// Scheduler fake used in tests. Registrations are validated with the
/// same domain parsing as the timer scheduler so that malformed input
/// fails identically, but nothing fires until a test calls `fire_all`.
pub struct InMemoryJobScheduler {
    jobs: Mutex<Vec<Arc<FakeJob>>>,
}

impl InMemoryJobScheduler {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
        }
    }

    fn register(&self, job: FakeJob) -> Box<dyn JobHandle> {
        let job = Arc::new(job);
        self.jobs.lock().unwrap().push(job.clone());
        Box::new(FakeJobHandle { job })
    }

    /// Runs every live job once, the way the real scheduler's timer loop
    /// would. Returns how many jobs fired.
    pub fn fire_all(&self) -> usize {
        let live: Vec<Arc<FakeJob>> = self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| !j.cancelled.load(Ordering::SeqCst))
            .cloned()
            .collect();
        for job in &live {
            (job.run)();
            let mut next = job.next.lock().unwrap();
            *next = match &job.rule {
                Some(rule) => rule.next_after(Utc::now()),
                None => None,
            };
        }
        live.len()
    }

    pub fn live_job_count(&self) -> usize {
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| !j.cancelled.load(Ordering::SeqCst))
            .count()
    }

    pub fn cancelled_job_count(&self) -> usize {
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.cancelled.load(Ordering::SeqCst))
            .count()
    }
}

impl Default for InMemoryJobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl IJobScheduler for InMemoryJobScheduler {
    fn schedule_at(
        &self,
        date: DateTime<Utc>,
        job: JobCallback,
    ) -> anyhow::Result<Box<dyn JobHandle>> {
        if date <= Utc::now() {
            return Err(anyhow!(
                "Cannot schedule a job at {} which is in the past",
                date
            ));
        }
        Ok(self.register(FakeJob {
            run: job,
            next: Mutex::new(Some(date)),
            rule: None,
            cancelled: AtomicBool::new(false),
        }))
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
        Ok(self.register(FakeJob {
            run: job,
            next: Mutex::new(rule.next_after(Utc::now())),
            rule: Some(rule.clone()),
            cancelled: AtomicBool::new(false),
        }))
    }
}
