use crate::{
    notifier::{INotifier, Notification},
    scheduler::{IJobScheduler, JobCallback, JobHandle},
};
use chrono::{DateTime, Utc};
use daymark_reminders_domain::{RecurrenceRule, ID};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleInfo {
    pub exists: bool,
    pub next_invocation: Option<DateTime<Utc>>,
}

/// The one authoritative view of all live reminder jobs, owned by the
/// composition root and shared through the context.
///
/// Invariant: at most one live job per key. Creating a job under an
/// existing key cancels the old job before registering the new one. The
/// registry is guarded by a mutex because the backing scheduler may run
/// callbacks on other threads.
pub struct ReminderScheduleService {
    scheduler: Arc<dyn IJobScheduler>,
    notifier: Arc<dyn INotifier>,
    jobs: Mutex<HashMap<ID, Box<dyn JobHandle>>>,
}

impl ReminderScheduleService {
    pub fn new(scheduler: Arc<dyn IJobScheduler>, notifier: Arc<dyn INotifier>) -> Self {
        Self {
            scheduler,
            notifier,
            jobs: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a one-shot job at `date` under `payload.uuid`
    pub fn create_by_date(&self, date: DateTime<Utc>, payload: Notification) {
        self.replace(payload, |job| self.scheduler.schedule_at(date, job));
    }

    /// Registers a recurring job matching `cron_expression` under
    /// `payload.uuid`
    pub fn create_by_cron(&self, cron_expression: &str, payload: Notification) {
        self.replace(payload, |job| {
            self.scheduler.schedule_by_cron(cron_expression, job)
        });
    }

    /// Registers a recurring job from a structured rule under
    /// `payload.uuid`
    pub fn create_by_rule(&self, rule: &RecurrenceRule, payload: Notification) {
        self.replace(payload, |job| self.scheduler.schedule_by_rule(rule, job));
    }

    /// Replace semantics: any job already registered under the key is
    /// cancelled first. When the new registration fails it is logged and
    /// the key is left without an entry, the old job is already gone.
    fn replace<F>(&self, payload: Notification, register: F)
    where
        F: FnOnce(JobCallback) -> anyhow::Result<Box<dyn JobHandle>>,
    {
        let mut jobs = self.jobs.lock().unwrap();
        if let Some(old) = jobs.remove(&payload.uuid) {
            old.cancel();
        }

        let key = payload.uuid.clone();
        let notifier = self.notifier.clone();
        let job: JobCallback = Arc::new(move || notifier.show_notification(payload.clone()));
        match register(job) {
            Ok(handle) => {
                jobs.insert(key, handle);
            }
            Err(e) => {
                warn!("Failed to register reminder job {}: {:?}", key, e);
            }
        }
    }

    /// Cancels and removes the entry under `uuid`. Idempotent, cancelling
    /// an unknown key is a no-op.
    pub fn cancel(&self, uuid: &ID) {
        if let Some(job) = self.jobs.lock().unwrap().remove(uuid) {
            job.cancel();
        }
    }

    /// Snapshot of all currently registered keys
    pub fn schedule_ids(&self) -> Vec<ID> {
        self.jobs.lock().unwrap().keys().cloned().collect()
    }

    pub fn schedule_info(&self, uuid: &ID) -> ScheduleInfo {
        match self.jobs.lock().unwrap().get(uuid) {
            Some(job) => ScheduleInfo {
                exists: true,
                next_invocation: job.next_invocation(),
            },
            None => ScheduleInfo {
                exists: false,
                next_invocation: None,
            },
        }
    }
}
