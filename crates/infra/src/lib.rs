mod config;
mod notifier;
mod schedule_service;
mod scheduler;
mod system;

pub use config::Config;
pub use notifier::{INotifier, InMemoryNotifier, LogNotifier, Notification};
use rand::{rngs::StdRng, SeedableRng};
pub use schedule_service::{ReminderScheduleService, ScheduleInfo};
pub use scheduler::{
    IJobScheduler, InMemoryJobScheduler, JobCallback, JobHandle, TimerJobScheduler,
};
use std::sync::{Arc, Mutex};
pub use system::{FixedSys, ISys, RealSys};

#[derive(Clone)]
pub struct ReminderContext {
    /// The process wide job registry
    pub schedules: Arc<ReminderScheduleService>,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    /// Random source for relative schedule jitter. Entropy seeded in
    /// production, fixed seeded in tests for reproducible calculations.
    pub rng: Arc<Mutex<StdRng>>,
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> ReminderContext {
    let scheduler = Arc::new(TimerJobScheduler::new());
    let notifier = Arc::new(LogNotifier {});
    ReminderContext {
        schedules: Arc::new(ReminderScheduleService::new(scheduler, notifier)),
        config: Config::new(),
        sys: Arc::new(RealSys {}),
        rng: Arc::new(Mutex::new(StdRng::from_entropy())),
    }
}

/// Context over in-memory fakes, used in tests. The returned fakes stay
/// shared with the context so tests can fire jobs and inspect payloads.
pub struct FakeInfra {
    pub ctx: ReminderContext,
    pub scheduler: Arc<InMemoryJobScheduler>,
    pub notifier: Arc<InMemoryNotifier>,
}

pub fn setup_fake_context(seed: u64) -> FakeInfra {
    let scheduler = Arc::new(InMemoryJobScheduler::new());
    let notifier = Arc::new(InMemoryNotifier::new());
    let ctx = ReminderContext {
        schedules: Arc::new(ReminderScheduleService::new(
            scheduler.clone(),
            notifier.clone(),
        )),
        config: Config {
            reminders_file: "reminders.json".into(),
        },
        sys: Arc::new(RealSys {}),
        rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
    };
    FakeInfra {
        ctx,
        scheduler,
        notifier,
    }
}
