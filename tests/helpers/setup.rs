use daymark_reminders_infra::{
    setup_fake_context, FakeInfra, InMemoryJobScheduler, InMemoryNotifier, ReminderContext,
};
use std::sync::Arc;

pub struct TestApp {
    pub ctx: ReminderContext,
    pub scheduler: Arc<InMemoryJobScheduler>,
    pub notifier: Arc<InMemoryNotifier>,
}

// Launch the daemon's context over in-memory fakes
pub fn spawn_app() -> TestApp {
    let FakeInfra {
        ctx,
        scheduler,
        notifier,
    } = setup_fake_context(42);
    TestApp {
        ctx,
        scheduler,
        notifier,
    }
}
