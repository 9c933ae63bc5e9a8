use crate::error::ReminderError;
use crate::shared::usecase::UseCase;
use daymark_reminders_domain::{ReminderInstance, ID};
use daymark_reminders_infra::ReminderContext;

/// Cancels the live job under one registry key. Cancelling an unknown
/// key is a no-op. When the activation instance is supplied it is moved
/// to its cancelled state so no further jobs can be registered for it.
#[derive(Debug)]
pub struct CancelReminderUseCase {
    pub reminder_id: ID,
    pub instance: Option<ReminderInstance>,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CancelReminderUseCase {
    type Response = Option<ReminderInstance>;

    type Error = UseCaseError;

    const NAME: &'static str = "CancelReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        ctx.schedules.cancel(&self.reminder_id);
        Ok(self.instance.take().map(|mut instance| {
            instance.cancel();
            instance
        }))
    }
}
