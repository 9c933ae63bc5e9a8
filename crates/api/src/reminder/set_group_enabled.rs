use super::subscribers::SyncRemindersOnGroupChanged;
use crate::error::ReminderError;
use crate::shared::usecase::{Subscriber, UseCase};
use daymark_reminders_domain::ReminderTemplateGroup;
use daymark_reminders_infra::ReminderContext;

/// Sets the group flag and recomputes the cached enablement of every
/// owned template. Live jobs are re-synchronized by a subscriber.
#[derive(Debug)]
pub struct SetGroupEnabledUseCase {
    pub group: ReminderTemplateGroup,
    pub enabled: bool,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetGroupEnabledUseCase {
    type Response = ReminderTemplateGroup;

    type Error = UseCaseError;

    const NAME: &'static str = "SetGroupEnabled";

    async fn execute(&mut self, _ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        self.group.set_enabled(self.enabled);
        Ok(self.group.clone())
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncRemindersOnGroupChanged)]
    }
}
