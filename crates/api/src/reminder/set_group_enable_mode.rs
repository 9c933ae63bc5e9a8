use super::subscribers::SyncRemindersOnGroupChanged;
use crate::error::ReminderError;
use crate::shared::usecase::{Subscriber, UseCase};
use daymark_reminders_domain::{EnableMode, ReminderTemplateGroup};
use daymark_reminders_infra::ReminderContext;

/// Switches the group's enable policy and recomputes the cached
/// enablement of every owned template. Per-template preferences are
/// never erased by a mode switch. Live jobs are re-synchronized by a
/// subscriber.
#[derive(Debug)]
pub struct SetGroupEnableModeUseCase {
    pub group: ReminderTemplateGroup,
    pub mode: EnableMode,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetGroupEnableModeUseCase {
    type Response = ReminderTemplateGroup;

    type Error = UseCaseError;

    const NAME: &'static str = "SetGroupEnableMode";

    async fn execute(&mut self, _ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        self.group.set_enable_mode(self.mode);
        Ok(self.group.clone())
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncRemindersOnGroupChanged)]
    }
}
