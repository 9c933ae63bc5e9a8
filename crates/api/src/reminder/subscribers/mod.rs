use super::{
    set_group_enable_mode::SetGroupEnableModeUseCase, set_group_enabled::SetGroupEnabledUseCase,
    sync_group_reminders::SyncGroupRemindersUseCase,
};
use crate::shared::usecase::{execute, Subscriber};
use daymark_reminders_domain::ReminderTemplateGroup;

pub struct SyncRemindersOnGroupChanged;

#[async_trait::async_trait(?Send)]
impl Subscriber<SetGroupEnabledUseCase> for SyncRemindersOnGroupChanged {
    async fn notify(
        &self,
        e: &ReminderTemplateGroup,
        ctx: &daymark_reminders_infra::ReminderContext,
    ) {
        let sync_group_reminders = SyncGroupRemindersUseCase { group: e.clone() };

        // Sideeffect, ignore result
        let _ = execute(sync_group_reminders, ctx).await;
    }
}

#[async_trait::async_trait(?Send)]
impl Subscriber<SetGroupEnableModeUseCase> for SyncRemindersOnGroupChanged {
    async fn notify(
        &self,
        e: &ReminderTemplateGroup,
        ctx: &daymark_reminders_infra::ReminderContext,
    ) {
        let sync_group_reminders = SyncGroupRemindersUseCase { group: e.clone() };

        // Sideeffect, ignore result
        let _ = execute(sync_group_reminders, ctx).await;
    }
}
