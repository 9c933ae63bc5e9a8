mod activate_template;
mod add_template;
mod cancel_reminder;
mod set_group_enable_mode;
mod set_group_enabled;
mod subscribers;
mod sync_group_reminders;

pub use activate_template::ActivateTemplateUseCase;
pub use add_template::AddTemplateUseCase;
pub use cancel_reminder::CancelReminderUseCase;
pub use set_group_enable_mode::SetGroupEnableModeUseCase;
pub use set_group_enabled::SetGroupEnabledUseCase;
pub use sync_group_reminders::SyncGroupRemindersUseCase;
