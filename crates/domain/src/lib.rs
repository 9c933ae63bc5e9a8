mod recurrence;
mod reminder_group;
mod reminder_instance;
mod reminder_template;
mod shared;
mod time_config;

pub use recurrence::{InvalidRecurrenceError, RecurrenceRule};
pub use reminder_group::{InvalidReminderGroupError, ReminderTemplateGroup};
pub use reminder_instance::{InstanceStatus, ReminderInstance};
pub use reminder_template::{
    EnableMode, ImportanceLevel, InvalidReminderTemplateError, NotificationSettings,
    ReminderTemplate,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use time_config::{
    AbsoluteTimeConfig, RelativeTimeConfig, RelativeTimeSchedule, ReminderSchedule, ScheduleTime,
    TimeConfig, TimeDuration,
};
