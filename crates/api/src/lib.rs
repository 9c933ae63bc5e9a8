mod error;
mod reminder;
mod shared;

pub use error::ReminderError;
pub use reminder::{
    ActivateTemplateUseCase, AddTemplateUseCase, CancelReminderUseCase, SetGroupEnableModeUseCase,
    SetGroupEnabledUseCase, SyncGroupRemindersUseCase,
};
pub use shared::usecase::{execute, Subscriber, UseCase};
