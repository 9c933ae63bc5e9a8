use crate::error::ReminderError;
use crate::shared::usecase::UseCase;
use daymark_reminders_domain::{
    RecurrenceRule, ReminderInstance, ReminderTemplate, ScheduleTime,
};
use daymark_reminders_infra::{Notification, ReminderContext};

/// Turns one effectively enabled `ReminderTemplate` into a live
/// `ReminderInstance`: computes its occurrences from the current clock
/// and registers one job per occurrence in the schedule registry.
#[derive(Debug)]
pub struct ActivateTemplateUseCase {
    pub template: ReminderTemplate,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    TemplateDisabled,
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::TemplateDisabled => {
                Self::BadClientData("Cannot activate a disabled reminder template".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ActivateTemplateUseCase {
    type Response = ReminderInstance;

    type Error = UseCaseError;

    const NAME: &'static str = "ActivateTemplate";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        if !self.template.enabled {
            return Err(UseCaseError::TemplateDisabled);
        }

        let base = ctx.sys.get_utc_datetime();
        let schedules = {
            let mut rng = ctx.rng.lock().unwrap();
            self.template.calculate_reminder_schedules(base, &mut *rng)
        };

        // An empty occurrence list means there is nothing to schedule,
        // which is a success
        let instance = ReminderInstance::for_template(&self.template, schedules);
        register_instance_jobs(&instance, &self.template, ctx);
        Ok(instance)
    }
}

/// Registers one job per computed occurrence. Every occurrence of an
/// instance registers under the instance's own id, so for a multi
/// occurrence schedule each registration replaces the previous one and
/// only the last registered occurrence stays live.
fn register_instance_jobs(
    instance: &ReminderInstance,
    template: &ReminderTemplate,
    ctx: &ReminderContext,
) {
    if !instance.can_register() {
        return;
    }
    for schedule in &instance.schedules {
        let payload = Notification {
            uuid: instance.id.clone(),
            title: template.name.clone(),
            body: schedule
                .description
                .clone()
                .unwrap_or_else(|| schedule.name.clone()),
            importance: template.importance,
        };
        match &schedule.time {
            // Concrete instants register as a pinned one-shot cron
            // expression, recurrence rules go through directly
            ScheduleTime::At(at) => {
                let expression = RecurrenceRule::pinned_at(at).to_cron_expression();
                ctx.schedules.create_by_cron(&expression, payload);
            }
            ScheduleTime::Rule(rule) => ctx.schedules.create_by_rule(rule, payload),
        }
    }
}
