use super::activate_template::ActivateTemplateUseCase;
use crate::error::ReminderError;
use crate::shared::usecase::{execute, UseCase};
use daymark_reminders_domain::{ReminderInstance, ReminderTemplateGroup};
use daymark_reminders_infra::ReminderContext;

/// Synchronizes the live jobs of a group with its current enablement
/// state: every effectively enabled template is activated and the
/// registry entries of the rest are cancelled.
#[derive(Debug)]
pub struct SyncGroupRemindersUseCase {
    pub group: ReminderTemplateGroup,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncGroupRemindersUseCase {
    type Response = Vec<ReminderInstance>;

    type Error = UseCaseError;

    const NAME: &'static str = "SyncGroupReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let mut activated = Vec::new();
        for template in &self.group.templates {
            if template.effective_enabled(self.group.enabled, self.group.enable_mode) {
                let mut template = template.clone();
                template.calculate_and_set_enabled(self.group.enabled, self.group.enable_mode);
                if let Ok(instance) = execute(ActivateTemplateUseCase { template }, ctx).await {
                    activated.push(instance);
                }
            } else {
                // Activation jobs register under the template derived
                // instance id
                ctx.schedules.cancel(&template.id);
            }
        }
        Ok(activated)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use daymark_reminders_domain::{
        EnableMode, RelativeTimeConfig, RelativeTimeSchedule, ReminderTemplate, TimeConfig,
        TimeDuration,
    };
    use daymark_reminders_infra::{setup_fake_context, FakeInfra};

    fn template(name: &str, self_enabled: bool) -> ReminderTemplate {
        let mut template = ReminderTemplate::new(
            Default::default(),
            name,
            TimeConfig::Relative(RelativeTimeConfig {
                name: name.into(),
                description: None,
                duration: TimeDuration::Fixed(0),
                times: vec![RelativeTimeSchedule {
                    name: name.into(),
                    description: None,
                    duration: TimeDuration::Fixed(60),
                    times: Vec::new(),
                }],
            }),
        )
        .unwrap();
        template.self_enabled = self_enabled;
        template
    }

    fn group() -> ReminderTemplateGroup {
        let mut group = ReminderTemplateGroup::new("Health").unwrap();
        group.set_enable_mode(EnableMode::Individual);
        group.add_template(template("Drink water", true));
        group.add_template(template("Stretch", false));
        group
    }

    #[tokio::test]
    async fn activates_enabled_templates_only() {
        let FakeInfra { ctx, .. } = setup_fake_context(1);
        let group = group();
        let enabled_id = group.templates[0].id.clone();

        let mut usecase = SyncGroupRemindersUseCase { group };
        let activated = usecase.execute(&ctx).await.unwrap();

        assert_eq!(activated.len(), 1);
        assert_eq!(activated[0].template_id, enabled_id);
        assert_eq!(ctx.schedules.schedule_ids(), vec![enabled_id]);
    }

    #[tokio::test]
    async fn cancels_jobs_of_templates_that_lost_enablement() {
        let FakeInfra { ctx, .. } = setup_fake_context(1);
        let mut group = group();

        let mut usecase = SyncGroupRemindersUseCase {
            group: group.clone(),
        };
        usecase.execute(&ctx).await.unwrap();
        assert_eq!(ctx.schedules.schedule_ids().len(), 1);

        group.set_enabled(false);
        let mut usecase = SyncGroupRemindersUseCase { group };
        let activated = usecase.execute(&ctx).await.unwrap();

        assert!(activated.is_empty());
        assert!(ctx.schedules.schedule_ids().is_empty());
    }

    #[tokio::test]
    async fn empty_group_schedules_nothing() {
        let FakeInfra { ctx, .. } = setup_fake_context(1);
        let group = ReminderTemplateGroup::new("Empty").unwrap();

        let mut usecase = SyncGroupRemindersUseCase { group };
        let activated = usecase.execute(&ctx).await.unwrap();

        assert!(activated.is_empty());
        assert!(ctx.schedules.schedule_ids().is_empty());
    }
}
