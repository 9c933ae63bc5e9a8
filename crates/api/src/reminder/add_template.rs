use super::activate_template::ActivateTemplateUseCase;
use crate::error::ReminderError;
use crate::shared::usecase::{execute, UseCase};
use daymark_reminders_domain::{ReminderTemplate, ReminderTemplateGroup, ID};
use daymark_reminders_infra::ReminderContext;

/// Inserts a template into its group. The group immediately computes the
/// newcomer's effective enablement, and when that lands enabled the
/// template is activated right away.
#[derive(Debug)]
pub struct AddTemplateUseCase {
    pub group: ReminderTemplateGroup,
    pub template: ReminderTemplate,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    DuplicateTemplate(ID),
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::DuplicateTemplate(template_id) => Self::Conflict(format!(
                "A reminder template with id: {} already exists in the group",
                template_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for AddTemplateUseCase {
    type Response = ReminderTemplateGroup;

    type Error = UseCaseError;

    const NAME: &'static str = "AddTemplate";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let template_id = self.template.id.clone();
        if !self.group.add_template(self.template.clone()) {
            return Err(UseCaseError::DuplicateTemplate(template_id));
        }

        if let Some(inserted) = self.group.templates.last() {
            if inserted.enabled {
                let _ = execute(
                    ActivateTemplateUseCase {
                        template: inserted.clone(),
                    },
                    ctx,
                )
                .await;
            }
        }

        Ok(self.group.clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use daymark_reminders_domain::{
        EnableMode, RelativeTimeConfig, RelativeTimeSchedule, TimeConfig, TimeDuration,
    };
    use daymark_reminders_infra::{setup_fake_context, FakeInfra};

    fn template(self_enabled: bool) -> ReminderTemplate {
        let mut template = ReminderTemplate::new(
            Default::default(),
            "Drink water",
            TimeConfig::Relative(RelativeTimeConfig {
                name: "Water".into(),
                description: None,
                duration: TimeDuration::Fixed(0),
                times: vec![RelativeTimeSchedule {
                    name: "Water".into(),
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

    #[tokio::test]
    async fn rejects_duplicate_template() {
        let FakeInfra { ctx, .. } = setup_fake_context(1);
        let mut group = ReminderTemplateGroup::new("Health").unwrap();
        let template = template(true);
        group.add_template(template.clone());

        let mut usecase = AddTemplateUseCase { group, template };

        match usecase.execute(&ctx).await {
            Err(UseCaseError::DuplicateTemplate(_)) => (),
            res => panic!("Expected duplicate rejection, got {:?}", res),
        }
    }

    #[tokio::test]
    async fn enabled_newcomer_is_activated_immediately() {
        let FakeInfra { ctx, .. } = setup_fake_context(1);
        let group = ReminderTemplateGroup::new("Health").unwrap();
        let template = template(true);
        let template_id = template.id.clone();

        let mut usecase = AddTemplateUseCase { group, template };
        let group = usecase.execute(&ctx).await.unwrap();

        assert!(group.templates[0].enabled);
        assert_eq!(ctx.schedules.schedule_ids(), vec![template_id]);
    }

    #[tokio::test]
    async fn disabled_newcomer_is_not_activated() {
        let FakeInfra { ctx, .. } = setup_fake_context(1);
        let mut group = ReminderTemplateGroup::new("Health").unwrap();
        group.set_enable_mode(EnableMode::Individual);

        let mut usecase = AddTemplateUseCase {
            group,
            template: template(false),
        };
        let group = usecase.execute(&ctx).await.unwrap();

        assert!(!group.templates[0].enabled);
        assert!(ctx.schedules.schedule_ids().is_empty());
    }
}
