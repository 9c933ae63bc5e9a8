use daymark_reminders_domain::{
    EnableMode, ImportanceLevel, NotificationSettings, ReminderTemplate, ReminderTemplateGroup,
    TimeConfig, ID,
};
use serde::{Deserialize, Serialize};

/// Persisted shape of a `ReminderTemplate`. Deserializing into this typed
/// DTO is the only way persisted data enters the domain, unknown time
/// configuration types fail here instead of being probed at runtime.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderTemplateDTO {
    pub uuid: ID,
    pub group_uuid: ID,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub importance_level: ImportanceLevel,
    pub self_enabled: bool,
    pub enabled: bool,
    pub notification_settings: NotificationSettings,
    pub time_config: TimeConfig,
}

impl ReminderTemplateDTO {
    pub fn new(template: &ReminderTemplate) -> Self {
        Self {
            uuid: template.id.clone(),
            group_uuid: template.group_id.clone(),
            name: template.name.clone(),
            description: template.description.clone(),
            importance_level: template.importance,
            self_enabled: template.self_enabled,
            enabled: template.enabled,
            notification_settings: template.notification_settings.clone(),
            time_config: template.time_config.clone(),
        }
    }

    pub fn to_domain(self) -> ReminderTemplate {
        ReminderTemplate {
            id: self.uuid,
            group_id: self.group_uuid,
            name: self.name,
            description: self.description,
            importance: self.importance_level,
            self_enabled: self.self_enabled,
            enabled: self.enabled,
            notification_settings: self.notification_settings,
            time_config: self.time_config,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderTemplateGroupDTO {
    pub uuid: ID,
    pub name: String,
    pub enabled: bool,
    pub enable_mode: EnableMode,
    pub templates: Vec<ReminderTemplateDTO>,
}

impl ReminderTemplateGroupDTO {
    pub fn new(group: &ReminderTemplateGroup) -> Self {
        Self {
            uuid: group.id.clone(),
            name: group.name.clone(),
            enabled: group.enabled,
            enable_mode: group.enable_mode,
            templates: group.templates.iter().map(ReminderTemplateDTO::new).collect(),
        }
    }

    pub fn to_domain(self) -> ReminderTemplateGroup {
        ReminderTemplateGroup {
            id: self.uuid,
            name: self.name,
            enabled: self.enabled,
            enable_mode: self.enable_mode,
            templates: self.templates.into_iter().map(|t| t.to_domain()).collect(),
        }
    }
}
