use crate::{
    reminder_template::{EnableMode, ReminderTemplate},
    shared::entity::{Entity, ID},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvalidReminderGroupError {
    #[error("Reminder group name cannot be blank")]
    BlankName,
}

/// Aggregate owning a set of `ReminderTemplate`s together with the
/// cascading enable policy. A template belongs to exactly one group.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderTemplateGroup {
    pub id: ID,
    pub name: String,
    pub enabled: bool,
    pub enable_mode: EnableMode,
    pub templates: Vec<ReminderTemplate>,
}

impl ReminderTemplateGroup {
    pub fn new(name: &str) -> Result<Self, InvalidReminderGroupError> {
        if name.trim().is_empty() {
            return Err(InvalidReminderGroupError::BlankName);
        }
        Ok(Self {
            id: Default::default(),
            name: name.to_string(),
            enabled: true,
            enable_mode: EnableMode::Group,
            templates: Vec::new(),
        })
    }

    /// Inserts an owned template and immediately computes its effective
    /// enablement. Inserting a template whose id is already present is a
    /// no-op, reported by the `false` return value.
    pub fn add_template(&mut self, mut template: ReminderTemplate) -> bool {
        if self.templates.iter().any(|t| t.id == template.id) {
            return false;
        }
        template.group_id = self.id.clone();
        template.calculate_and_set_enabled(self.enabled, self.enable_mode);
        self.templates.push(template);
        true
    }

    pub fn remove_template(&mut self, template_id: &ID) -> Option<ReminderTemplate> {
        let index = self.templates.iter().position(|t| &t.id == template_id)?;
        Some(self.templates.remove(index))
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.recalculate_template_enablement();
    }

    /// Switching modes only changes the effective projections, each
    /// template's own `self_enabled` preference is left untouched so that
    /// switching back restores prior per-template choices.
    pub fn set_enable_mode(&mut self, mode: EnableMode) {
        self.enable_mode = mode;
        self.recalculate_template_enablement();
    }

    fn recalculate_template_enablement(&mut self) {
        for template in &mut self.templates {
            template.calculate_and_set_enabled(self.enabled, self.enable_mode);
        }
    }

    /// Templates that are effectively enabled under the current group
    /// state. Re-evaluates the enablement rule rather than trusting the
    /// cached flags, so it never returns stale reads.
    pub fn enabled_templates(&self) -> Vec<&ReminderTemplate> {
        self.templates
            .iter()
            .filter(|t| t.effective_enabled(self.enabled, self.enable_mode))
            .collect()
    }

    /// Whether any owned template has its cached `enabled` flag set.
    /// An empty group has no enabled templates regardless of its own flag.
    pub fn has_enabled_template(&self) -> bool {
        self.templates.iter().any(|t| t.enabled)
    }
}

impl Entity for ReminderTemplateGroup {
    fn id(&self) -> &ID {
        &self.id
    }
}
