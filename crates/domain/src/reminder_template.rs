use crate::{
    shared::entity::{Entity, ID},
    time_config::{ReminderSchedule, TimeConfig},
};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordinal severity of a reminder, carried into the notification payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ImportanceLevel {
    Low,
    Normal,
    Important,
    Critical,
}

impl Default for ImportanceLevel {
    fn default() -> Self {
        Self::Normal
    }
}

/// Delivery channels for one reminder, each independently toggleable
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationSettings {
    pub sound: bool,
    pub vibration: bool,
    pub popup: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            sound: true,
            vibration: false,
            popup: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum InvalidReminderTemplateError {
    #[error("Reminder template name cannot be blank")]
    BlankName,
}

/// One reminder's notification configuration, its own enable preference
/// and its time configuration.
///
/// `enabled` is a cached projection of the owning group's state combined
/// with `self_enabled`, never an independent source of truth. The group
/// recomputes it through `calculate_and_set_enabled` whenever any input
/// to the projection changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderTemplate {
    pub id: ID,
    pub group_id: ID,
    pub name: String,
    pub description: Option<String>,
    pub importance: ImportanceLevel,
    pub self_enabled: bool,
    pub enabled: bool,
    pub notification_settings: NotificationSettings,
    pub time_config: TimeConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnableMode {
    /// Every template in the group follows the group's flag
    Group,
    /// Each template also consults its own preference, gated by the
    /// group still being enabled
    Individual,
}

impl ReminderTemplate {
    pub fn new(
        group_id: ID,
        name: &str,
        time_config: TimeConfig,
    ) -> Result<Self, InvalidReminderTemplateError> {
        if name.trim().is_empty() {
            return Err(InvalidReminderTemplateError::BlankName);
        }
        Ok(Self {
            id: Default::default(),
            group_id,
            name: name.to_string(),
            description: None,
            importance: Default::default(),
            self_enabled: true,
            enabled: false,
            notification_settings: Default::default(),
            time_config,
        })
    }

    /// The two branch enablement rule, without touching the cache
    pub fn effective_enabled(&self, group_enabled: bool, mode: EnableMode) -> bool {
        match mode {
            EnableMode::Group => group_enabled,
            EnableMode::Individual => group_enabled && self.self_enabled,
        }
    }

    /// Recomputes and stores the cached `enabled` projection
    pub fn calculate_and_set_enabled(&mut self, group_enabled: bool, mode: EnableMode) -> bool {
        self.enabled = self.effective_enabled(group_enabled, mode);
        self.enabled
    }

    pub fn calculate_reminder_schedules<R: Rng>(
        &self,
        base: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<ReminderSchedule> {
        self.time_config.calculate_schedules(base, rng)
    }
}

impl Entity for ReminderTemplate {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::time_config::RelativeTimeConfig;
    use crate::TimeDuration;

    fn template(self_enabled: bool) -> ReminderTemplate {
        let mut template = ReminderTemplate::new(
            Default::default(),
            "Drink water",
            TimeConfig::Relative(RelativeTimeConfig {
                name: "Water".into(),
                description: None,
                duration: TimeDuration::Fixed(0),
                times: Vec::new(),
            }),
        )
        .unwrap();
        template.self_enabled = self_enabled;
        template
    }

    #[test]
    fn rejects_blank_name() {
        let res = ReminderTemplate::new(
            Default::default(),
            "  ",
            TimeConfig::Relative(RelativeTimeConfig {
                name: "Water".into(),
                description: None,
                duration: TimeDuration::Fixed(0),
                times: Vec::new(),
            }),
        );
        assert!(res.is_err());
    }

    #[test]
    fn enablement_truth_table() {
        for group_enabled in [true, false] {
            for self_enabled in [true, false] {
                let mut t = template(self_enabled);

                t.calculate_and_set_enabled(group_enabled, EnableMode::Group);
                assert_eq!(t.enabled, group_enabled);

                t.calculate_and_set_enabled(group_enabled, EnableMode::Individual);
                assert_eq!(t.enabled, group_enabled && self_enabled);
            }
        }
    }

    #[test]
    fn recompute_does_not_touch_self_enabled() {
        let mut t = template(false);
        t.calculate_and_set_enabled(true, EnableMode::Group);
        assert!(t.enabled);
        assert!(!t.self_enabled);
    }
}
