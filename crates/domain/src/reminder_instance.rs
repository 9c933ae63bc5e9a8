use crate::{
    reminder_template::ReminderTemplate,
    shared::entity::{Entity, ID},
    time_config::ReminderSchedule,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStatus {
    Pending,
    Triggered,
    Completed,
    Cancelled,
}

impl InstanceStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// One runtime activation of a `ReminderTemplate`: the occurrences that
/// were computed for it and the lifecycle of their live jobs.
///
/// Lifecycle: `Pending -> Triggered -> Completed | Cancelled`. The
/// transition to `Triggered` is driven by the external scheduler firing a
/// registered job. The terminal states refuse any further registration.
///
/// Every occurrence of an instance registers under the instance's own id,
/// so a later occurrence's job replaces an earlier one. The activation id
/// is derived from the template so that re-activating a template also
/// replaces its previous jobs.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderInstance {
    pub id: ID,
    pub template_id: ID,
    pub schedules: Vec<ReminderSchedule>,
    pub status: InstanceStatus,
}

impl ReminderInstance {
    pub fn for_template(template: &ReminderTemplate, schedules: Vec<ReminderSchedule>) -> Self {
        Self {
            id: template.id.clone(),
            template_id: template.id.clone(),
            schedules,
            status: InstanceStatus::Pending,
        }
    }

    /// Whether jobs may still be registered for this instance
    pub fn can_register(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Marks the instance as fired by the scheduler. Only a pending
    /// instance can be triggered.
    pub fn trigger(&mut self) -> bool {
        if self.status == InstanceStatus::Pending {
            self.status = InstanceStatus::Triggered;
            true
        } else {
            false
        }
    }

    pub fn complete(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = InstanceStatus::Completed;
        true
    }

    pub fn cancel(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = InstanceStatus::Cancelled;
        true
    }
}

impl Entity for ReminderInstance {
    fn id(&self) -> &ID {
        &self.id
    }
}
