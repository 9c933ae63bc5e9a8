use crate::recurrence::RecurrenceRule;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of seconds an occurrence is offset from its base instant.
/// A range resolves to a fresh uniform draw on every calculation, which
/// makes relative schedules intentionally jittered between runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TimeDuration {
    Fixed(i64),
    Range { min: i64, max: i64 },
}

impl TimeDuration {
    /// Resolves to a concrete second count. Range bounds are inclusive on
    /// both ends.
    pub fn resolve<R: Rng>(&self, rng: &mut R) -> i64 {
        match self {
            Self::Fixed(secs) => *secs,
            Self::Range { min, max } => {
                if min >= max {
                    // Collapsed or inverted range
                    *min
                } else {
                    rng.gen_range(*min..=*max)
                }
            }
        }
    }
}

/// One node in a relative time tree. Children are offset from their
/// parent's resolved instant, not from the original base.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelativeTimeSchedule {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub duration: TimeDuration,
    #[serde(default)]
    pub times: Vec<RelativeTimeSchedule>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AbsoluteTimeConfig {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schedule: RecurrenceRule,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelativeTimeConfig {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub duration: TimeDuration,
    #[serde(default)]
    pub times: Vec<RelativeTimeSchedule>,
}

/// How a `ReminderTemplate` decides when to fire: a recurring absolute
/// rule, or a tree of offsets relative to the activation instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimeConfig {
    Absolute(AbsoluteTimeConfig),
    Relative(RelativeTimeConfig),
}

/// A flattened, named occurrence ready for job registration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSchedule {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub time: ScheduleTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ScheduleTime {
    At(DateTime<Utc>),
    Rule(RecurrenceRule),
}

impl TimeConfig {
    /// Expands this configuration into a flat list of occurrences.
    ///
    /// Absolute configurations yield exactly one occurrence carrying the
    /// recurrence rule unchanged, recurring rules are never expanded into
    /// concrete instants here. Relative configurations are walked depth
    /// first from `base`, so a parent occurrence always precedes its
    /// children in the result. A relative configuration without nodes
    /// yields an empty list, which is not an error.
    pub fn calculate_schedules<R: Rng>(
        &self,
        base: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<ReminderSchedule> {
        match self {
            Self::Absolute(config) => vec![ReminderSchedule {
                name: config.name.clone(),
                description: config.description.clone(),
                time: ScheduleTime::Rule(config.schedule.clone()),
            }],
            Self::Relative(config) => {
                let mut schedules = Vec::new();
                expand_relative(&config.times, base, None, rng, &mut schedules);
                schedules
            }
        }
    }
}

fn expand_relative<R: Rng>(
    nodes: &[RelativeTimeSchedule],
    current: DateTime<Utc>,
    parent_name: Option<&str>,
    rng: &mut R,
    schedules: &mut Vec<ReminderSchedule>,
) {
    for node in nodes {
        let next = current + Duration::seconds(node.duration.resolve(rng));
        let name = match parent_name {
            Some(parent) => format!("{} - {}", parent, node.name),
            None => node.name.clone(),
        };
        schedules.push(ReminderSchedule {
            name,
            description: node.description.clone(),
            time: ScheduleTime::At(next),
        });
        expand_relative(&node.times, next, Some(&node.name), rng, schedules);
    }
}
