use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::PrayerType;
use crate::schedule::clock::ClockTime;

pub const MAX_DAY: u8 = 31;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("day {0} is outside 1-{MAX_DAY}")]
    DayOutOfBounds(u8),
    #[error("start day {start} is after end day {end}")]
    InvertedRange { start: u8, end: u8 },
    #[error("{prayer} has no rule at index {index}")]
    NoSuchRule { prayer: PrayerType, index: usize },
}

/// One configured Iqamah rule over a span of days of the month.
///
/// A `Fixed` rule pins the congregation to a literal clock time for every day
/// in the span; a `Variable` rule floats it a number of minutes after that
/// day's calculated prayer time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IqamahRule {
    Fixed {
        start_day: u8,
        end_day: u8,
        time: ClockTime,
    },
    Variable {
        start_day: u8,
        end_day: u8,
        offset_minutes: u32,
    },
}

impl IqamahRule {
    pub fn start_day(&self) -> u8 {
        match self {
            IqamahRule::Fixed { start_day, .. } | IqamahRule::Variable { start_day, .. } => {
                *start_day
            }
        }
    }

    pub fn end_day(&self) -> u8 {
        match self {
            IqamahRule::Fixed { end_day, .. } | IqamahRule::Variable { end_day, .. } => *end_day,
        }
    }

    pub fn covers(&self, day: u8) -> bool {
        self.start_day() <= day && day <= self.end_day()
    }

    fn validate(&self) -> Result<(), ScheduleError> {
        let (start, end) = (self.start_day(), self.end_day());
        for day in [start, end] {
            if !(1..=MAX_DAY).contains(&day) {
                return Err(ScheduleError::DayOutOfBounds(day));
            }
        }
        if start > end {
            return Err(ScheduleError::InvertedRange { start, end });
        }
        Ok(())
    }
}

/// Partial update applied to an existing rule by `update_rule`.
///
/// Setting `kind` switches the rule's variant (or refreshes its payload); the
/// field belonging to the previous variant is dropped with it, never carried
/// along as stale data.
#[derive(Debug, Clone, Default)]
pub struct RulePatch {
    pub start_day: Option<u8>,
    pub end_day: Option<u8>,
    pub kind: Option<RuleKind>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    Fixed(ClockTime),
    Variable(u32),
}

/// The per-prayer Iqamah rule lists, as edited by the user and read by the
/// resolution engine.
///
/// Rule order within a prayer is user-controlled and significant: when spans
/// overlap, the earliest rule in the list wins for a given day. An override
/// placed after a broad default never takes effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IqamahSchedule {
    #[serde(default)]
    pub fajr: Vec<IqamahRule>,
    #[serde(default)]
    pub zuhr: Vec<IqamahRule>,
    #[serde(default)]
    pub asr: Vec<IqamahRule>,
    #[serde(default)]
    pub maghrib: Vec<IqamahRule>,
    #[serde(default)]
    pub isha: Vec<IqamahRule>,
}

impl IqamahSchedule {
    pub fn rules(&self, prayer: PrayerType) -> &[IqamahRule] {
        match prayer {
            PrayerType::Fajr => &self.fajr,
            PrayerType::Zuhr => &self.zuhr,
            PrayerType::Asr => &self.asr,
            PrayerType::Maghrib => &self.maghrib,
            PrayerType::Isha => &self.isha,
        }
    }

    fn rules_mut(&mut self, prayer: PrayerType) -> &mut Vec<IqamahRule> {
        match prayer {
            PrayerType::Fajr => &mut self.fajr,
            PrayerType::Zuhr => &mut self.zuhr,
            PrayerType::Asr => &mut self.asr,
            PrayerType::Maghrib => &mut self.maghrib,
            PrayerType::Isha => &mut self.isha,
        }
    }

    /// True if any prayer has at least one rule configured.
    pub fn has_any_rules(&self) -> bool {
        PrayerType::all().iter().any(|p| !self.rules(*p).is_empty())
    }

    /// Appends a rule, preserving insertion order.
    pub fn add_rule(&mut self, prayer: PrayerType, rule: IqamahRule) -> Result<(), ScheduleError> {
        rule.validate()?;
        self.rules_mut(prayer).push(rule);
        Ok(())
    }

    /// Merges `patch` into the rule at `index`. The candidate is validated
    /// before anything is stored, so a rejected update leaves the existing
    /// rule exactly as it was.
    pub fn update_rule(
        &mut self,
        prayer: PrayerType,
        index: usize,
        patch: RulePatch,
    ) -> Result<&IqamahRule, ScheduleError> {
        let rules = self.rules_mut(prayer);
        let current = rules
            .get(index)
            .ok_or(ScheduleError::NoSuchRule { prayer, index })?;

        let start_day = patch.start_day.unwrap_or(current.start_day());
        let end_day = patch.end_day.unwrap_or(current.end_day());
        let candidate = match patch.kind {
            Some(RuleKind::Fixed(time)) => IqamahRule::Fixed {
                start_day,
                end_day,
                time,
            },
            Some(RuleKind::Variable(offset_minutes)) => IqamahRule::Variable {
                start_day,
                end_day,
                offset_minutes,
            },
            None => match *current {
                IqamahRule::Fixed { time, .. } => IqamahRule::Fixed {
                    start_day,
                    end_day,
                    time,
                },
                IqamahRule::Variable { offset_minutes, .. } => IqamahRule::Variable {
                    start_day,
                    end_day,
                    offset_minutes,
                },
            },
        };
        candidate.validate()?;

        rules[index] = candidate;
        Ok(&rules[index])
    }

    /// Removes a rule. A prayer left with no rules simply has no Iqamah
    /// configured; that is a normal state, not an error.
    pub fn remove_rule(
        &mut self,
        prayer: PrayerType,
        index: usize,
    ) -> Result<IqamahRule, ScheduleError> {
        let rules = self.rules_mut(prayer);
        if index >= rules.len() {
            return Err(ScheduleError::NoSuchRule { prayer, index });
        }
        Ok(rules.remove(index))
    }

    pub fn clear(&mut self, prayer: PrayerType) {
        self.rules_mut(prayer).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(start: u8, end: u8, time: &str) -> IqamahRule {
        IqamahRule::Fixed {
            start_day: start,
            end_day: end,
            time: time.parse().unwrap(),
        }
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut schedule = IqamahSchedule::default();
        schedule.add_rule(PrayerType::Fajr, fixed(1, 31, "6:00 am")).unwrap();
        schedule.add_rule(PrayerType::Fajr, fixed(10, 20, "6:30 am")).unwrap();
        assert_eq!(schedule.rules(PrayerType::Fajr).len(), 2);
        assert_eq!(schedule.rules(PrayerType::Fajr)[0], fixed(1, 31, "6:00 am"));
        assert!(schedule.has_any_rules());
    }

    #[test]
    fn add_rejects_invalid_bounds() {
        let mut schedule = IqamahSchedule::default();
        assert_eq!(
            schedule.add_rule(PrayerType::Asr, fixed(0, 5, "5:00 pm")),
            Err(ScheduleError::DayOutOfBounds(0))
        );
        assert_eq!(
            schedule.add_rule(PrayerType::Asr, fixed(1, 32, "5:00 pm")),
            Err(ScheduleError::DayOutOfBounds(32))
        );
        assert_eq!(
            schedule.add_rule(PrayerType::Asr, fixed(9, 3, "5:00 pm")),
            Err(ScheduleError::InvertedRange { start: 9, end: 3 })
        );
        assert!(schedule.rules(PrayerType::Asr).is_empty());
    }

    #[test]
    fn update_merges_fields() {
        let mut schedule = IqamahSchedule::default();
        schedule.add_rule(PrayerType::Zuhr, fixed(1, 15, "1:30 pm")).unwrap();
        let patch = RulePatch {
            end_day: Some(20),
            ..Default::default()
        };
        schedule.update_rule(PrayerType::Zuhr, 0, patch).unwrap();
        assert_eq!(schedule.rules(PrayerType::Zuhr)[0], fixed(1, 20, "1:30 pm"));
    }

    #[test]
    fn rejected_update_leaves_rule_unchanged() {
        let mut schedule = IqamahSchedule::default();
        schedule.add_rule(PrayerType::Zuhr, fixed(1, 15, "1:30 pm")).unwrap();
        let patch = RulePatch {
            start_day: Some(20),
            end_day: Some(5),
            ..Default::default()
        };
        let err = schedule.update_rule(PrayerType::Zuhr, 0, patch).unwrap_err();
        assert_eq!(err, ScheduleError::InvertedRange { start: 20, end: 5 });
        assert_eq!(schedule.rules(PrayerType::Zuhr)[0], fixed(1, 15, "1:30 pm"));
    }

    #[test]
    fn switching_variant_discards_old_payload() {
        let mut schedule = IqamahSchedule::default();
        schedule.add_rule(PrayerType::Isha, fixed(1, 31, "9:00 pm")).unwrap();
        let patch = RulePatch {
            kind: Some(RuleKind::Variable(10)),
            ..Default::default()
        };
        schedule.update_rule(PrayerType::Isha, 0, patch).unwrap();
        assert_eq!(
            schedule.rules(PrayerType::Isha)[0],
            IqamahRule::Variable {
                start_day: 1,
                end_day: 31,
                offset_minutes: 10
            }
        );
    }

    #[test]
    fn remove_to_empty_is_normal() {
        let mut schedule = IqamahSchedule::default();
        schedule.add_rule(PrayerType::Maghrib, fixed(1, 31, "8:00 pm")).unwrap();
        schedule.remove_rule(PrayerType::Maghrib, 0).unwrap();
        assert!(schedule.rules(PrayerType::Maghrib).is_empty());
        assert!(!schedule.has_any_rules());
        assert_eq!(
            schedule.remove_rule(PrayerType::Maghrib, 0),
            Err(ScheduleError::NoSuchRule {
                prayer: PrayerType::Maghrib,
                index: 0
            })
        );
    }

    #[test]
    fn schedule_round_trips_through_toml() {
        let mut schedule = IqamahSchedule::default();
        schedule.add_rule(PrayerType::Fajr, fixed(1, 15, "6:15 am")).unwrap();
        schedule
            .add_rule(
                PrayerType::Isha,
                IqamahRule::Variable {
                    start_day: 1,
                    end_day: 31,
                    offset_minutes: 10,
                },
            )
            .unwrap();

        let text = toml::to_string(&schedule).unwrap();
        let back: IqamahSchedule = toml::from_str(&text).unwrap();
        assert_eq!(back, schedule);
    }
}
