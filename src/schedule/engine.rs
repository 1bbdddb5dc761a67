use serde::{Deserialize, Serialize};

use crate::models::{DayTimings, PrayerType};
use crate::schedule::clock::ClockTime;
use crate::schedule::resolver::resolve_rule;
use crate::schedule::rules::{IqamahRule, IqamahSchedule};

/// How resolved Iqamah times are surfaced on the table.
///
/// Mosques print these schedules two ways: repeat the time on every row it
/// applies to, or print it once at the middle of each range and leave the
/// other rows blank. Both are supported; the caller picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayPolicy {
    #[default]
    EveryDay,
    MidpointOnly,
}

/// One resolved Iqamah cell: the congregation time for a day and prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedIqamah {
    pub time: ClockTime,
    /// Position of the governing rule in its prayer's list, for per-range
    /// display grouping.
    pub range_index: usize,
    /// Whether the table should print the time on this row, per the active
    /// `DisplayPolicy`. A hidden cell still resolved; it renders as a dash.
    pub visible: bool,
}

/// Per-day resolution results for all five prayers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DayIqamah {
    pub day: u8,
    pub fajr: Option<ResolvedIqamah>,
    pub zuhr: Option<ResolvedIqamah>,
    pub asr: Option<ResolvedIqamah>,
    pub maghrib: Option<ResolvedIqamah>,
    pub isha: Option<ResolvedIqamah>,
}

impl DayIqamah {
    pub fn get(&self, prayer: PrayerType) -> Option<&ResolvedIqamah> {
        match prayer {
            PrayerType::Fajr => self.fajr.as_ref(),
            PrayerType::Zuhr => self.zuhr.as_ref(),
            PrayerType::Asr => self.asr.as_ref(),
            PrayerType::Maghrib => self.maghrib.as_ref(),
            PrayerType::Isha => self.isha.as_ref(),
        }
    }

    fn set(&mut self, prayer: PrayerType, cell: Option<ResolvedIqamah>) {
        match prayer {
            PrayerType::Fajr => self.fajr = cell,
            PrayerType::Zuhr => self.zuhr = cell,
            PrayerType::Asr => self.asr = cell,
            PrayerType::Maghrib => self.maghrib = cell,
            PrayerType::Isha => self.isha = cell,
        }
    }
}

/// A fully resolved month of Iqamah times.
#[derive(Debug, Clone, Serialize)]
pub struct MonthIqamah {
    pub days: Vec<DayIqamah>,
    /// Whether the table should carry Iqamah columns at all. True as soon as
    /// any prayer has a rule configured, regardless of per-day visibility.
    pub has_any_iqamah: bool,
}

impl MonthIqamah {
    pub fn day(&self, day: u8) -> Option<&DayIqamah> {
        self.days.iter().find(|d| d.day == day)
    }
}

/// Resolves a month of timings against the configured schedule.
///
/// Pure: same inputs, same output, no state carried between invocations.
/// A missing or malformed raw timing costs exactly the cell that needed it;
/// every other cell of the month still resolves.
pub fn resolve_month(
    timings: &[DayTimings],
    schedule: &IqamahSchedule,
    policy: DisplayPolicy,
) -> MonthIqamah {
    let days = timings
        .iter()
        .map(|day| resolve_day(day, schedule, policy))
        .collect();
    MonthIqamah {
        days,
        has_any_iqamah: schedule.has_any_rules(),
    }
}

fn resolve_day(timings: &DayTimings, schedule: &IqamahSchedule, policy: DisplayPolicy) -> DayIqamah {
    let mut resolved = DayIqamah {
        day: timings.day,
        ..Default::default()
    };
    for prayer in PrayerType::all() {
        resolved.set(prayer, resolve_cell(timings, schedule, policy, prayer));
    }
    resolved
}

fn resolve_cell(
    timings: &DayTimings,
    schedule: &IqamahSchedule,
    policy: DisplayPolicy,
    prayer: PrayerType,
) -> Option<ResolvedIqamah> {
    let day = timings.day;
    let matched = resolve_rule(day, schedule.rules(prayer))?;

    let time = match *matched.rule {
        IqamahRule::Fixed { time, .. } => time,
        IqamahRule::Variable { offset_minutes, .. } => {
            let raw = timings.raw(prayer)?;
            match raw.parse::<ClockTime>() {
                Ok(base) => base.add_minutes(offset_minutes as i64),
                Err(err) => {
                    log::warn!("day {day} {prayer}: {err}; leaving Iqamah blank");
                    return None;
                }
            }
        }
    };

    let visible = match policy {
        DisplayPolicy::EveryDay => true,
        DisplayPolicy::MidpointOnly => day == midpoint(matched.rule),
    };

    Some(ResolvedIqamah {
        time,
        range_index: matched.index,
        visible,
    })
}

/// Middle day of a range, rounding up on ties. A range spanning days 1-15
/// prints at day 8.
fn midpoint(rule: &IqamahRule) -> u8 {
    (rule.start_day() as u16 + rule.end_day() as u16).div_ceil(2) as u8
}
