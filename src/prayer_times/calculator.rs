use anyhow::{Result, anyhow};
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime, Timelike};
use salah::prelude::*;

use crate::models::DayTimings;
use crate::schedule::ClockTime;
use crate::utils::hijri;

/// Computes a month of raw prayer timings offline for a fixed location.
///
/// This is the provider side of the pipeline: it hands the engine one
/// `DayTimings` per day, times already converted to the local wall clock and
/// rendered in the canonical `"H:MM am/pm"` form.
pub struct MonthCalculator {
    pub lat: f64,
    pub lng: f64,
    pub method_str: String,
    pub madhab_str: String,
    pub tz_offset_minutes: i32,
    pub hijri_offset: i32,
}

impl MonthCalculator {
    pub fn new(
        lat: f64,
        lng: f64,
        method: &str,
        madhab: &str,
        tz_offset_minutes: i32,
        hijri_offset: i32,
    ) -> Result<Self> {
        // Validate method + madhab early
        parse_method(method)?;
        parse_madhab(madhab)?;
        Ok(Self {
            lat,
            lng,
            method_str: method.to_string(),
            madhab_str: madhab.to_string(),
            tz_offset_minutes,
            hijri_offset,
        })
    }

    /// One `DayTimings` per day of the given month, in day order.
    pub fn month_timings(&self, year: i32, month: u32) -> Result<Vec<DayTimings>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| anyhow!("Invalid month: {}/{}", month, year))?;

        let mut days = Vec::new();
        let mut date = first;
        while date.month() == month {
            days.push(self.day_timings(date, date == first)?);
            date = date
                .succ_opt()
                .ok_or_else(|| anyhow!("Date overflow after {}", date))?;
        }
        log::debug!("calculated {} days for {}/{}", days.len(), month, year);
        Ok(days)
    }

    fn day_timings(&self, date: NaiveDate, first_row: bool) -> Result<DayTimings> {
        let coords = Coordinates::new(self.lat, self.lng);
        let method = parse_method(&self.method_str)?;
        let madhab = parse_madhab(&self.madhab_str)?;
        let params = Configuration::with(method, madhab);

        let times = PrayerSchedule::new()
            .on(date)
            .for_location(coords)
            .with_configuration(params)
            .calculate()
            .map_err(|e| anyhow!("Prayer calculation failed: {}", e))?;

        let offset = FixedOffset::east_opt(self.tz_offset_minutes * 60)
            .ok_or_else(|| anyhow!("Invalid timezone offset: {}", self.tz_offset_minutes))?;

        let clock = |utc: chrono::DateTime<chrono::Utc>| -> Option<String> {
            let local = utc.with_timezone(&offset).time();
            format_clock(local).map(|t| t.to_string())
        };

        Ok(DayTimings {
            day: date.day() as u8,
            date,
            weekday: date.format("%a").to_string(),
            hijri: hijri::day_label(date, self.hijri_offset, first_row),
            fajr: clock(times.time(Prayer::Fajr)),
            sunrise: clock(times.time(Prayer::Sunrise)),
            zuhr: clock(times.time(Prayer::Dhuhr)),
            asr: clock(times.time(Prayer::Asr)),
            maghrib: clock(times.time(Prayer::Maghrib)),
            isha: clock(times.time(Prayer::Isha)),
        })
    }
}

fn format_clock(time: NaiveTime) -> Option<ClockTime> {
    ClockTime::new(time.hour() as u8, time.minute() as u8)
}

fn parse_method(s: &str) -> Result<Method> {
    match s {
        "MuslimWorldLeague" => Ok(Method::MuslimWorldLeague),
        "Egyptian" => Ok(Method::Egyptian),
        "Karachi" => Ok(Method::Karachi),
        "UmmAlQura" => Ok(Method::UmmAlQura),
        "Dubai" => Ok(Method::Dubai),
        "MoonsightingCommittee" => Ok(Method::MoonsightingCommittee),
        "NorthAmerica" => Ok(Method::NorthAmerica),
        "Kuwait" => Ok(Method::Kuwait),
        "Qatar" => Ok(Method::Qatar),
        "Singapore" => Ok(Method::Singapore),
        "Tehran" => Ok(Method::Tehran),
        "Turkey" => Ok(Method::Turkey),
        "Other" => Ok(Method::Other),
        _ => Err(anyhow!("Unknown calculation method: '{}'", s)),
    }
}

fn parse_madhab(s: &str) -> Result<Madhab> {
    match s {
        "Hanafi" => Ok(Madhab::Hanafi),
        "Shafi" | "Shafi'i" => Ok(Madhab::Shafi),
        _ => Err(anyhow!("Unknown madhab: '{}'", s)),
    }
}

pub const CALC_METHODS: &[&str] = &[
    "MuslimWorldLeague",
    "Egyptian",
    "Karachi",
    "UmmAlQura",
    "Dubai",
    "MoonsightingCommittee",
    "NorthAmerica",
    "Kuwait",
    "Qatar",
    "Singapore",
    "Tehran",
    "Turkey",
    "Other",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_method_and_madhab() {
        assert!(MonthCalculator::new(41.88, -88.07, "NoSuchMethod", "Hanafi", -360, 0).is_err());
        assert!(MonthCalculator::new(41.88, -88.07, "NorthAmerica", "Maliki", -360, 0).is_err());
    }

    #[test]
    fn produces_one_entry_per_day() {
        let calc =
            MonthCalculator::new(41.8796, -88.0658, "NorthAmerica", "Shafi", -360, 0).unwrap();
        let days = calc.month_timings(2026, 2).unwrap();
        assert_eq!(days.len(), 28);
        assert_eq!(days[0].day, 1);
        assert_eq!(days[27].day, 28);
        // Every timing present and in canonical form.
        let fajr = days[0].fajr.as_deref().unwrap();
        assert!(fajr.parse::<ClockTime>().is_ok(), "got {fajr:?}");
    }
}
