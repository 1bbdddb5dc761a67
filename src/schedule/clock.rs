use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid clock time '{0}', expected H:MM am/pm")]
pub struct ClockParseError(pub String);

/// A wall-clock time at minute resolution.
///
/// The canonical textual form is `"H:MM am"` / `"H:MM pm"` (no leading zero
/// on the hour), which is the interchange format for both the timing
/// calculator output and the saved Iqamah rules. Internally the hour is kept
/// on the 24-hour scale so offset arithmetic stays plain minute-of-day math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour24: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour24: u8, minute: u8) -> Option<ClockTime> {
        if hour24 < 24 && minute < 60 {
            Some(ClockTime { hour24, minute })
        } else {
            None
        }
    }

    pub fn hour24(&self) -> u8 {
        self.hour24
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    fn minute_of_day(&self) -> i64 {
        self.hour24 as i64 * 60 + self.minute as i64
    }

    /// Shift by `offset` minutes on the clock face. Wraps past midnight in
    /// either direction (mod 1440); the date is never part of this value.
    pub fn add_minutes(&self, offset: i64) -> ClockTime {
        let total = (self.minute_of_day() + offset).rem_euclid(24 * 60);
        ClockTime {
            hour24: (total / 60) as u8,
            minute: (total % 60) as u8,
        }
    }

    /// `"H:MM"` with the meridiem dropped, for compact table cells.
    /// The hour value is unchanged (still 12-hour display form).
    pub fn compact(&self) -> String {
        format!("{}:{:02}", self.display_hour(), self.minute)
    }

    fn display_hour(&self) -> u8 {
        match self.hour24 % 12 {
            0 => 12,
            h => h,
        }
    }

    fn meridiem(&self) -> &'static str {
        if self.hour24 < 12 { "am" } else { "pm" }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.display_hour(), self.minute, self.meridiem())
    }
}

impl FromStr for ClockTime {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ClockParseError(s.to_string());

        let trimmed = s.trim();
        let (time_part, period) = trimmed
            .rsplit_once(|c: char| c.is_whitespace())
            .ok_or_else(err)?;
        let pm = match period.to_ascii_lowercase().as_str() {
            "am" => false,
            "pm" => true,
            _ => return Err(err()),
        };

        let (h, m) = time_part.trim().split_once(':').ok_or_else(err)?;
        let hour: u8 = h.parse().map_err(|_| err())?;
        let minute: u8 = m.parse().map_err(|_| err())?;
        if !(1..=12).contains(&hour) || minute > 59 || m.len() != 2 {
            return Err(err());
        }

        // 12 am is midnight, 12 pm stays noon.
        let hour24 = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        Ok(ClockTime { hour24, minute })
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ClockVisitor;

        impl Visitor<'_> for ClockVisitor {
            type Value = ClockTime;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a clock time like \"6:15 am\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ClockTime, E> {
                v.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(ClockVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_formats_canonically() {
        assert_eq!(t("6:05 am").to_string(), "6:05 am");
        assert_eq!(t("  1:15 PM ").to_string(), "1:15 pm");
        assert_eq!(t("12:00 am").hour24(), 0);
        assert_eq!(t("12:00 am").to_string(), "12:00 am");
        assert_eq!(t("12:30 pm").hour24(), 12);
        assert_eq!(t("12:30 pm").to_string(), "12:30 pm");
        assert_eq!(t("11:59 pm").hour24(), 23);
    }

    #[test]
    fn round_trips_all_valid_times() {
        for hour in 1..=12u8 {
            for minute in [0u8, 9, 30, 59] {
                for period in ["am", "pm"] {
                    let s = format!("{}:{:02} {}", hour, minute, period);
                    assert_eq!(t(&s).to_string(), s);
                }
            }
        }
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "6:05", "13:00 pm", "0:10 am", "6:60 am", "6:5 am", "six am", "6:05 xm"] {
            assert!(bad.parse::<ClockTime>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn zero_offset_is_identity() {
        for s in ["12:00 am", "6:05 am", "12:00 pm", "11:59 pm"] {
            assert_eq!(t(s).add_minutes(0), t(s));
        }
    }

    #[test]
    fn offsets_cross_meridiem_and_midnight() {
        assert_eq!(t("11:45 am").add_minutes(20).to_string(), "12:05 pm");
        assert_eq!(t("11:50 pm").add_minutes(20).to_string(), "12:10 am");
        assert_eq!(t("12:00 pm").add_minutes(0).to_string(), "12:00 pm");
        assert_eq!(t("12:10 am").add_minutes(-20).to_string(), "11:50 pm");
        assert_eq!(t("1:15 pm").add_minutes(10).to_string(), "1:25 pm");
    }

    #[test]
    fn compact_drops_meridiem_only() {
        assert_eq!(t("6:05 am").compact(), "6:05");
        assert_eq!(t("12:40 pm").compact(), "12:40");
        assert_eq!(t("12:07 am").compact(), "12:07");
    }

    #[test]
    fn serde_uses_canonical_string() {
        let time = t("7:30 pm");
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"7:30 pm\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, time);
    }
}
