use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::PrayerType;

/// One day's raw timings as handed over by the calculation provider.
///
/// Prayer times are carried as clock strings (`"5:32 am"`) rather than parsed
/// values: any of them may be absent, and a malformed string must only cost
/// the single cell that uses it, so parsing is deferred to the point of use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTimings {
    /// Day of month, 1-based.
    pub day: u8,
    pub date: NaiveDate,
    /// Short weekday name ("Mon").
    pub weekday: String,
    /// Opaque Hijri label for the table ("11 Rajab", "12", ...).
    pub hijri: String,
    pub fajr: Option<String>,
    pub sunrise: Option<String>,
    pub zuhr: Option<String>,
    pub asr: Option<String>,
    pub maghrib: Option<String>,
    pub isha: Option<String>,
}

impl DayTimings {
    pub fn raw(&self, prayer: PrayerType) -> Option<&str> {
        let slot = match prayer {
            PrayerType::Fajr => &self.fajr,
            PrayerType::Zuhr => &self.zuhr,
            PrayerType::Asr => &self.asr,
            PrayerType::Maghrib => &self.maghrib,
            PrayerType::Isha => &self.isha,
        };
        slot.as_deref().filter(|s| !s.trim().is_empty())
    }
}
