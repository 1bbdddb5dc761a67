use serde::Serialize;

use crate::config::AppConfig;
use crate::models::DayTimings;
use crate::schedule::{DayIqamah, DisplayPolicy, MonthIqamah};
use crate::utils::format::month_name;
use crate::utils::hijri;

/// Machine-readable form of a resolved month, for `generate --json` and
/// whatever document pipeline consumes it downstream.
#[derive(Debug, Serialize)]
pub struct MonthReport<'a> {
    pub mosque: &'a str,
    pub location: &'a str,
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub hijri_months: Vec<String>,
    pub display_policy: DisplayPolicy,
    pub has_any_iqamah: bool,
    pub days: Vec<DayReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct DayReport<'a> {
    #[serde(flatten)]
    pub timings: &'a DayTimings,
    pub iqamah: &'a DayIqamah,
}

impl<'a> MonthReport<'a> {
    pub fn build(
        config: &'a AppConfig,
        timings: &'a [DayTimings],
        iqamah: &'a MonthIqamah,
        year: i32,
        month: u32,
    ) -> MonthReport<'a> {
        let dates: Vec<_> = timings.iter().map(|d| d.date).collect();
        let days = timings
            .iter()
            .zip(&iqamah.days)
            .map(|(timings, iqamah)| DayReport { timings, iqamah })
            .collect();
        MonthReport {
            mosque: &config.mosque.name,
            location: &config.mosque.location_name,
            year,
            month,
            month_name: month_name(month),
            hijri_months: hijri::months_spanned(&dates, config.mosque.hijri_offset),
            display_policy: config.display_policy,
            has_any_iqamah: iqamah.has_any_iqamah,
            days,
        }
    }
}
