use crate::config::AppConfig;
use crate::models::{DayTimings, PrayerType};
use crate::schedule::{ClockTime, MonthIqamah};
use crate::utils::format::{center, month_name, width};
use crate::utils::hijri;

/// Renders the month as a bordered text table in the printed-schedule layout:
/// Day / Date / Hijri columns, one column per prayer, and an Iqamah column
/// beside each prayer whenever any Iqamah rule is configured.
pub fn render(
    config: &AppConfig,
    timings: &[DayTimings],
    iqamah: &MonthIqamah,
    year: i32,
    month: u32,
) -> String {
    let with_iqamah = iqamah.has_any_iqamah;

    let mut header: Vec<String> = vec!["Day".into(), "Date".into(), "Hijri".into()];
    for prayer in PrayerType::all() {
        header.push(prayer.display_name().to_string());
        if with_iqamah {
            header.push("Iqamah".into());
        }
        if prayer == PrayerType::Fajr {
            header.push("Sunrise".into());
        }
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for day in timings {
        let resolved = iqamah.day(day.day);
        let mut row = vec![day.weekday.clone(), day.day.to_string(), day.hijri.clone()];
        for prayer in PrayerType::all() {
            row.push(compact_or_dash(day.raw(prayer)));
            if with_iqamah {
                let cell = resolved
                    .and_then(|d| d.get(prayer))
                    .filter(|cell| cell.visible)
                    .map(|cell| cell.time.compact())
                    .unwrap_or_else(|| "-".to_string());
                row.push(cell);
            }
            if prayer == PrayerType::Fajr {
                row.push(compact_or_dash(day.sunrise.as_deref()));
            }
        }
        rows.push(row);
    }

    let mut widths: Vec<usize> = header.iter().map(|h| width(h)).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(width(cell));
        }
    }

    let line = |cells: &[String]| -> String {
        let mut out = String::from("|");
        for (cell, w) in cells.iter().zip(&widths) {
            out.push_str(&format!(" {} |", center(cell, *w)));
        }
        out
    };
    let rule: String = {
        let total: usize = widths.iter().map(|w| w + 3).sum::<usize>() + 1;
        "-".repeat(total)
    };

    let mut out = String::new();
    render_header(&mut out, config, timings, year, month, width(&rule));
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&line(&header));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');
    render_notes(&mut out, config);
    out
}

fn render_header(
    out: &mut String,
    config: &AppConfig,
    timings: &[DayTimings],
    year: i32,
    month: u32,
    total_width: usize,
) {
    let dates: Vec<_> = timings.iter().map(|d| d.date).collect();
    let hijri_months = hijri::months_spanned(&dates, config.mosque.hijri_offset).join(" / ");

    out.push_str(&center(&config.mosque.name.to_uppercase(), total_width));
    out.push('\n');
    out.push_str(&center("Monthly Prayer Schedule", total_width));
    out.push('\n');
    let period = format!("{} {}  |  {}", month_name(month), year, hijri_months);
    out.push_str(&center(&period, total_width));
    out.push('\n');
    let friday = &config.friday;
    let friday_line = format!(
        "{}  {} {}  {} {}",
        friday.title, friday.first_label, friday.first_time, friday.second_label, friday.second_time
    );
    out.push_str(&center(&friday_line, total_width));
    out.push('\n');
}

fn render_notes(out: &mut String, config: &AppConfig) {
    for note in &config.notes {
        if note.heading.is_empty() && note.body.is_empty() {
            continue;
        }
        if !note.heading.is_empty() {
            out.push_str(&format!("{}: ", note.heading));
        }
        out.push_str(&note.body);
        out.push('\n');
    }
}

fn compact_or_dash(raw: Option<&str>) -> String {
    raw.and_then(|s| s.parse::<ClockTime>().ok())
        .map(|t| t.compact())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{DisplayPolicy, IqamahRule, IqamahSchedule, resolve_month};
    use chrono::NaiveDate;

    fn month(days: u8) -> Vec<DayTimings> {
        (1..=days)
            .map(|day| DayTimings {
                day,
                date: NaiveDate::from_ymd_opt(2026, 1, day as u32).unwrap(),
                weekday: "Thu".to_string(),
                hijri: day.to_string(),
                fajr: Some("5:32 am".to_string()),
                sunrise: Some("7:01 am".to_string()),
                zuhr: Some("1:15 pm".to_string()),
                asr: Some("3:40 pm".to_string()),
                maghrib: Some("5:55 pm".to_string()),
                isha: Some("7:20 pm".to_string()),
            })
            .collect()
    }

    #[test]
    fn iqamah_columns_follow_configuration() {
        let config = AppConfig::default();
        let timings = month(5);

        let empty = IqamahSchedule::default();
        let resolved = resolve_month(&timings, &empty, DisplayPolicy::EveryDay);
        let plain = render(&config, &timings, &resolved, 2026, 1);
        assert!(!plain.contains("Iqamah"));

        let mut schedule = IqamahSchedule::default();
        schedule
            .add_rule(
                PrayerType::Fajr,
                IqamahRule::Fixed {
                    start_day: 1,
                    end_day: 31,
                    time: "6:00 am".parse().unwrap(),
                },
            )
            .unwrap();
        let resolved = resolve_month(&timings, &schedule, DisplayPolicy::EveryDay);
        let with = render(&config, &timings, &resolved, 2026, 1);
        assert!(with.contains("Iqamah"));
        assert!(with.contains("6:00"));
    }

    #[test]
    fn missing_timing_renders_as_dash() {
        let config = AppConfig::default();
        let mut timings = month(3);
        timings[1].zuhr = None;

        let resolved = resolve_month(&timings, &IqamahSchedule::default(), DisplayPolicy::EveryDay);
        let out = render(&config, &timings, &resolved, 2026, 1);
        let dash_rows: Vec<_> = out.lines().filter(|l| l.contains(" - ")).collect();
        assert_eq!(dash_rows.len(), 1);
    }

    #[test]
    fn header_carries_mosque_and_period() {
        let mut config = AppConfig::default();
        config.mosque.name = "Masjid An-Noor".to_string();
        let timings = month(5);
        let resolved = resolve_month(&timings, &IqamahSchedule::default(), DisplayPolicy::EveryDay);
        let out = render(&config, &timings, &resolved, 2026, 1);
        assert!(out.contains("MASJID AN-NOOR"));
        assert!(out.contains("January 2026"));
        assert!(out.contains("Friday Salat"));
    }
}
