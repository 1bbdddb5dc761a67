use anyhow::{Result, anyhow, bail};
use chrono::{Datelike, Local};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::cli::args::IqamahCommands;
use crate::config::AppConfig;
use crate::models::PrayerType;
use crate::prayer_times::{CALC_METHODS, MonthCalculator};
use crate::render::{MonthReport, table};
use crate::schedule::{
    ClockTime, DisplayPolicy, IqamahRule, IqamahSchedule, RuleKind, RulePatch, resolve_month,
};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";

// ─── Setup wizard ────────────────────────────────────────────────────────────

pub fn handle_setup(config: &mut AppConfig, reset: bool) -> Result<()> {
    if config.configured && !reset {
        println!("mihrab is already configured. Use --reset to reconfigure.");
        return Ok(());
    }

    println_colored!(BOLD, "Mosque profile");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut prompt = |label: &str, current: &str| -> Result<String> {
        print!("{} [{}]: ", label, current);
        io::stdout().flush()?;
        let line = lines.next().transpose()?.unwrap_or_default();
        let trimmed = line.trim();
        Ok(if trimmed.is_empty() {
            current.to_string()
        } else {
            trimmed.to_string()
        })
    };

    let mosque = &mut config.mosque;
    mosque.name = prompt("Mosque name", &mosque.name)?;
    mosque.location_name = prompt("Location", &mosque.location_name)?;
    mosque.latitude = prompt("Latitude", &mosque.latitude.to_string())?.parse()?;
    mosque.longitude = prompt("Longitude", &mosque.longitude.to_string())?.parse()?;
    println!("Calculation methods: {}", CALC_METHODS.join(", "));
    mosque.calc_method = prompt("Calculation method", &mosque.calc_method)?;
    mosque.madhab = prompt("Madhab (Hanafi/Shafi)", &mosque.madhab)?;
    mosque.timezone_offset = prompt(
        "Timezone offset from UTC in minutes",
        &mosque.timezone_offset.to_string(),
    )?
    .parse()?;
    mosque.hijri_offset = prompt("Hijri day offset", &mosque.hijri_offset.to_string())?.parse()?;

    // Reject bad method/madhab before saving anything.
    MonthCalculator::new(
        mosque.latitude,
        mosque.longitude,
        &mosque.calc_method,
        &mosque.madhab,
        mosque.timezone_offset,
        mosque.hijri_offset,
    )?;

    config.configured = true;
    config.save()?;
    println_colored!(GREEN, "Saved profile for {}.", config.mosque.name);
    Ok(())
}

// ─── Generate ────────────────────────────────────────────────────────────────

pub fn handle_generate(
    config: &AppConfig,
    month: Option<u32>,
    year: Option<i32>,
    json: bool,
    policy: Option<String>,
) -> Result<()> {
    let today = Local::now().date_naive();
    let month = month.unwrap_or(today.month());
    let year = year.unwrap_or(today.year());
    if !(1..=12).contains(&month) {
        bail!("Month must be 1-12, got {}", month);
    }

    let policy = match policy {
        Some(name) => parse_policy(&name)?,
        None => config.display_policy,
    };

    let mosque = &config.mosque;
    let calc = MonthCalculator::new(
        mosque.latitude,
        mosque.longitude,
        &mosque.calc_method,
        &mosque.madhab,
        mosque.timezone_offset,
        mosque.hijri_offset,
    )?;
    let timings = calc.month_timings(year, month)?;
    let resolved = resolve_month(&timings, &config.iqamah, policy);

    if json {
        let report = MonthReport::build(config, &timings, &resolved, year, month);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", table::render(config, &timings, &resolved, year, month));
    }
    Ok(())
}

pub fn parse_policy(s: &str) -> Result<DisplayPolicy> {
    match s.to_lowercase().as_str() {
        "every-day" | "everyday" | "all" => Ok(DisplayPolicy::EveryDay),
        "midpoint" | "midpoint-only" | "middle" => Ok(DisplayPolicy::MidpointOnly),
        _ => Err(anyhow!("Unknown display policy: '{}' (use every-day or midpoint)", s)),
    }
}

// ─── Iqamah schedule editing ─────────────────────────────────────────────────

pub fn handle_iqamah(config: &mut AppConfig, action: &IqamahCommands) -> Result<()> {
    match action {
        IqamahCommands::List => {
            list_rules(config);
            return Ok(());
        }
        IqamahCommands::Add {
            prayer,
            from,
            to,
            time,
            offset,
        } => {
            let prayer = PrayerType::from_str(prayer)?;
            let rule = match rule_kind(time.as_deref(), *offset)? {
                Some(RuleKind::Fixed(time)) => IqamahRule::Fixed {
                    start_day: *from,
                    end_day: *to,
                    time,
                },
                Some(RuleKind::Variable(offset_minutes)) => IqamahRule::Variable {
                    start_day: *from,
                    end_day: *to,
                    offset_minutes,
                },
                None => bail!("Give either --time or --offset"),
            };
            match config.iqamah.add_rule(prayer, rule) {
                Ok(()) => {
                    let index = config.iqamah.rules(prayer).len() - 1;
                    println_colored!(GREEN, "Added {} rule #{}.", prayer, index);
                    if index > 0 {
                        println_colored!(
                            DIM,
                            "Overlapping days resolve to the earliest rule in the list."
                        );
                    }
                }
                Err(err) => {
                    println_colored!(RED, "Not added: {}", err);
                    return Ok(());
                }
            }
        }
        IqamahCommands::Update {
            prayer,
            index,
            from,
            to,
            time,
            offset,
        } => {
            let prayer = PrayerType::from_str(prayer)?;
            let patch = RulePatch {
                start_day: *from,
                end_day: *to,
                kind: rule_kind(time.as_deref(), *offset)?,
            };
            match config.iqamah.update_rule(prayer, *index, patch) {
                Ok(rule) => {
                    let line = describe_rule(rule);
                    println_colored!(GREEN, "Updated {} rule #{}: {}", prayer, index, line);
                }
                Err(err) => {
                    println_colored!(RED, "Not updated: {}", err);
                    return Ok(());
                }
            }
        }
        IqamahCommands::Remove { prayer, index } => {
            let prayer = PrayerType::from_str(prayer)?;
            match config.iqamah.remove_rule(prayer, *index) {
                Ok(rule) => {
                    println_colored!(GREEN, "Removed {} rule: {}", prayer, describe_rule(&rule));
                }
                Err(err) => {
                    println_colored!(RED, "Not removed: {}", err);
                    return Ok(());
                }
            }
        }
        IqamahCommands::Clear { prayer } => match prayer {
            Some(name) => {
                let prayer = PrayerType::from_str(name)?;
                config.iqamah.clear(prayer);
                println_colored!(GREEN, "Cleared all {} rules.", prayer);
            }
            None => {
                config.iqamah = IqamahSchedule::default();
                println_colored!(GREEN, "Cleared the whole Iqamah schedule.");
            }
        },
        IqamahCommands::Policy { policy } => {
            config.display_policy = parse_policy(policy)?;
            println_colored!(GREEN, "Display policy set to {:?}.", config.display_policy);
        }
    }

    config.save()?;
    Ok(())
}

fn rule_kind(time: Option<&str>, offset: Option<u32>) -> Result<Option<RuleKind>> {
    match (time, offset) {
        (Some(_), Some(_)) => bail!("Give either --time or --offset, not both"),
        (Some(time), None) => {
            let time: ClockTime = time.parse()?;
            Ok(Some(RuleKind::Fixed(time)))
        }
        (None, Some(offset)) => Ok(Some(RuleKind::Variable(offset))),
        (None, None) => Ok(None),
    }
}

fn describe_rule(rule: &IqamahRule) -> String {
    match rule {
        IqamahRule::Fixed {
            start_day,
            end_day,
            time,
        } => format!("days {}-{} at {}", start_day, end_day, time),
        IqamahRule::Variable {
            start_day,
            end_day,
            offset_minutes,
        } => format!("days {}-{}, +{} mins", start_day, end_day, offset_minutes),
    }
}

fn list_rules(config: &AppConfig) {
    println_colored!(BOLD, "Iqamah schedule ({:?} display)", config.display_policy);
    for prayer in PrayerType::all() {
        let rules = config.iqamah.rules(prayer);
        if rules.is_empty() {
            println_colored!(DIM, "  {:8} no rules", prayer.display_name());
            continue;
        }
        for (index, rule) in rules.iter().enumerate() {
            println!("  {:8} #{} {}", prayer.display_name(), index, describe_rule(rule));
        }
    }
    println_colored!(DIM, "Overlapping days resolve to the earliest rule in the list.");
}
