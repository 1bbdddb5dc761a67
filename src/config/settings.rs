use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::schedule::{DisplayPolicy, IqamahSchedule};

fn default_mosque_name() -> String {
    "Masjid".to_string()
}
fn default_location_name() -> String {
    "Glen Ellyn, IL".to_string()
}
fn default_latitude() -> f64 {
    41.8796
}
fn default_longitude() -> f64 {
    -88.0658
}
fn default_calc_method() -> String {
    "NorthAmerica".to_string()
}
fn default_madhab() -> String {
    "Hanafi".to_string()
}
fn default_timezone_offset() -> i32 {
    -360
}
fn default_hijri_offset() -> i32 {
    0
}
fn default_friday_title() -> String {
    "Friday Salat".to_string()
}
fn default_friday_first_label() -> String {
    "1st English Talk:".to_string()
}
fn default_friday_first_time() -> String {
    "1:10 PM".to_string()
}
fn default_friday_second_label() -> String {
    "1st Khutbah:".to_string()
}
fn default_friday_second_time() -> String {
    "1:30 PM".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MosqueConfig {
    #[serde(default = "default_mosque_name")]
    pub name: String,
    #[serde(default = "default_location_name")]
    pub location_name: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_calc_method")]
    pub calc_method: String,
    #[serde(default = "default_madhab")]
    pub madhab: String,
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset: i32, // minutes from UTC
    /// Days to add/subtract from Hijri date for local moon sighting.
    /// 0 = default (Saudi), -1 = one day behind, +1 = one day ahead
    #[serde(default = "default_hijri_offset")]
    pub hijri_offset: i32,
}

impl Default for MosqueConfig {
    fn default() -> Self {
        Self {
            name: default_mosque_name(),
            location_name: default_location_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            calc_method: default_calc_method(),
            madhab: default_madhab(),
            timezone_offset: default_timezone_offset(),
            hijri_offset: default_hijri_offset(),
        }
    }
}

/// The Friday prayer box printed in the table header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FridayConfig {
    #[serde(default = "default_friday_title")]
    pub title: String,
    #[serde(default = "default_friday_first_label")]
    pub first_label: String,
    #[serde(default = "default_friday_first_time")]
    pub first_time: String,
    #[serde(default = "default_friday_second_label")]
    pub second_label: String,
    #[serde(default = "default_friday_second_time")]
    pub second_time: String,
}

impl Default for FridayConfig {
    fn default() -> Self {
        Self {
            title: default_friday_title(),
            first_label: default_friday_first_label(),
            first_time: default_friday_first_time(),
            second_label: default_friday_second_label(),
            second_time: default_friday_second_time(),
        }
    }
}

/// A free-text announcement printed under the table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Set once the setup wizard has run.
    #[serde(default)]
    pub configured: bool,
    #[serde(default)]
    pub display_policy: DisplayPolicy,
    #[serde(default)]
    pub mosque: MosqueConfig,
    #[serde(default)]
    pub friday: FridayConfig,
    #[serde(default)]
    pub iqamah: IqamahSchedule,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "mihrab").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }
}
