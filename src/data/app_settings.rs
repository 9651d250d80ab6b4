use crate::calc::WeekStart;
use crate::data::persistence::{get_data_dir, Persistable};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub week_start: WeekStart,
    /// Short weekday labels, Sunday first. Rotated to `week_start` for display.
    pub weekday_labels: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            week_start: WeekStart::Sunday,
            weekday_labels: ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
}

impl AppSettings {
    pub fn load() -> Result<Self> {
        Self::load_from(&get_data_dir()?)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        let settings = SettingsWrapper::load_from(dir)?.settings;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save_to(dir)
    }

    pub fn validate(&self) -> Result<()> {
        if self.weekday_labels.len() != 7 {
            bail!(
                "weekday_labels must have exactly 7 entries (Sunday first), found {}",
                self.weekday_labels.len()
            );
        }
        Ok(())
    }

    /// Labels as a fixed Sunday-first array. Missing entries render blank.
    pub fn labels(&self) -> [String; 7] {
        std::array::from_fn(|i| self.weekday_labels.get(i).cloned().unwrap_or_default())
    }
}
