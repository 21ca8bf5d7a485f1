//! User preference singleton.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" => Ok(Self::Auto),
            other => Err(format!(
                "unsupported theme `{other}`; expected light|dark|auto"
            )),
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted application preferences.
///
/// Missing fields in stored data take their default values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: Theme,
    /// Gates the periodic reminder check and the desktop/sound alert hooks.
    pub task_reminders: bool,
    pub resource_updates: bool,
    pub daily_digest: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Auto,
            task_reminders: true,
            resource_updates: true,
            daily_digest: false,
        }
    }
}

/// One field-level settings change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingUpdate {
    Theme(Theme),
    TaskReminders(bool),
    ResourceUpdates(bool),
    DailyDigest(bool),
}

impl Settings {
    pub fn apply(&mut self, update: SettingUpdate) {
        match update {
            SettingUpdate::Theme(theme) => self.theme = theme,
            SettingUpdate::TaskReminders(value) => self.task_reminders = value,
            SettingUpdate::ResourceUpdates(value) => self.resource_updates = value,
            SettingUpdate::DailyDigest(value) => self.daily_digest = value,
        }
    }
}
