//! Configuration management for homeboard

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::calendar::CalendarSettings;
use crate::error::{ConfigError, Result};
use crate::feed::FeedSettings;
use crate::weather::WeatherSettings;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where the weather is reported for
    #[serde(default)]
    pub location: Location,

    /// Household members, in display order
    #[serde(default = "default_family")]
    pub family: Vec<FamilyMember>,

    #[serde(default)]
    pub weather: WeatherSettings,

    #[serde(default)]
    pub calendar: CalendarSettings,

    #[serde(default)]
    pub feed: FeedSettings,
}

/// Coordinates for weather lookups
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            latitude: 30.5788,
            longitude: -97.8531,
        }
    }
}

/// A household member and their calendar feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub name: String,

    /// Accent color used when showing this member's events
    pub color: String,

    /// ICS feed URL; empty means no calendar
    #[serde(default)]
    pub calendar_url: String,
}

impl FamilyMember {
    fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            calendar_url: String::new(),
        }
    }
}

fn default_family() -> Vec<FamilyMember> {
    vec![
        FamilyMember::new("Dad", "rose"),
        FamilyMember::new("Mom", "pink"),
        FamilyMember::new("Hunter", "emerald"),
        FamilyMember::new("Harper", "rainbow"),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            location: Location::default(),
            family: default_family(),
            weather: WeatherSettings::default(),
            calendar: CalendarSettings::default(),
            feed: FeedSettings::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".homeboard").join("config.yaml"))
    }

    /// Resolve an optional override to a config path
    pub fn resolve_path(custom: Option<&str>) -> Result<PathBuf> {
        match custom {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional override or the default path
    pub fn load_at(custom: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(custom)?)
    }

    /// Save configuration to an optional override or the default path
    pub fn save_at(&self, custom: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(custom)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// `(name, url)` pairs for members that have a calendar, in family order
    pub fn calendar_sources(&self) -> Vec<(&str, &str)> {
        self.family
            .iter()
            .filter(|m| !m.calendar_url.trim().is_empty())
            .map(|m| (m.name.as_str(), m.calendar_url.trim()))
            .collect()
    }

    /// Look up a member's color by name
    pub fn member_color(&self, name: &str) -> Option<&str> {
        self.family
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.color.as_str())
    }

    fn validate(&self) -> Result<()> {
        let Location {
            latitude,
            longitude,
        } = self.location;

        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ConfigError::Invalid(format!("latitude {} out of range", latitude)).into());
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(
                ConfigError::Invalid(format!("longitude {} out of range", longitude)).into(),
            );
        }

        let window_days = self.calendar.window_days;
        if !(1..=366).contains(&window_days) {
            return Err(ConfigError::Invalid(format!(
                "calendar window_days {} out of range (1-366)",
                window_days
            ))
            .into());
        }

        let mut names = std::collections::HashSet::new();
        for member in &self.family {
            if !names.insert(member.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate family member '{}'",
                    member.name
                ))
                .into());
            }
        }

        Ok(())
    }
}
