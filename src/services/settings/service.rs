use crate::models::settings::DisplaySettings;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "publish-date.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to the per-user config location
    pub fn from_default_location() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("com", "PostEditor", "PublishDate") {
            dirs.config_dir().join(CONFIG_FILE_NAME)
        } else {
            log::warn!("Unable to resolve project directory; using current dir for settings");
            PathBuf::from(CONFIG_FILE_NAME)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields the defaults
    pub fn load(&self) -> Result<DisplaySettings> {
        if !self.path.exists() {
            log::debug!(
                "No settings file at {}; using defaults",
                self.path.display()
            );
            return Ok(DisplaySettings::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read settings from {}", self.path.display()))?;
        let settings: DisplaySettings = toml::from_str(&data)
            .with_context(|| format!("failed to parse settings from {}", self.path.display()))?;

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        Ok(settings)
    }

    /// Load settings, logging and falling back to defaults on any failure
    pub fn load_or_default(&self) -> DisplaySettings {
        match self.load() {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("Failed to load settings: {err:?}");
                DisplaySettings::default()
            }
        }
    }

    pub fn save(&self, settings: &DisplaySettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create dir {}", parent.display()))?;
            }
        }

        let data = toml::to_string_pretty(settings)?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write settings to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::{DateFormat, TimeFormat};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("absent.toml"));
        assert_eq!(service.load().unwrap(), DisplaySettings::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "time_format = \"24h\"\n\n[translations]\nSchedule = \"Planifier\"\n",
        )
        .unwrap();

        let settings = SettingsService::new(&path).load().unwrap();
        assert_eq!(settings.time_format, TimeFormat::TwentyFourHour);
        assert_eq!(settings.date_format, DateFormat::MonthDayYear);
        assert_eq!(settings.translations["Schedule"], "Planifier");
    }

    #[test]
    fn test_unknown_format_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "time_format = \"36h\"\n").unwrap();

        let service = SettingsService::new(&path);
        let err = service.load().unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse settings"));
        assert_eq!(service.load_or_default(), DisplaySettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("nested").join(CONFIG_FILE_NAME));
        let settings = DisplaySettings {
            date_format: DateFormat::YearMonthDay,
            ..DisplaySettings::default()
        };

        service.save(&settings).unwrap();
        assert_eq!(service.load().unwrap(), settings);
    }
}
