use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::CoreError;
use crate::utils::paths;

const TMP_SUFFIX: &str = "tmp";

/// Default number of days ahead of today an appointment may be booked.
pub const DEFAULT_BOOKING_HORIZON_DAYS: u32 = 30;
const MAX_BOOKING_HORIZON_DAYS: u32 = 365;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub booking_horizon_days: u32,
    pub screen_reader_mode: bool,
    pub high_contrast_mode: bool,
    pub quiet_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            booking_horizon_days: DEFAULT_BOOKING_HORIZON_DAYS,
            screen_reader_mode: false,
            high_contrast_mode: false,
            quiet_mode: false,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 4] = [
        "booking_horizon_days",
        "screen_reader_mode",
        "high_contrast_mode",
        "quiet_mode",
    ];

    /// Applies a single `key = value` update, validating the value first.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        match key.trim().to_ascii_lowercase().as_str() {
            "booking_horizon_days" => {
                let days: u32 = value.trim().parse().map_err(|_| {
                    CoreError::InvalidConfig("booking_horizon_days must be a whole number".into())
                })?;
                if days == 0 || days > MAX_BOOKING_HORIZON_DAYS {
                    return Err(CoreError::InvalidConfig(format!(
                        "booking_horizon_days must be between 1 and {}",
                        MAX_BOOKING_HORIZON_DAYS
                    )));
                }
                self.booking_horizon_days = days;
            }
            "screen_reader_mode" => self.screen_reader_mode = parse_flag(key, value)?,
            "high_contrast_mode" => self.high_contrast_mode = parse_flag(key, value)?,
            "quiet_mode" => self.quiet_mode = parse_flag(key, value)?,
            other => {
                return Err(CoreError::InvalidConfig(format!(
                    "unknown config key `{}` (expected one of: {})",
                    other,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.booking_horizon_days == 0 || self.booking_horizon_days > MAX_BOOKING_HORIZON_DAYS
        {
            return Err(CoreError::InvalidConfig(format!(
                "booking_horizon_days must be between 1 and {}",
                MAX_BOOKING_HORIZON_DAYS
            )));
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, CoreError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(CoreError::InvalidConfig(format!("{} expects on/off", key))),
    }
}

/// Loads and stores [`Config`] as JSON inside the application data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, CoreError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, CoreError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: Config = serde_json::from_str(&data)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), CoreError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_returns_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.booking_horizon_days, 30);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("booking_horizon_days", "14").unwrap();
        config.set("quiet_mode", "on").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.booking_horizon_days, 14);
        assert!(loaded.quiet_mode);
        assert!(!manager.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn set_rejects_out_of_range_horizon() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("booking_horizon_days", "0"),
            Err(CoreError::InvalidConfig(_))
        ));
        assert!(config.set("booking_horizon_days", "400").is_err());
        assert!(config.set("booking_horizon_days", "soon").is_err());
        assert_eq!(config.booking_horizon_days, 30);
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_flags() {
        let mut config = Config::default();
        assert!(config.set("theme", "dark").is_err());
        assert!(config.set("quiet_mode", "maybe").is_err());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "quiet_mode": true }"#).unwrap();
        let config = manager.load().unwrap();
        assert!(config.quiet_mode);
        assert_eq!(config.booking_horizon_days, DEFAULT_BOOKING_HORIZON_DAYS);
    }
}
