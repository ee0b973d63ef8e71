use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SettingsError;
use crate::fit::{FitBox, FitStrategy};
use crate::names::{NameLimits, OverlongPolicy};

/// Largest seed that survives a TOML round trip (integers are signed 64-bit)
pub const MAX_SEED: u64 = i64::MAX as u64;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub names: NamesSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub selection: SelectionSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamesSettings {
    /// Names file, relative paths resolve against the working directory
    pub file: String,
    pub max_entries: usize,
    pub max_entry_chars: usize,
    pub overlong: OverlongPolicy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Widest a called name may render, in points
    pub max_width: f32,
    pub max_font_size: u32,
    pub min_font_size: u32,
    pub fit_strategy: FitStrategy,
    /// Extra TTF/OTF added as a fallback, for scripts the built-in fonts lack
    pub font_file: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Fixed RNG seed; `None` seeds from OS entropy each run
    pub seed: Option<u64>,
}

impl Default for NamesSettings {
    fn default() -> Self {
        let limits = NameLimits::default();
        Self {
            file: "names.txt".to_string(),
            max_entries: limits.max_entries,
            max_entry_chars: limits.max_entry_chars,
            overlong: limits.overlong,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            max_width: 800.0,
            max_font_size: 60,
            min_font_size: 1,
            fit_strategy: FitStrategy::Linear,
            font_file: None,
        }
    }
}

impl NamesSettings {
    pub fn limits(&self) -> NameLimits {
        NameLimits {
            max_entries: self.max_entries,
            max_entry_chars: self.max_entry_chars,
            overlong: self.overlong,
        }
    }

    pub fn path(&self) -> PathBuf {
        PathBuf::from(self.file.trim())
    }
}

impl DisplaySettings {
    pub fn fit_box(&self) -> FitBox {
        FitBox {
            max_width: self.max_width,
            max_size: self.max_font_size,
            min_size: self.min_font_size,
        }
    }
}

pub struct SettingsLoadResult {
    pub settings: AppSettings,
    pub notice: Option<String>,
}

impl AppSettings {
    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("roll_call").join("settings.toml")
        } else {
            PathBuf::from("settings.toml")
        }
    }

    /// Load settings from the default config path, or return defaults if not found
    pub fn load_with_notice() -> SettingsLoadResult {
        Self::load_or_reset(&Self::config_path())
    }

    fn load_or_reset(path: &Path) -> SettingsLoadResult {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return SettingsLoadResult {
                settings: Self::default(),
                notice: None,
            };
        }

        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                SettingsLoadResult {
                    settings,
                    notice: None,
                }
            }
            Err(e) => {
                log::warn!("Unable to load settings at {}: {}", path.display(), e);
                let notice = match backup_settings_file(path) {
                    Some(backup_path) => format!(
                        "Settings file was reset due to an incompatible format. Backup saved to {}",
                        backup_path.display()
                    ),
                    None => "Settings file was reset due to an incompatible format.".to_string(),
                };
                SettingsLoadResult {
                    settings: Self::default(),
                    notice: Some(notice),
                }
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let mut settings: Self = toml::from_str(&content)?;
        settings.validate();
        Ok(settings)
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Clamp values that would make loading or fitting meaningless
    pub fn validate(&mut self) {
        self.names.max_entries = self.names.max_entries.max(1);
        self.names.max_entry_chars = self.names.max_entry_chars.max(1);
        if let Some(seed) = self.selection.seed.as_mut() {
            *seed = (*seed).min(MAX_SEED);
        }

        let display = &mut self.display;
        if !display.max_width.is_finite() || display.max_width <= 0.0 {
            display.max_width = DisplaySettings::default().max_width;
        }
        display.min_font_size = display.min_font_size.max(1);
        display.max_font_size = display.max_font_size.max(display.min_font_size);
        if display
            .font_file
            .as_deref()
            .is_some_and(|f| f.trim().is_empty())
        {
            display.font_file = None;
        }
    }
}

fn backup_settings_file(path: &Path) -> Option<PathBuf> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())?;
    let file_name = path.file_name()?.to_string_lossy();
    let backup_name = format!("{}.bak.{}", file_name, timestamp);
    let backup_path = path.with_file_name(backup_name);
    if std::fs::rename(path, &backup_path).is_ok() {
        Some(backup_path)
    } else {
        None
    }
}
