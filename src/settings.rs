use std::path::PathBuf;

use crate::theme::ThemeMode;

pub const MIN_CELL_SIZE: f32 = 14.0;
pub const MAX_CELL_SIZE: f32 = 64.0;

/// UI preferences that persist across sessions.
///
/// Launch dimensions are deliberately not part of this; every window opens on
/// the defaults (or whatever the command line passed).
#[derive(Clone, Debug, PartialEq)]
pub struct AppSettings {
    pub theme_mode: ThemeMode,
    /// Language code (e.g. "en", "es"). Empty string = auto-detect system language.
    pub language: String,
    /// Draw the linear index inside each cell.
    pub show_labels: bool,
    /// Edge length of a matrix cell in points.
    pub cell_size: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::Dark,
            language: String::new(),
            show_labels: true,
            cell_size: 30.0,
        }
    }
}

impl AppSettings {
    /// Path to the settings file.
    /// On Linux:   ~/.config/cudaviz/cudaviz_settings.cfg  (XDG_CONFIG_HOME respected)
    /// On Windows: %APPDATA%\CudaViz\cudaviz_settings.cfg
    /// On macOS:   ~/Library/Application Support/CudaViz/cudaviz_settings.cfg
    /// Fallback:   same directory as the executable.
    pub(crate) fn settings_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            let config_dir = std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
                    PathBuf::from(home).join(".config")
                })
                .join("cudaviz");
            let _ = std::fs::create_dir_all(&config_dir);
            return Some(config_dir.join("cudaviz_settings.cfg"));
        }
        #[cfg(target_os = "windows")]
        {
            let appdata = std::env::var("APPDATA")
                .or_else(|_| std::env::var("USERPROFILE"))
                .ok()?;
            let config_dir = PathBuf::from(appdata).join("CudaViz");
            let _ = std::fs::create_dir_all(&config_dir);
            return Some(config_dir.join("cudaviz_settings.cfg"));
        }
        #[cfg(target_os = "macos")]
        {
            let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
            let config_dir = PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("CudaViz");
            let _ = std::fs::create_dir_all(&config_dir);
            return Some(config_dir.join("cudaviz_settings.cfg"));
        }
        #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
        {
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join("cudaviz_settings.cfg")))
        }
    }

    pub fn to_config_string(&self) -> String {
        let mode_str = match self.theme_mode {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        format!(
            "theme_mode={mode_str}\n\
             language={}\n\
             show_labels={}\n\
             cell_size={}\n",
            self.language, self.show_labels, self.cell_size,
        )
    }

    /// Parse settings text. Unknown keys and malformed values keep their defaults.
    pub fn from_config_str(content: &str) -> Self {
        let mut s = Self::default();
        for line in content.lines() {
            let Some((key, val)) = line.split_once('=') else { continue };
            let val = val.trim();
            match key.trim() {
                "theme_mode" => {
                    s.theme_mode = match val {
                        "light" => ThemeMode::Light,
                        _ => ThemeMode::Dark,
                    };
                }
                "language" => s.language = val.to_string(),
                "show_labels" => s.show_labels = val != "false",
                "cell_size" => {
                    if let Ok(size) = val.parse::<f32>()
                        && size.is_finite()
                    {
                        s.cell_size = size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
                    }
                }
                _ => {}
            }
        }
        s
    }

    /// Save settings to disk.
    pub fn save(&self) {
        let Some(path) = Self::settings_path() else { return };
        match std::fs::write(&path, self.to_config_string()) {
            Ok(()) => crate::log_info!("Settings saved to {}", path.display()),
            Err(e) => crate::log_warn!("Could not save settings to {}: {}", path.display(), e),
        }
    }

    /// Load settings from disk (returns default if file missing or corrupt).
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else { return Self::default() };
        let Ok(content) = std::fs::read_to_string(&path) else { return Self::default() };
        Self::from_config_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_text_round_trip() {
        let s = AppSettings {
            theme_mode: ThemeMode::Light,
            language: "es".to_string(),
            show_labels: false,
            cell_size: 22.0,
        };
        assert_eq!(AppSettings::from_config_str(&s.to_config_string()), s);
    }

    #[test]
    fn corrupt_values_keep_defaults() {
        let s = AppSettings::from_config_str("cell_size=huge\nnonsense\ntheme_mode=purple\n");
        assert_eq!(s, AppSettings::default());
    }

    #[test]
    fn cell_size_is_clamped() {
        assert_eq!(AppSettings::from_config_str("cell_size=2").cell_size, MIN_CELL_SIZE);
        assert_eq!(AppSettings::from_config_str("cell_size=500").cell_size, MAX_CELL_SIZE);
    }
}
