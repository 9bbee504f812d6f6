// Configuration for the rendering engine
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/attune/config.toml)
// 3. Built-in defaults (lowest priority)

use crate::selection::UserProfile;
use crate::theme::{ExperienceLevel, ThemeCategory};
use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Transition duration window in milliseconds. The engine derives the actual
/// duration from the target theme and clamps it into [min_ms, max_ms].
#[derive(Debug, Clone, Copy)]
pub struct TransitionConfig {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            min_ms: 240,
            max_ms: 2400,
        }
    }
}

impl TransitionConfig {
    /// Keep the window sane regardless of what the file says: both bounds in
    /// [100ms, 10s] and min <= max.
    fn sanitized(min_ms: u64, max_ms: u64) -> Self {
        let min_ms = min_ms.clamp(100, 10_000);
        let max_ms = max_ms.clamp(min_ms, 10_000);
        Self { min_ms, max_ms }
    }
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Never,
    Hourly,
    Daily,
}

impl LogRotation {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "never" => Some(LogRotation::Never),
            "hourly" => Some(LogRotation::Hourly),
            "daily" => Some(LogRotation::Daily),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogRotation::Never => "never",
            LogRotation::Hourly => "hourly",
            LogRotation::Daily => "daily",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Also write JSON logs to a rotating file
    pub file_enabled: bool,

    /// Directory for log files
    pub file_dir: PathBuf,

    /// Log file name prefix
    pub file_prefix: String,

    /// Rotation policy for the file appender
    pub file_rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "attune".to_string(),
            file_rotation: LogRotation::Daily,
        }
    }
}

/// Declared user profile as configured. Parsed into typed selection inputs
/// on demand; unknown values fall back to defaults with a warning.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Experience level: beginner, intermediate, advanced, expert
    pub level: String,

    /// Preferred theme categories, checked before the rest of the catalog
    pub preferred_categories: Vec<String>,

    /// Always substitute high-contrast variants
    pub high_contrast: bool,

    /// Session intention, e.g. "healing" or "meditation"
    pub intention: Option<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            level: "beginner".to_string(),
            preferred_categories: Vec::new(),
            high_contrast: false,
            intention: None,
        }
    }
}

impl ProfileConfig {
    pub fn to_profile(&self) -> UserProfile {
        let level = ExperienceLevel::parse(&self.level).unwrap_or_else(|| {
            tracing::warn!(level = %self.level, "unknown experience level, using beginner");
            ExperienceLevel::Beginner
        });
        let preferred_categories = self
            .preferred_categories
            .iter()
            .filter_map(|c| {
                let parsed = ThemeCategory::parse(c);
                if parsed.is_none() {
                    tracing::warn!(category = %c, "unknown theme category, ignoring");
                }
                parsed
            })
            .collect();
        UserProfile {
            level,
            preferred_categories,
            high_contrast: self.high_contrast,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit theme id; None lets the selection cascade pick one
    pub theme: Option<String>,

    /// Demo mode: run the scripted telemetry walk instead of waiting for
    /// a live producer
    pub demo_mode: bool,

    /// Hard ceiling on the render loop frame rate
    pub fps_cap: u8,

    /// Fixed hour (0-23) overriding wall-clock time-of-day bucketing
    pub time_of_day: Option<u8>,

    /// Transition duration window
    pub transition: TransitionConfig,

    /// Declared user profile
    pub profile: ProfileConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Transition window as loaded from config file
#[derive(Debug, Deserialize, Default)]
struct FileTransition {
    min_ms: Option<u64>,
    max_ms: Option<u64>,
}

/// Profile section as loaded from config file
#[derive(Debug, Deserialize, Default)]
struct FileProfile {
    level: Option<String>,
    preferred_categories: Option<Vec<String>>,
    high_contrast: Option<bool>,
    intention: Option<String>,
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_prefix: Option<String>,
    file_rotation: Option<String>,
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    theme: Option<String>,
    fps_cap: Option<u8>,
    time_of_day: Option<u8>,

    /// Optional [transition] section
    transition: Option<FileTransition>,

    /// Optional [profile] section
    profile: Option<FileProfile>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/attune/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("attune").join("config.toml"))
    }

    /// Create config template if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Create parent directory
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        let template = r#"# attune configuration
# Uncomment and modify options as needed

# Explicit theme id (default: auto-selected from profile and time of day)
# Run `attune themes` for the list
# theme = "consciousness-default"

# Hard ceiling on the render loop frame rate (default: 10)
# fps_cap = 10

# Fix the time-of-day bucket to a specific hour 0-23 instead of the clock
# time_of_day = 22

# Transition duration window in milliseconds
# [transition]
# min_ms = 240
# max_ms = 2400

# User profile feeding theme auto-selection
# [profile]
# level = "beginner"             # beginner, intermediate, advanced, expert
# preferred_categories = []      # e.g. ["meditation", "healing"]
# high_contrast = false          # always substitute high-contrast variants
# intention = ""                 # e.g. "healing"

# Logging configuration
# [logging]
# level = "info"        # trace, debug, info, warn, error (RUST_LOG overrides)
# file_enabled = false  # also write JSON logs to a rotating file
# file_dir = "./logs"
# file_prefix = "attune"
# file_rotation = "daily"  # never, hourly, daily
"#;

        // Write template (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                FileConfig::default()
            }),
            Err(_) => FileConfig::default(), // File doesn't exist, use defaults
        }
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# attune configuration

# Explicit theme id; comment out for auto-selection
{theme_line}

# Hard ceiling on the render loop frame rate
fps_cap = {fps_cap}

# Fixed time-of-day hour; comment out to follow the clock
{tod_line}

# Transition duration window in milliseconds
[transition]
min_ms = {min_ms}
max_ms = {max_ms}

# User profile feeding theme auto-selection
[profile]
level = "{level}"
preferred_categories = {categories:?}
high_contrast = {high_contrast}
{intention_line}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_prefix = "{file_prefix}"
file_rotation = "{file_rotation}"
"#,
            theme_line = match &self.theme {
                Some(t) => format!("theme = \"{t}\""),
                None => "# theme = \"consciousness-default\"".to_string(),
            },
            fps_cap = self.fps_cap,
            tod_line = match self.time_of_day {
                Some(h) => format!("time_of_day = {h}"),
                None => "# time_of_day = 22".to_string(),
            },
            min_ms = self.transition.min_ms,
            max_ms = self.transition.max_ms,
            level = self.profile.level,
            categories = self.profile.preferred_categories,
            high_contrast = self.profile.high_contrast,
            intention_line = match &self.profile.intention {
                Some(i) => format!("intention = \"{i}\""),
                None => "# intention = \"healing\"".to_string(),
            },
            log_level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_prefix = self.logging.file_prefix,
            file_rotation = self.logging.file_rotation.as_str(),
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        Self::from_file_config(Self::load_file_config())
    }

    /// Apply environment overrides on top of a file config.
    fn from_file_config(file: FileConfig) -> Self {
        // Theme: env > file > auto-selection
        let theme = std::env::var("ATTUNE_THEME").ok().or(file.theme);

        // Demo mode: env only (runtime flag)
        let demo_mode = std::env::var("ATTUNE_DEMO")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        // Frame rate cap: env > file > default
        let fps_cap = std::env::var("ATTUNE_FPS_CAP")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.fps_cap)
            .unwrap_or(10)
            .clamp(1, 30);

        // Time-of-day override: env > file, clock otherwise
        let time_of_day = std::env::var("ATTUNE_TIME_OF_DAY")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.time_of_day)
            .filter(|h| *h <= 23);

        // Transition window: file only
        let file_transition = file.transition.unwrap_or_default();
        let defaults = TransitionConfig::default();
        let transition = TransitionConfig::sanitized(
            file_transition.min_ms.unwrap_or(defaults.min_ms),
            file_transition.max_ms.unwrap_or(defaults.max_ms),
        );

        // Profile: env overrides for the flags assistive setups export,
        // everything else from the file
        let file_profile = file.profile.unwrap_or_default();
        let high_contrast = std::env::var("ATTUNE_HIGH_CONTRAST")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .ok()
            .or(file_profile.high_contrast)
            .unwrap_or(false);
        let intention = std::env::var("ATTUNE_INTENTION").ok().or(file_profile.intention);
        let profile = ProfileConfig {
            level: file_profile.level.unwrap_or_else(|| "beginner".to_string()),
            preferred_categories: file_profile.preferred_categories.unwrap_or_default(),
            high_contrast,
            intention,
        };

        // Logging settings: file config only (RUST_LOG env var handled in logging.rs)
        let file_logging = file.logging.unwrap_or_default();
        let logging_defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level: file_logging.level.unwrap_or(logging_defaults.level),
            file_enabled: file_logging.file_enabled.unwrap_or(logging_defaults.file_enabled),
            file_dir: file_logging
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(logging_defaults.file_dir),
            file_prefix: file_logging.file_prefix.unwrap_or(logging_defaults.file_prefix),
            file_rotation: file_logging
                .file_rotation
                .as_deref()
                .and_then(LogRotation::parse)
                .unwrap_or(logging_defaults.file_rotation),
        };

        Self {
            theme,
            demo_mode,
            fps_cap,
            time_of_day,
            transition,
            profile,
            logging,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            demo_mode: false,
            fps_cap: 10,
            time_of_day: None,
            transition: TransitionConfig::default(),
            profile: ProfileConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // from_file_config reads ATTUNE_* vars, so tests exercising it must not
    // interleave with the env-mutating test
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.fps_cap, 10);
        assert_eq!(config.transition.min_ms, 240);
        assert_eq!(config.transition.max_ms, 2400);
        assert!(!config.demo_mode);
        assert!(config.theme.is_none());
    }

    #[test]
    fn transition_window_is_sanitized() {
        let t = TransitionConfig::sanitized(10, 5_000_000);
        assert_eq!(t.min_ms, 100);
        assert_eq!(t.max_ms, 10_000);

        // min above max pulls max up to min
        let t = TransitionConfig::sanitized(3000, 500);
        assert_eq!(t.min_ms, 3000);
        assert_eq!(t.max_ms, 3000);
    }

    #[test]
    fn rotation_parses_known_values() {
        assert_eq!(LogRotation::parse("daily"), Some(LogRotation::Daily));
        assert_eq!(LogRotation::parse("HOURLY"), Some(LogRotation::Hourly));
        assert_eq!(LogRotation::parse("never"), Some(LogRotation::Never));
        assert_eq!(LogRotation::parse("weekly"), None);
    }

    #[test]
    fn file_values_layer_over_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let file: FileConfig = toml::from_str(
            r#"
theme = "deep-meditation"
fps_cap = 4

[transition]
min_ms = 500

[profile]
level = "expert"
high_contrast = true

[logging]
level = "debug"
file_rotation = "hourly"
"#,
        )
        .unwrap();

        let config = Config::from_file_config(file);
        assert_eq!(config.theme.as_deref(), Some("deep-meditation"));
        assert_eq!(config.fps_cap, 4);
        assert_eq!(config.transition.min_ms, 500);
        assert_eq!(config.transition.max_ms, 2400);
        assert_eq!(config.profile.level, "expert");
        assert!(config.profile.high_contrast);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file_rotation, LogRotation::Hourly);
    }

    #[test]
    fn env_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("ATTUNE_THEME", "sacred-geometry");
        std::env::set_var("ATTUNE_FPS_CAP", "3");

        let file: FileConfig = toml::from_str(r#"theme = "gentle-healing""#).unwrap();
        let config = Config::from_file_config(file);
        assert_eq!(config.theme.as_deref(), Some("sacred-geometry"));
        assert_eq!(config.fps_cap, 3);

        std::env::remove_var("ATTUNE_THEME");
        std::env::remove_var("ATTUNE_FPS_CAP");
    }

    #[test]
    fn profile_parses_into_typed_selection_inputs() {
        let profile = ProfileConfig {
            level: "advanced".to_string(),
            preferred_categories: vec!["meditation".to_string(), "bogus".to_string()],
            high_contrast: true,
            intention: None,
        };
        let typed = profile.to_profile();
        assert_eq!(typed.level, ExperienceLevel::Advanced);
        assert_eq!(typed.preferred_categories, vec![ThemeCategory::Meditation]);
        assert!(typed.high_contrast);
    }

    #[test]
    fn to_toml_round_trips_through_file_parser() {
        let mut config = Config::default();
        config.theme = Some("earth-grounding".to_string());
        config.fps_cap = 6;
        config.time_of_day = Some(22);
        config.profile.intention = Some("grounding".to_string());

        let file: FileConfig = toml::from_str(&config.to_toml()).unwrap();
        assert_eq!(file.theme.as_deref(), Some("earth-grounding"));
        assert_eq!(file.fps_cap, Some(6));
        assert_eq!(file.time_of_day, Some(22));
        let profile = file.profile.unwrap();
        assert_eq!(profile.intention.as_deref(), Some("grounding"));
    }
}
