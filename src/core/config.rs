//! Configuration module for `KtuAnalytics`

use crate::core::error::CurriculumError;
use crate::core::models::Curriculum;
use crate::core::pipeline::DEFAULT_MAX_INPUT_BYTES;
use crate::core::report::WorkbookFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in path-like values
const DIR_VARIABLE: &str = "$KTU_ANALYTICS";

const fn default_topper_threshold() -> f64 {
    9.0
}

const fn default_max_input_bytes() -> usize {
    DEFAULT_MAX_INPUT_BYTES
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for generated workbooks
    #[serde(default)]
    pub reports_dir: String,
    /// Curriculum tables to use instead of the built-in ones (empty = built-in)
    #[serde(default)]
    pub curriculum_file: String,
}

/// Report generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format (`xlsx` or `markdown`)
    #[serde(default)]
    pub format: String,
    /// Minimum SGPA for the topper list
    #[serde(default = "default_topper_threshold")]
    pub topper_threshold: f64,
    /// Largest accepted input file, in bytes
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: String::new(),
            topper_threshold: default_topper_threshold(),
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override curriculum tables file
    pub curriculum_file: Option<String>,
}

impl Config {
    /// Get the `$KTU_ANALYTICS` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/ktuanalytics`
    /// - macOS: `~/Library/Application Support/ktuanalytics`
    /// - Windows: `%APPDATA%\ktuanalytics`
    #[must_use]
    pub fn get_ktuanalytics_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ktuanalytics")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled in; numeric report settings get their defaults from serde.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }
        if self.paths.curriculum_file.is_empty() && !defaults.paths.curriculum_file.is_empty() {
            self.paths
                .curriculum_file
                .clone_from(&defaults.paths.curriculum_file);
            changed = true;
        }

        if self.report.format.is_empty() && !defaults.report.format.is_empty() {
            self.report.format.clone_from(&defaults.report.format);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides affect this run only; the config file is not touched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
        if let Some(curriculum_file) = &overrides.curriculum_file {
            self.paths.curriculum_file.clone_from(curriculum_file);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_ktuanalytics_dir`](Self::get_ktuanalytics_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_ktuanalytics_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$KTU_ANALYTICS` to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_ktuanalytics_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Expands `$KTU_ANALYTICS` in path values. Missing fields use their serde
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);
        config.paths.curriculum_file = Self::expand_variables(&config.paths.curriculum_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML or cannot be parsed.
    /// This should never happen in practice since the defaults are compiled into the binary.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from defaults,
    ///   and save it back when anything was added
    /// - Otherwise (first run): write the defaults to the config file
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to an explicit path
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created or the file
    /// cannot be written
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `reports_dir`,
    /// `curriculum_file`, `format`, `topper_threshold`, `max_input_bytes`
    /// (dashes are accepted in place of underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "curriculum_file" | "curriculum-file" => Some(self.paths.curriculum_file.clone()),
            "format" => Some(self.report.format.clone()),
            "topper_threshold" | "topper-threshold" => {
                Some(self.report.topper_threshold.to_string())
            }
            "max_input_bytes" | "max-input-bytes" => Some(self.report.max_input_bytes.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Values are validated: `verbose` must be a boolean, `format` a known
    /// workbook format, `topper_threshold` a number between 0 and 10, and
    /// `max_input_bytes` a positive integer.
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value is invalid
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "curriculum_file" | "curriculum-file" => {
                self.paths.curriculum_file = value.to_string();
            }
            "format" => {
                let format: WorkbookFormat = value.parse()?;
                self.report.format = format.to_string();
            }
            "topper_threshold" | "topper-threshold" => {
                let threshold = value
                    .parse::<f64>()
                    .ok()
                    .filter(|t| (0.0..=10.0).contains(t))
                    .ok_or_else(|| {
                        format!("Invalid topper threshold: '{value}' (expected 0 to 10)")
                    })?;
                self.report.topper_threshold = threshold;
            }
            "max_input_bytes" | "max-input-bytes" => {
                let bytes = value
                    .parse::<usize>()
                    .ok()
                    .filter(|b| *b > 0)
                    .ok_or_else(|| format!("Invalid byte limit: '{value}'"))?;
                self.report.max_input_bytes = bytes;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "curriculum_file" | "curriculum-file" => self
                .paths
                .curriculum_file
                .clone_from(&defaults.paths.curriculum_file),
            "format" => self.report.format.clone_from(&defaults.report.format),
            "topper_threshold" | "topper-threshold" => {
                self.report.topper_threshold = defaults.report.topper_threshold;
            }
            "max_input_bytes" | "max-input-bytes" => {
                self.report.max_input_bytes = defaults.report.max_input_bytes;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Configured output format, `xlsx` when unset
    ///
    /// # Errors
    /// Returns an error if the configured format is not recognized
    pub fn workbook_format(&self) -> Result<WorkbookFormat, String> {
        if self.report.format.is_empty() {
            Ok(WorkbookFormat::default())
        } else {
            self.report.format.parse()
        }
    }

    /// Curriculum tables from `paths.curriculum_file`, or the built-in tables when unset
    ///
    /// # Errors
    /// Returns an error if the configured file cannot be read or parsed
    pub fn curriculum(&self) -> Result<Curriculum, CurriculumError> {
        if self.paths.curriculum_file.is_empty() {
            Ok(Curriculum::from_defaults())
        } else {
            Curriculum::from_file(Path::new(&self.paths.curriculum_file))
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;
        writeln!(f, "  curriculum_file = \"{}\"", self.paths.curriculum_file)?;

        writeln!(f, "\n[report]")?;
        writeln!(f, "  format = \"{}\"", self.report.format)?;
        writeln!(f, "  topper_threshold = {}", self.report.topper_threshold)?;
        writeln!(f, "  max_input_bytes = {}", self.report.max_input_bytes)?;

        Ok(())
    }
}
