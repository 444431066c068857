//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Generate `ReportConfig`
//!
//! Running without a configuration file is equivalent to loading an empty
//! one: every section falls back to the standard report defaults.
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("report.toml")).unwrap();
//! println!("Output: {}", config.output.path.display());
//! ```

mod parser;
mod validator;

pub use contracts::ReportConfig;
pub use parser::ConfigFormat;

use contracts::ReportError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File not found
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<ReportConfig, ReportError> {
        if !path.exists() {
            return Err(ReportError::missing_file(path));
        }
        let format = Self::detect_format(path)?;
        let content = std::fs::read_to_string(path)?;
        let config = Self::load_from_str(&content, format)?;
        tracing::debug!(path = %path.display(), ?format, "Configuration file loaded");
        Ok(config)
    }

    /// Load configuration from an optional path, falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<ReportConfig, ReportError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => {
                let config = ReportConfig::default();
                validator::validate(&config)?;
                Ok(config)
            }
        }
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<ReportConfig, ReportError> {
        let config = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }

    /// Validate a configuration built or modified in code
    pub fn validate(config: &ReportConfig) -> Result<(), ReportError> {
        validator::validate(config)
    }

    /// Serialize ReportConfig to TOML string
    pub fn to_toml(config: &ReportConfig) -> Result<String, ReportError> {
        toml::to_string_pretty(config)
            .map_err(|e| ReportError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize ReportConfig to JSON string
    pub fn to_json(config: &ReportConfig) -> Result<String, ReportError> {
        serde_json::to_string_pretty(config)
            .map_err(|e| ReportError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ReportError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ReportError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext)
            .ok_or_else(|| ReportError::config_parse(format!("unsupported config format: .{ext}")))
    }
}
