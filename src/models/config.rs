use colormap_match::{DEFAULT_CM_THRESH, DEFAULT_MAX_DIFF, DEFAULT_SAMPLES};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable naming the default config file.
pub const CONFIG_ENV: &str = "RAINBOW_SCAN_CONFIG";

/// Detection parameters, loaded from an optional YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DetectConfig {
    /// Maximum CAM02-UCS distance for a page color to match a reference sample
    #[serde(default = "default_max_diff")]
    pub max_diff: f64,

    /// Minimum rainbow coverage (exclusive) to flag a page
    #[serde(default = "default_cm_thresh")]
    pub cm_thresh: f64,

    /// Samples taken along each reference gradient
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Timeout for URL inputs
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Separator before the page number in page ids
    #[serde(default = "default_separator")]
    pub page_separator: char,
}

fn default_max_diff() -> f64 {
    DEFAULT_MAX_DIFF
}

fn default_cm_thresh() -> f64 {
    DEFAULT_CM_THRESH
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_separator() -> char {
    '-'
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            max_diff: default_max_diff(),
            cm_thresh: default_cm_thresh(),
            samples: default_samples(),
            fetch_timeout_secs: default_fetch_timeout(),
            page_separator: default_separator(),
        }
    }
}

impl DetectConfig {
    /// Load from `path`, or from `$RAINBOW_SCAN_CONFIG`, or use defaults.
    ///
    /// An explicitly named file that cannot be read or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match path.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_file(&path),
            None => {
                tracing::debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            error,
        })?;
        let config = Self::from_yaml(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            max_diff = config.max_diff,
            cm_thresh = config.cm_thresh,
            samples = config.samples,
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Reject values that would make every page match or none.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples < 2 {
            return Err(ConfigError::Invalid(format!(
                "samples must be at least 2, got {}",
                self.samples
            )));
        }
        if !(self.max_diff > 0.0 && self.max_diff.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "max_diff must be positive, got {}",
                self.max_diff
            )));
        }
        if !(0.0..1.0).contains(&self.cm_thresh) {
            return Err(ConfigError::Invalid(format!(
                "cm_thresh must be in [0, 1), got {}",
                self.cm_thresh
            )));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(
        mut self,
        max_diff: Option<f64>,
        cm_thresh: Option<f64>,
        samples: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if let Some(v) = max_diff {
            self.max_diff = v;
        }
        if let Some(v) = cm_thresh {
            self.cm_thresh = v;
        }
        if let Some(v) = samples {
            self.samples = v;
        }
        self.validate()?;
        Ok(self)
    }
}
