//! # Recovery Configuration
//!
//! Configuration for the recovery library and CLI. Supports config files,
//! environment variables and command-line overrides.
//!
//! Precedence (highest to lowest):
//! 1. Command-line flags (applied by the CLI after loading)
//! 2. Environment variables (`SFN_RECOVER_*`)
//! 3. Config file
//! 4. Default values
//!
//! AWS credentials are never read here; the SDK's default provider chain
//! resolves them, along with `AWS_REGION` / `AWS_PROFILE` when the config
//! leaves those unset.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{RecoverError, RecoverResult};
use crate::types::{parse_timestamp, TimeWindow};

/// Page size requested from the listing API; also the service maximum.
pub const DEFAULT_PAGE_SIZE: i32 = 1000;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "SFN_RECOVER_CONFIG";

/// Configuration for recovery runs
///
/// # Examples
///
/// ```rust
/// use sfn_recover::config::RecoverConfig;
///
/// let config = RecoverConfig::default();
/// assert_eq!(config.recovery.page_size, 1000);
/// assert!(config.recovery.state_machine_arn.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoverConfig {
    /// AWS client settings
    pub aws: AwsConfig,
    /// Target and filtering settings
    pub recovery: RecoveryConfig,
}

/// AWS client overrides. Unset values fall back to the SDK defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    /// Alternate endpoint, e.g. a local Step Functions emulator
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// State machine whose executions are recovered
    pub state_machine_arn: Option<String>,
    /// Page size hint sent with every listing call
    pub page_size: i32,
    /// Lower start-time bound in Unix seconds, 0 for none
    pub from_timestamp: i64,
    /// Upper start-time bound in Unix seconds, 0 for none
    pub to_timestamp: i64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            state_machine_arn: None,
            page_size: DEFAULT_PAGE_SIZE,
            from_timestamp: 0,
            to_timestamp: 0,
        }
    }
}

impl RecoveryConfig {
    pub fn time_window(&self) -> TimeWindow {
        TimeWindow::from_unix(self.from_timestamp, self.to_timestamp)
    }

    /// The configured state machine ARN, or an error if none was given
    pub fn require_state_machine_arn(&self) -> RecoverResult<&str> {
        self.state_machine_arn
            .as_deref()
            .filter(|arn| !arn.is_empty())
            .ok_or_else(|| {
                RecoverError::config_error(
                    "No state machine ARN configured (use --state-machine-arn or SFN_RECOVER_STATE_MACHINE_ARN)",
                )
            })
    }
}

impl RecoverConfig {
    /// Load configuration from the discovered config file and environment
    pub fn load() -> RecoverResult<Self> {
        Self::load_with_path(None)
    }

    /// Load configuration, reading `path` instead of searching for a file.
    ///
    /// Values are not range-checked here so that later overrides (CLI flags)
    /// can still correct them; call [`RecoverConfig::validate`] once all
    /// layers are applied.
    pub fn load_with_path(path: Option<&Path>) -> RecoverResult<Self> {
        let config_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::find_config_file(),
        };

        let mut config = match config_path {
            Some(ref p) => {
                debug!("Loading config from: {}", p.display());
                Self::load_from_file(p)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides()?;

        debug!("Loaded recovery configuration: {:?}", config);
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> RecoverResult<Self> {
        if !path.is_file() {
            return Err(RecoverError::config_error(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path).format(::config::FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize().map_err(|e| {
            RecoverError::config_error(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(config)
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }

        let mut possible_paths = vec![
            PathBuf::from("./sfn-recover.toml"),
            PathBuf::from("./config/sfn-recover.toml"),
        ];
        if let Some(home) = dirs::home_dir() {
            possible_paths.push(home.join(".sfn-recover").join("config.toml"));
        }
        if let Some(config_dir) = dirs::config_dir() {
            possible_paths.push(config_dir.join("sfn-recover").join("config.toml"));
        }

        possible_paths.into_iter().find(|p| p.is_file())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> RecoverResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup using the `SFN_RECOVER_*` names
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> RecoverResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(arn) = lookup("SFN_RECOVER_STATE_MACHINE_ARN") {
            self.recovery.state_machine_arn = Some(arn);
        }
        if let Some(size) = lookup("SFN_RECOVER_PAGE_SIZE") {
            self.recovery.page_size = size.parse().map_err(|e| {
                RecoverError::config_error(format!("Invalid SFN_RECOVER_PAGE_SIZE '{size}': {e}"))
            })?;
        }
        if let Some(from) = lookup("SFN_RECOVER_FROM") {
            self.recovery.from_timestamp = parse_timestamp(&from)?;
        }
        if let Some(to) = lookup("SFN_RECOVER_TO") {
            self.recovery.to_timestamp = parse_timestamp(&to)?;
        }

        if let Some(region) = lookup("SFN_RECOVER_REGION") {
            self.aws.region = Some(region);
        }
        if let Some(profile) = lookup("SFN_RECOVER_PROFILE") {
            self.aws.profile = Some(profile);
        }
        if let Some(endpoint) = lookup("SFN_RECOVER_ENDPOINT_URL") {
            self.aws.endpoint_url = Some(endpoint);
        }

        Ok(())
    }

    /// Check value ranges. The state machine ARN is checked when a command
    /// needs it, so `config show` works without one.
    pub fn validate(&self) -> RecoverResult<()> {
        let recovery = &self.recovery;

        if !(1..=DEFAULT_PAGE_SIZE).contains(&recovery.page_size) {
            return Err(RecoverError::config_error(format!(
                "page_size must be between 1 and {}, got {}",
                DEFAULT_PAGE_SIZE, recovery.page_size
            )));
        }
        if recovery.from_timestamp < 0 || recovery.to_timestamp < 0 {
            return Err(RecoverError::config_error(
                "time window bounds must be non-negative Unix timestamps",
            ));
        }
        if recovery.from_timestamp != 0
            && recovery.to_timestamp != 0
            && recovery.from_timestamp > recovery.to_timestamp
        {
            return Err(RecoverError::config_error(format!(
                "time window is empty: from {} is after to {}",
                recovery.from_timestamp, recovery.to_timestamp
            )));
        }

        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> RecoverResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| RecoverError::config_error(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> RecoverResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RecoverError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = self.to_toml_string()?;

        std::fs::write(path, content).map_err(|e| {
            RecoverError::config_error(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get default config file path
    pub fn default_config_path() -> RecoverResult<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| RecoverError::config_error("Could not determine home directory"))?;

        Ok(home_dir.join(".sfn-recover").join("config.toml"))
    }
}
