//! Configuration resolved once at startup.
//!
//! Search order: `--config`, then `./.garmin-dev.json`, `~/.garmin-dev.json`,
//! `/etc/garmin-dev.json`, then built-in defaults. Environment overrides are
//! applied last.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

pub const CONFIG_FILE_NAME: &str = ".garmin-dev.json";
pub const SYSTEM_CONFIG_PATH: &str = "/etc/garmin-dev.json";

pub const ENV_DEVICE: &str = "GARMIN_DEV_DEVICE";
pub const ENV_FORMAT: &str = "GARMIN_DEV_FORMAT";
pub const ENV_SDK: &str = "GARMIN_DEV_SDK";

const DEFAULT_DEVICE: &str = "fenix7";
const DEFAULT_FORMAT: &str = "xml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_device: String,
    pub sdk_path: Option<PathBuf>,
    pub output_format: String,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_device: DEFAULT_DEVICE.to_string(),
            sdk_path: None,
            output_format: DEFAULT_FORMAT.to_string(),
            verbose: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Where the resolved values came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Discovered(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Discovered(path) => {
                write!(f, "{}", path.display())
            }
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: Config,
    pub source: ConfigSource,
    /// Discovered files that were skipped, reported once logging is up.
    pub warnings: Vec<String>,
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

pub struct ConfigResolver {
    candidates: Vec<PathBuf>,
    sdk_roots: Vec<PathBuf>,
    env: EnvLookup,
}

impl ConfigResolver {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            sdk_roots: Vec::new(),
            env: Box::new(|_: &str| None),
        }
    }

    /// Standard search paths, SDK roots and the process environment.
    pub fn system() -> Self {
        Self::new(search_paths())
            .with_sdk_roots(sdk_roots())
            .with_env(|key| std::env::var(key).ok())
    }

    pub fn with_sdk_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.sdk_roots = roots;
        self
    }

    pub fn with_env(mut self, env: impl Fn(&str) -> Option<String> + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    pub fn resolve(&self, explicit: Option<&Path>) -> Result<ResolvedConfig, CliError> {
        let mut warnings = Vec::new();

        let (mut config, source) = match explicit {
            Some(path) => (Config::load(path)?, ConfigSource::Explicit(path.to_path_buf())),
            None => self.discover(&mut warnings),
        };

        self.apply_env(&mut config);

        if config.sdk_path.is_none() {
            config.sdk_path = detect_sdk(&self.sdk_roots);
        }

        Ok(ResolvedConfig {
            config,
            source,
            warnings,
        })
    }

    fn discover(&self, warnings: &mut Vec<String>) -> (Config, ConfigSource) {
        for path in self.candidates.iter().filter(|p| p.is_file()) {
            match Config::load(path) {
                Ok(config) => return (config, ConfigSource::Discovered(path.clone())),
                Err(err) => warnings.push(format!("skipping config: {}", err)),
            }
        }
        (Config::default(), ConfigSource::Defaults)
    }

    fn apply_env(&self, config: &mut Config) {
        let value = |key: &str| (self.env)(key).filter(|v| !v.trim().is_empty());

        if let Some(device) = value(ENV_DEVICE) {
            config.default_device = device;
        }
        if let Some(format) = value(ENV_FORMAT) {
            config.output_format = format;
        }
        if let Some(sdk) = value(ENV_SDK) {
            config.sdk_path = Some(PathBuf::from(sdk));
        }
    }
}

pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dirs) = BaseDirs::new() {
        paths.push(dirs.home_dir().join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(SYSTEM_CONFIG_PATH));
    paths
}

/// Known Connect IQ SDK install roots.
pub fn sdk_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(dirs) = BaseDirs::new() {
        roots.push(
            dirs.home_dir()
                .join("Library/Application Support/Garmin/ConnectIQ/Sdks"),
        );
    }
    roots.push(PathBuf::from("/opt/garmin-sdk"));
    roots.push(PathBuf::from("/usr/local/garmin-sdk"));
    roots
}

/// Newest SDK under the first root that has any: the lexicographically last
/// sub-directory.
pub fn detect_sdk(roots: &[PathBuf]) -> Option<PathBuf> {
    roots.iter().find_map(|root| {
        fs::read_dir(root)
            .ok()?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .max()
    })
}
