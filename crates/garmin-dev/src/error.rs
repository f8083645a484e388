//! CLI errors with categories, suggestions and sysexits.h exit codes.

use std::io;
use std::path::PathBuf;

use garmin_dev_common::Colors;
use garmin_dev_common::ErrorCategory;
use garmin_dev_core::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Cannot open input {}: {source}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Plugin '{0}' is not available in this build")]
    PluginUnavailable(String),

    #[error("Unknown command '{name}'")]
    UnknownCommand {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("Invalid config file {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

impl CliError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CliError::Usage(_) | CliError::UnknownCommand { .. } => ErrorCategory::InvalidInput,
            CliError::InputUnavailable { .. } => ErrorCategory::NotFound,
            CliError::Io { .. } => ErrorCategory::External,
            CliError::Engine(EngineError::UnsupportedFormat { .. }) => ErrorCategory::InvalidInput,
            CliError::Engine(EngineError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                ErrorCategory::BadData
            }
            CliError::Engine(EngineError::Io(_)) => ErrorCategory::External,
            CliError::Engine(EngineError::Encode(_)) => ErrorCategory::BadData,
            CliError::Engine(EngineError::Cancelled) => ErrorCategory::Interrupted,
            CliError::PluginUnavailable(_) => ErrorCategory::Unavailable,
            CliError::Config { .. } => ErrorCategory::Config,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            CliError::Usage(_) => {
                Some("Run with --help to see the accepted arguments.".to_string())
            }
            CliError::InputUnavailable { .. } => {
                Some("Check the --input path, or omit it to read the log from stdin.".to_string())
            }
            CliError::Io { .. } => None,
            CliError::Engine(EngineError::UnsupportedFormat { supported, .. }) => Some(format!(
                "Use --format with one of: {}",
                supported.join(", ")
            )),
            CliError::Engine(EngineError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                Some("The log must be UTF-8 text.".to_string())
            }
            CliError::Engine(EngineError::Cancelled) => {
                Some("Capture was interrupted; no output was written.".to_string())
            }
            CliError::Engine(_) => None,
            CliError::PluginUnavailable(_) => {
                Some(
                    "Run 'garmin-dev --list-plugins' to see which plugins are available."
                        .to_string(),
                )
            }
            CliError::UnknownCommand { available, .. } => {
                Some(format!("Available commands: {}", available.join(", ")))
            }
            CliError::Config { .. } => {
                Some("Fix the JSON in the config file or pass a different --config.".to_string())
            }
        }
    }

    /// Print `Error:` and `Suggestion:` lines to stderr.
    pub fn report(&self) {
        eprintln!("{} {}", Colors::error("Error:"), self);
        if let Some(suggestion) = self.suggestion() {
            eprintln!("{} {}", Colors::dim("Suggestion:"), suggestion);
        }
    }
}
