#![deny(clippy::all)]

pub mod commands;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod plugins;
pub mod telemetry;

pub use commands::Cli;
pub use config::Config;
pub use config::ConfigResolver;
pub use error::CliError;
pub use plugins::Plugin;
pub use plugins::PluginContext;
pub use plugins::PluginRegistry;
