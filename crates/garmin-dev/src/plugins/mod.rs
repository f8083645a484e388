//! Command dispatch table.
//!
//! Every command is a [`Plugin`] registered at build time. The registry maps
//! the command name to its handler and turns the handler's result into a
//! process exit code.

mod completions;
mod debug;
mod device;
mod ui_capture;
mod unavailable;

pub use completions::CompletionsPlugin;
pub use debug::{analyze_log, DebugPlugin, LogAnalysis};
pub use device::{DevicePlugin, SUPPORTED_DEVICES};
pub use ui_capture::{capture, UiCapturePlugin};
pub use unavailable::UnavailablePlugin;

use std::io::{self, Write};
use std::sync::atomic::AtomicBool;

use clap::error::ErrorKind;
use clap::Parser;
use garmin_dev_common::Colors;

use crate::config::Config;
use crate::error::CliError;

/// Everything a plugin may read. Resolved once in `main`.
pub struct PluginContext<'a> {
    pub config: &'a Config,
    /// Set when the user interrupts the run.
    pub cancel: &'a AtomicBool,
}

impl<'a> PluginContext<'a> {
    pub fn new(config: &'a Config, cancel: &'a AtomicBool) -> Self {
        Self { config, cancel }
    }
}

pub trait Plugin {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn available(&self) -> bool {
        true
    }

    fn execute(&self, ctx: &PluginContext<'_>, args: &[String]) -> Result<(), CliError>;
}

pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn empty() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(UiCapturePlugin::new()));
        registry.register(Box::new(UnavailablePlugin::new(
            "build",
            "MonkeyC compilation and optimization",
        )));
        registry.register(Box::new(UnavailablePlugin::new(
            "deploy",
            "Device deployment and simulator management",
        )));
        registry.register(Box::new(UnavailablePlugin::new(
            "test",
            "Testing framework and validation",
        )));
        registry.register(Box::new(DebugPlugin::new()));
        registry.register(Box::new(DevicePlugin::new()));
        registry.register(Box::new(UnavailablePlugin::new(
            "project",
            "Project scaffolding and management",
        )));
        registry.register(Box::new(CompletionsPlugin::new()));
        registry
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.retain(|p| p.name() != plugin.name());
        self.plugins.push(plugin);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.name() == name)
            .map(|p| &**p)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins.iter().map(|p| &**p)
    }

    /// Look up an available plugin by command name.
    pub fn resolve(&self, name: &str) -> Result<&dyn Plugin, CliError> {
        let plugin = self.get(name).ok_or_else(|| CliError::UnknownCommand {
            name: name.to_string(),
            available: self.names(),
        })?;
        if !plugin.available() {
            return Err(CliError::PluginUnavailable(name.to_string()));
        }
        Ok(plugin)
    }

    pub fn dispatch(
        &self,
        ctx: &PluginContext<'_>,
        name: &str,
        args: &[String],
    ) -> Result<(), CliError> {
        tracing::debug!(plugin = name, args = args.len(), "dispatching");
        self.resolve(name)?.execute(ctx, args)
    }

    /// Dispatch and return the process exit code, reporting any error.
    pub fn run(&self, ctx: &PluginContext<'_>, name: &str, args: &[String]) -> i32 {
        match self.dispatch(ctx, name, args) {
            Ok(()) => 0,
            Err(err) => {
                err.report();
                err.exit_code()
            }
        }
    }

    pub fn write_listing(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Available plugins:")?;
        for plugin in self.iter() {
            writeln!(
                out,
                "  {} {:<12} - {}",
                Colors::mark(plugin.available()),
                plugin.name(),
                plugin.description()
            )?;
        }
        Ok(())
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Parse plugin arguments. `Ok(None)` means help or version was printed.
pub(crate) fn parse_args<T: Parser>(prog: &str, args: &[String]) -> Result<Option<T>, CliError> {
    let argv = std::iter::once(prog.to_string()).chain(args.iter().cloned());
    match T::try_parse_from(argv) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{}", err);
            Ok(None)
        }
        Err(err) => {
            let message = err.to_string();
            let message = message.trim_end().trim_start_matches("error: ");
            Err(CliError::Usage(message.to_string()))
        }
    }
}

pub(crate) fn write_stdout(bytes: &[u8]) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    out.write_all(bytes)
        .and_then(|_| out.flush())
        .map_err(|source| CliError::Io {
            target: "stdout".to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoPlugin;

    impl Plugin for EchoPlugin {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "Echo arguments"
        }

        fn execute(&self, _ctx: &PluginContext<'_>, args: &[String]) -> Result<(), CliError> {
            if args.is_empty() {
                return Err(CliError::Usage("nothing to echo".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_default_plugins_in_order() {
        assert_eq!(
            PluginRegistry::with_defaults().names(),
            vec![
                "ui-capture",
                "build",
                "deploy",
                "test",
                "debug",
                "device",
                "project",
                "completions"
            ]
        );
    }

    #[test]
    fn test_dispatch_unknown_and_unavailable() {
        let config = Config::default();
        let cancel = AtomicBool::new(false);
        let ctx = PluginContext::new(&config, &cancel);
        let registry = PluginRegistry::with_defaults();

        let err = registry.dispatch(&ctx, "flash", &[]).unwrap_err();
        assert!(matches!(err, CliError::UnknownCommand { .. }));
        assert_eq!(err.exit_code(), 64);

        let err = registry.dispatch(&ctx, "build", &[]).unwrap_err();
        assert!(matches!(err, CliError::PluginUnavailable(ref n) if n == "build"));
        assert_eq!(registry.run(&ctx, "deploy", &[]), 69);
        assert_eq!(registry.run(&ctx, "flash", &[]), 64);
    }

    #[test]
    fn test_register_custom_plugin() {
        let config = Config::default();
        let cancel = AtomicBool::new(false);
        let ctx = PluginContext::new(&config, &cancel);

        let mut registry = PluginRegistry::empty();
        registry.register(Box::new(EchoPlugin));
        registry.register(Box::new(EchoPlugin));
        assert_eq!(registry.names(), vec!["echo"]);

        assert_eq!(registry.run(&ctx, "echo", &["hi".to_string()]), 0);
        assert_eq!(registry.run(&ctx, "echo", &[]), 64);
    }

    #[test]
    fn test_listing_marks_availability() {
        garmin_dev_common::color_init(true);
        let mut out = Vec::new();
        PluginRegistry::with_defaults().write_listing(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Available plugins:\n"));
        assert!(text.contains("  ✓ ui-capture   - UI state capture and XML generation\n"));
        assert!(text.contains("  ✗ build        - MonkeyC compilation and optimization\n"));
    }

    #[derive(Parser, Debug)]
    struct DepthArgs {
        #[arg(long)]
        depth: u32,
    }

    #[test]
    fn test_parse_args_usage_error() {
        let err = parse_args::<DepthArgs>("depth", &["--depth".to_string(), "x".to_string()])
            .unwrap_err();
        assert_eq!(err.exit_code(), 64);
        assert!(!err.to_string().starts_with("error:"));

        let ok = parse_args::<DepthArgs>("depth", &["--depth".to_string(), "3".to_string()])
            .unwrap();
        assert_eq!(ok.map(|p| p.depth), Some(3));
    }
}
