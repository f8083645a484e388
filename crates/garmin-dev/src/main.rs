use clap::CommandFactory;
use clap::Parser;
use tracing::debug;
use tracing::warn;

use garmin_dev::commands::Cli;
use garmin_dev::config::ConfigResolver;
use garmin_dev::interrupt;
use garmin_dev::plugins::PluginContext;
use garmin_dev::plugins::PluginRegistry;
use garmin_dev::telemetry::init_tracing;
use garmin_dev_common::color_init;
use garmin_dev_common::exit_codes;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    color_init(cli.no_color);

    let resolved = match ConfigResolver::system().resolve(cli.config.as_deref()) {
        Ok(resolved) => resolved,
        Err(err) => {
            err.report();
            return err.exit_code();
        }
    };

    let verbose = cli.verbose || resolved.config.verbose;
    let _telemetry = init_tracing(if verbose { "info" } else { "warn" });
    for warning in &resolved.warnings {
        warn!("{}", warning);
    }
    debug!(source = %resolved.source, "configuration resolved");

    let registry = PluginRegistry::with_defaults();

    if cli.list_plugins {
        return match registry.write_listing(&mut std::io::stdout()) {
            Ok(()) => exit_codes::SUCCESS,
            Err(_) => exit_codes::IO_ERROR,
        };
    }

    let Some((name, args)) = cli.plugin_invocation() else {
        return match Cli::command().print_help() {
            Ok(()) => exit_codes::SUCCESS,
            Err(_) => exit_codes::IO_ERROR,
        };
    };

    let cancel = interrupt::install();
    let ctx = PluginContext::new(&resolved.config, &cancel);
    registry.run(&ctx, name, args)
}
