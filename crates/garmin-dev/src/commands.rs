use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

const LONG_ABOUT: &str = r#"garmin-dev is a Connect IQ development CLI built around plugins.

The ui-capture plugin turns simulator debug logs into a UI-state document
(XML or JSON): every RENDER line becomes an element with a stable id such as
hournumber_1, carrying its position, size, fill color, font and text.

CONFIGURATION:
    --config PATH, else the first of ./.garmin-dev.json, ~/.garmin-dev.json,
    /etc/garmin-dev.json. GARMIN_DEV_DEVICE, GARMIN_DEV_FORMAT and
    GARMIN_DEV_SDK override file values.

EXAMPLES:
    garmin-dev ui-capture --input debug.log --output ui-state.xml
    garmin-dev ui-capture -i debug.log -f json
    tail -n 500 sim.log | garmin-dev ui-capture > ui-state.xml
    garmin-dev debug analyze-logs -i debug.log
    garmin-dev device list --json
    garmin-dev --list-plugins"#;

#[derive(Parser, Debug)]
#[command(name = "garmin-dev")]
#[command(author, version)]
#[command(about = "Garmin Connect IQ development CLI")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path (skips the search order)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log extraction progress (info level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// List plugins and whether they are available
    #[arg(short = 'L', long)]
    pub list_plugins: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// A plugin name followed by its own arguments
    #[command(external_subcommand)]
    Plugin(Vec<String>),
}

impl Cli {
    /// Plugin name and its arguments, if a command was given.
    pub fn plugin_invocation(&self) -> Option<(&str, &[String])> {
        match &self.command {
            Some(Commands::Plugin(argv)) => argv
                .split_first()
                .map(|(name, args)| (name.as_str(), args)),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_args_pass_through_untouched() {
        let cli = Cli::try_parse_from([
            "garmin-dev",
            "--verbose",
            "ui-capture",
            "-i",
            "debug.log",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let (name, args) = cli.plugin_invocation().unwrap();
        assert_eq!(name, "ui-capture");
        assert_eq!(args, ["-i", "debug.log", "--format", "json", "-v"]);
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::try_parse_from(["garmin-dev", "-L"]).unwrap();
        assert!(cli.list_plugins);
        assert!(cli.plugin_invocation().is_none());
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::try_parse_from(["garmin-dev", "-c", "/tmp/cfg.json", "device"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/cfg.json")));
        assert_eq!(cli.plugin_invocation(), Some(("device", &[][..])));
    }
}
