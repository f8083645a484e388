use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};

use super::{parse_args, Plugin, PluginContext};
use crate::commands::Cli;
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "garmin-dev completions")]
#[command(about = "Generate shell completion scripts")]
struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(Debug, Default)]
pub struct CompletionsPlugin;

impl CompletionsPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for CompletionsPlugin {
    fn name(&self) -> &'static str {
        "completions"
    }

    fn description(&self) -> &'static str {
        "Shell completion scripts"
    }

    fn execute(&self, _ctx: &PluginContext<'_>, args: &[String]) -> Result<(), CliError> {
        let Some(args) = parse_args::<CompletionsArgs>("garmin-dev completions", args)? else {
            return Ok(());
        };
        let mut cmd = Cli::command();
        generate(args.shell, &mut cmd, "garmin-dev", &mut std::io::stdout());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_is_required() {
        assert!(CompletionsArgs::try_parse_from(["completions"]).is_err());
        let args = CompletionsArgs::try_parse_from(["completions", "zsh"]).unwrap();
        assert_eq!(args.shell, Shell::Zsh);
    }
}
