use super::{Plugin, PluginContext};
use crate::error::CliError;

/// A command that is registered and listed but not shipped in this build.
#[derive(Debug, Clone, Copy)]
pub struct UnavailablePlugin {
    name: &'static str,
    description: &'static str,
}

impl UnavailablePlugin {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }
}

impl Plugin for UnavailablePlugin {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn available(&self) -> bool {
        false
    }

    fn execute(&self, _ctx: &PluginContext<'_>, _args: &[String]) -> Result<(), CliError> {
        Err(CliError::PluginUnavailable(self.name.to_string()))
    }
}
