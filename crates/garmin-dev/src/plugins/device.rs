use clap::{Parser, Subcommand};
use garmin_dev_common::Colors;

use super::{parse_args, write_stdout, Plugin, PluginContext};
use crate::error::CliError;

pub const SUPPORTED_DEVICES: [&str; 9] = [
    "fenix7",
    "fenix7s",
    "fenix7x",
    "fr965",
    "fr955",
    "epix2",
    "venu2",
    "vivoactive4",
    "edge1040",
];

#[derive(Parser, Debug)]
#[command(name = "garmin-dev device")]
#[command(about = "Device management and information")]
struct DeviceArgs {
    #[command(subcommand)]
    command: Option<DeviceCommand>,
}

#[derive(Subcommand, Debug)]
enum DeviceCommand {
    /// List supported device models
    List {
        /// Print a JSON array
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Default)]
pub struct DevicePlugin;

impl DevicePlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for DevicePlugin {
    fn name(&self) -> &'static str {
        "device"
    }

    fn description(&self) -> &'static str {
        "Device management and information"
    }

    fn execute(&self, ctx: &PluginContext<'_>, args: &[String]) -> Result<(), CliError> {
        let Some(args) = parse_args::<DeviceArgs>("garmin-dev device", args)? else {
            return Ok(());
        };

        match args.command.unwrap_or(DeviceCommand::List { json: false }) {
            DeviceCommand::List { json: true } => {
                let mut out = serde_json::to_vec_pretty(&SUPPORTED_DEVICES)
                    .map_err(garmin_dev_core::EngineError::from)?;
                out.push(b'\n');
                write_stdout(&out)
            }
            DeviceCommand::List { json: false } => {
                write_stdout(render_list(&ctx.config.default_device).as_bytes())
            }
        }
    }
}

fn render_list(default_device: &str) -> String {
    let mut text = String::from("Supported devices:\n");
    for device in SUPPORTED_DEVICES {
        if device == default_device {
            text.push_str(&format!("  • {} {}\n", device, Colors::dim("(default)")));
        } else {
            text.push_str(&format!("  • {}\n", device));
        }
    }
    text
}
