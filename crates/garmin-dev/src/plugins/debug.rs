use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use garmin_dev_common::Colors;
use garmin_dev_core::grammar::{parse_screen_line, Classification, LogLine};
use garmin_dev_core::{line_category, GrammarRegistry, NormalizePolicy};
use serde::Serialize;

use super::{parse_args, write_stdout, Plugin, PluginContext};
use crate::error::CliError;

/// Line categories reported individually; anything else counts as `other`.
const CATEGORIES: [&str; 5] = ["RENDER", "STATE", "DEBUG", "INFO", "LAYOUT"];
const OTHER: &str = "other";

#[derive(Parser, Debug)]
#[command(name = "garmin-dev debug")]
#[command(about = "Debugging tools and log analysis")]
struct DebugArgs {
    #[command(subcommand)]
    command: Option<DebugCommand>,
}

#[derive(Subcommand, Debug)]
enum DebugCommand {
    /// Count log lines per category and element-grammar matches
    AnalyzeLogs {
        /// Input log file ("-" or omitted reads stdin)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Per-log counters produced by `debug analyze-logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogAnalysis {
    pub lines: usize,
    pub categories: BTreeMap<String, usize>,
    /// Render lines claimed by each element grammar.
    pub grammars: BTreeMap<String, usize>,
    pub screen_descriptors: usize,
    /// Render lines whose payload does not parse.
    pub malformed: usize,
    /// Render lines no grammar claims.
    pub unclaimed: usize,
}

/// Scan a log line by line.
pub fn analyze_log<R: BufRead>(reader: R) -> io::Result<LogAnalysis> {
    let registry = GrammarRegistry::with_defaults();
    let policy = NormalizePolicy::default();
    let mut analysis = LogAnalysis::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        analysis.lines += 1;

        let category = line_category(&line)
            .filter(|c| CATEGORIES.contains(c))
            .unwrap_or(OTHER);
        *analysis.categories.entry(category.to_string()).or_insert(0) += 1;

        if parse_screen_line(&line).is_some() {
            analysis.screen_descriptors += 1;
            continue;
        }
        if category != "RENDER" {
            continue;
        }

        match registry.classify(&LogLine::new(idx + 1, &line)) {
            Classification::Matched(matched) => {
                *analysis.grammars.entry(matched.grammar.to_string()).or_insert(0) += 1;
                if garmin_dev_core::extract_element(&matched, &policy).is_err() {
                    analysis.malformed += 1;
                }
            }
            Classification::NoMatch => analysis.unclaimed += 1,
        }
    }

    Ok(analysis)
}

fn render_report(analysis: &LogAnalysis) -> String {
    let count = |map: &BTreeMap<String, usize>, key: &str| map.get(key).copied().unwrap_or(0);

    let mut text = format!("{} {} lines\n", Colors::bold("Log analysis:"), analysis.lines);
    text.push_str("  Categories:\n");
    for category in CATEGORIES.iter().chain(std::iter::once(&OTHER)) {
        text.push_str(&format!(
            "    {:<8} {}\n",
            category,
            count(&analysis.categories, category)
        ));
    }
    text.push_str("  Grammars:\n");
    for name in GrammarRegistry::with_defaults().names() {
        text.push_str(&format!(
            "    {:<8} {}\n",
            name,
            count(&analysis.grammars, name)
        ));
    }
    text.push_str(&format!(
        "  Screen descriptors: {}, malformed: {}, unclaimed: {}\n",
        analysis.screen_descriptors, analysis.malformed, analysis.unclaimed
    ));
    text
}

#[derive(Debug, Default)]
pub struct DebugPlugin;

impl DebugPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for DebugPlugin {
    fn name(&self) -> &'static str {
        "debug"
    }

    fn description(&self) -> &'static str {
        "Debugging tools and log analysis"
    }

    fn execute(&self, _ctx: &PluginContext<'_>, args: &[String]) -> Result<(), CliError> {
        let Some(args) = parse_args::<DebugArgs>("garmin-dev debug", args)? else {
            return Ok(());
        };

        let Some(DebugCommand::AnalyzeLogs { input, json }) = args.command else {
            let listing = format!(
                "Available debug commands:\n  • {} - Analyze debug log patterns\n",
                Colors::info("analyze-logs")
            );
            return write_stdout(listing.as_bytes());
        };

        let read_err = |source: io::Error| CliError::Io {
            target: "log input".to_string(),
            source,
        };
        let analysis = match input.filter(|p| p.as_os_str() != "-") {
            Some(path) => {
                let file = File::open(&path)
                    .map_err(|source| CliError::InputUnavailable { path, source })?;
                analyze_log(BufReader::new(file)).map_err(read_err)?
            }
            None => analyze_log(io::stdin().lock()).map_err(read_err)?,
        };

        if json {
            let mut out =
                serde_json::to_vec_pretty(&analysis).map_err(garmin_dev_core::EngineError::from)?;
            out.push(b'\n');
            write_stdout(&out)
        } else {
            write_stdout(render_report(&analysis).as_bytes())
        }
    }
}
