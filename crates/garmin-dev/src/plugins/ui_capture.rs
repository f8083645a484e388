use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use clap::Parser;
use garmin_dev_common::Colors;
use garmin_dev_core::{
    ExtractOptions, ExtractionStats, FormatRegistry, KindStyle, LogExtractor, NormalizePolicy,
    UnknownFontPolicy,
};
use tracing::info;

use super::{parse_args, write_stdout, Plugin, PluginContext};
use crate::config::Config;
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "garmin-dev ui-capture")]
#[command(about = "Capture UI state from a simulator debug log")]
struct CaptureArgs {
    /// Input log file ("-" or omitted reads stdin)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (omitted writes stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format: xml or json (default from config)
    #[arg(short, long)]
    format: Option<String>,

    /// Target device model recorded in the document metadata
    #[arg(short, long)]
    device: Option<String>,

    /// Keep element kinds as written instead of lower-casing them
    #[arg(long)]
    verbatim_kinds: bool,

    /// Drop font tags other than XTINY, SMALL, MEDIUM and LARGE
    #[arg(long)]
    drop_unknown_fonts: bool,
}

impl CaptureArgs {
    /// The `--format` value, or the configured default, without surrounding
    /// whitespace.
    fn format(&self, config: &Config) -> String {
        self.format
            .as_deref()
            .unwrap_or(&config.output_format)
            .trim()
            .to_string()
    }

    fn policy(&self) -> NormalizePolicy {
        NormalizePolicy {
            kind_style: if self.verbatim_kinds {
                KindStyle::Verbatim
            } else {
                KindStyle::Collapsed
            },
            unknown_fonts: if self.drop_unknown_fonts {
                UnknownFontPolicy::Drop
            } else {
                UnknownFontPolicy::Preserve
            },
        }
    }
}

#[derive(Debug, Default)]
pub struct UiCapturePlugin;

impl UiCapturePlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for UiCapturePlugin {
    fn name(&self) -> &'static str {
        "ui-capture"
    }

    fn description(&self) -> &'static str {
        "UI state capture and XML generation"
    }

    fn execute(&self, ctx: &PluginContext<'_>, args: &[String]) -> Result<(), CliError> {
        let Some(args) = parse_args::<CaptureArgs>("garmin-dev ui-capture", args)? else {
            return Ok(());
        };

        let format = args.format(ctx.config);
        let device = args
            .device
            .clone()
            .unwrap_or_else(|| ctx.config.default_device.clone());
        let options = ExtractOptions::default()
            .with_policy(args.policy())
            .with_device(device);

        // Reject the format before touching the input.
        FormatRegistry::with_defaults().lookup(&format)?;

        let (bytes, stats) = match args.input.as_deref().filter(|p| *p != Path::new("-")) {
            Some(path) => {
                let file = File::open(path).map_err(|source| CliError::InputUnavailable {
                    path: path.to_path_buf(),
                    source,
                })?;
                capture(BufReader::new(file), options, &format, Some(ctx.cancel))?
            }
            None => capture(io::stdin().lock(), options, &format, Some(ctx.cancel))?,
        };

        match &args.output {
            Some(path) => write_atomic(path, &bytes)?,
            None => write_stdout(&bytes)?,
        }

        print_summary(&stats, &format, args.output.as_deref());
        Ok(())
    }
}

/// Extract and serialize a whole log.
///
/// The format is resolved before any input is read. Nothing is returned for
/// a cancelled run.
pub fn capture<R: BufRead>(
    input: R,
    options: ExtractOptions,
    format: &str,
    cancel: Option<&AtomicBool>,
) -> Result<(Vec<u8>, ExtractionStats), CliError> {
    let formats = FormatRegistry::with_defaults();
    let serializer = formats.lookup(format)?;

    let extraction = LogExtractor::new(options).extract_reader(input, cancel)?;
    let bytes = serializer.serialize(&extraction.document)?;
    info!(
        format = serializer.format_name(),
        bytes = bytes.len(),
        "document serialized"
    );
    Ok((bytes, extraction.stats))
}

/// Write through a temporary file in the target directory, then rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    let io_err = |source: io::Error| CliError::Io {
        target: path.display().to_string(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

fn print_summary(stats: &ExtractionStats, format: &str, output: Option<&Path>) {
    if let Some(path) = output {
        eprintln!(
            "{} {} UI state saved to: {}",
            Colors::success("✓"),
            format.to_ascii_uppercase(),
            path.display()
        );
    }
    eprintln!("Captured {} UI elements", stats.elements);
    if stats.unmatched > 0 || stats.malformed > 0 {
        eprintln!(
            "{}",
            Colors::dim(&format!(
                "Skipped {} unmatched and {} malformed lines of {}",
                stats.unmatched, stats.malformed, stats.lines_read
            ))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garmin_dev_core::{read_document, EngineError};
    use std::io::Cursor;
    use std::sync::atomic::Ordering;

    const LOG: &str = "\
[12:00:00] INFO: simulator up
[WatchFace] RENDER: HourNumber(12) Position(130,20) Font(LARGE) Color(0xffffff)
[WatchFace] RENDER: HourNumber(3) Position(240,130) Font(LARGE) Color(0xffffff)
[WatchFace] RENDER: MinuteMarker(15) Position(250,130) Size(2x8) Color(0x888888)
[WatchFace] STATE: mode=active
[WatchFace] DEBUG: onUpdate took 4ms
";

    #[test]
    fn test_capture_xml() {
        let options = ExtractOptions::default().with_device("fr965");
        let (bytes, stats) = capture(Cursor::new(LOG), options, "xml", None).unwrap();
        assert_eq!(stats.elements, 3);
        assert_eq!(stats.unmatched, 3);

        let doc = read_document(&bytes, "xml").unwrap();
        assert_eq!(
            doc.ids().collect::<Vec<_>>(),
            vec!["hournumber_1", "hournumber_2", "minutemarker_1"]
        );
        assert_eq!(doc.metadata.device.as_deref(), Some("fr965"));
    }

    #[test]
    fn test_unknown_format_reads_nothing() {
        struct Untouchable;
        impl io::Read for Untouchable {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                panic!("input must not be read for an unknown format");
            }
        }

        let err = capture(
            BufReader::new(Untouchable),
            ExtractOptions::default(),
            "yaml",
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Engine(EngineError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_cancelled_capture_returns_nothing() {
        let cancel = AtomicBool::new(false);
        cancel.store(true, Ordering::SeqCst);
        let err = capture(Cursor::new(LOG), ExtractOptions::default(), "json", Some(&cancel))
            .unwrap_err();
        assert_eq!(err.exit_code(), 130);
    }

    #[test]
    fn test_policy_flags() {
        let args = CaptureArgs::try_parse_from([
            "ui-capture",
            "--verbatim-kinds",
            "--drop-unknown-fonts",
        ])
        .unwrap();
        let policy = args.policy();
        assert_eq!(policy.kind_style, KindStyle::Verbatim);
        assert_eq!(policy.unknown_fonts, UnknownFontPolicy::Drop);

        let defaults = CaptureArgs::try_parse_from(["ui-capture"]).unwrap().policy();
        assert_eq!(defaults, NormalizePolicy::default());
    }

    #[test]
    fn test_format_is_trimmed_before_lookup() {
        let config = Config::default();
        let args = CaptureArgs::try_parse_from(["ui-capture", "-f", " json "]).unwrap();
        assert_eq!(args.format(&config), "json");

        let defaults = CaptureArgs::try_parse_from(["ui-capture"]).unwrap();
        assert_eq!(defaults.format(&config), config.output_format);
    }

    #[test]
    fn test_write_atomic_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui-state.xml");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
