//! The streaming extraction pipeline:
//! line → classifier → extractor → builder.
//!
//! Each run owns its builder and counters, so independent runs can proceed on
//! separate threads without coordination.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::builder::StateBuilder;
use crate::document::UiStateDocument;
use crate::error::EngineError;
use crate::extractor;
use crate::grammar::{parse_screen_line, Classification, GrammarRegistry, LogLine};
use crate::options::ExtractOptions;

/// Line-level bookkeeping for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub lines_read: usize,
    pub elements: usize,
    /// Lines no element grammar claimed (state, debug, noise).
    pub unmatched: usize,
    /// Lines that matched a grammar but failed field parsing.
    pub malformed: usize,
    /// Screen descriptor lines.
    pub descriptors: usize,
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub document: UiStateDocument,
    pub stats: ExtractionStats,
}

pub struct LogExtractor {
    registry: GrammarRegistry,
    options: ExtractOptions,
}

impl LogExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            registry: GrammarRegistry::with_defaults(),
            options,
        }
    }

    pub fn with_registry(mut self, registry: GrammarRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &GrammarRegistry {
        &self.registry
    }

    /// Extract from in-memory text. Never fails: bad lines are dropped.
    pub fn extract(&self, text: &str) -> Extraction {
        let mut run = Run::new(&self.options);
        for (idx, line) in text.lines().enumerate() {
            run.feed(&self.registry, LogLine::new(idx + 1, line));
        }
        run.finish()
    }

    /// Extract from a reader one line at a time.
    ///
    /// When `cancel` becomes true the run stops reading and the partial
    /// document is discarded.
    pub fn extract_reader<R: BufRead>(
        &self,
        mut reader: R,
        cancel: Option<&AtomicBool>,
    ) -> Result<Extraction, EngineError> {
        let mut run = Run::new(&self.options);
        let mut buf = String::new();
        let mut number = 0usize;

        loop {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                debug!(lines = number, "extraction cancelled");
                return Err(EngineError::Cancelled);
            }

            buf.clear();
            if reader.read_line(&mut buf)? == 0 {
                break;
            }
            number += 1;
            let line = buf.trim_end_matches(['\n', '\r']);
            run.feed(&self.registry, LogLine::new(number, line));
        }

        Ok(run.finish())
    }
}

impl Default for LogExtractor {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

struct Run<'o> {
    options: &'o ExtractOptions,
    builder: StateBuilder,
    stats: ExtractionStats,
}

impl<'o> Run<'o> {
    fn new(options: &'o ExtractOptions) -> Self {
        let mut builder = StateBuilder::new();
        if let Some(device) = &options.device {
            builder.set_device(device.clone());
        }
        Self {
            options,
            builder,
            stats: ExtractionStats::default(),
        }
    }

    fn feed(&mut self, registry: &GrammarRegistry, line: LogLine<'_>) {
        self.stats.lines_read += 1;

        if let Some(caps) = parse_screen_line(line.text) {
            match extractor::extract_screen(&caps) {
                Ok(screen) => {
                    self.stats.descriptors += 1;
                    if !self.builder.set_screen(screen) {
                        debug!(line = line.number, "ignoring repeated screen descriptor");
                    }
                }
                Err(err) => {
                    self.stats.malformed += 1;
                    warn!(line = line.number, "dropping line: {}", err);
                }
            }
            return;
        }

        match registry.classify(&line) {
            Classification::NoMatch => {
                self.stats.unmatched += 1;
                debug!(line = line.number, "no grammar matched");
            }
            Classification::Matched(matched) => {
                match extractor::extract(&matched, &self.options.policy) {
                    Ok(spec) => {
                        let id = self.builder.push(spec);
                        debug!(line = line.number, grammar = matched.grammar, id, "element");
                        self.stats.elements += 1;
                    }
                    Err(err) => {
                        self.stats.malformed += 1;
                        warn!(line = line.number, "dropping line: {}", err);
                    }
                }
            }
        }
    }

    fn finish(self) -> Extraction {
        let stats = self.stats;
        info!(
            lines = stats.lines_read,
            elements = stats.elements,
            unmatched = stats.unmatched,
            malformed = stats.malformed,
            "extraction finished"
        );
        Extraction {
            document: self.builder.finish(),
            stats,
        }
    }
}

/// Extract a UI-state document from log text with default options.
pub fn extract(log_text: &str) -> UiStateDocument {
    LogExtractor::default().extract(log_text).document
}
