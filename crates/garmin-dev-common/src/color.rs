use std::io::IsTerminal;
use std::sync::OnceLock;

static NO_COLOR: OnceLock<bool> = OnceLock::new();

/// Decide once per process whether to emit ANSI colors.
///
/// Disabled by `--no-color`, a set `NO_COLOR` variable, or a non-terminal stdout.
pub fn init(no_color_flag: bool) {
    let disabled = no_color_flag
        || std::env::var_os("NO_COLOR").is_some()
        || !std::io::stdout().is_terminal();
    let _ = NO_COLOR.set(disabled);
}

pub fn is_disabled() -> bool {
    *NO_COLOR.get().unwrap_or(&false)
}

mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const CYAN: &str = "\x1b[36m";
    pub const DIM: &str = "\x1b[90m";
    pub const BOLD: &str = "\x1b[1m";
}

fn paint(style: &str, text: &str) -> String {
    if is_disabled() {
        text.to_string()
    } else {
        format!("{}{}{}", style, text, codes::RESET)
    }
}

pub struct Colors;

impl Colors {
    pub fn success(text: &str) -> String {
        paint(codes::GREEN, text)
    }

    pub fn error(text: &str) -> String {
        paint(codes::RED, text)
    }

    pub fn info(text: &str) -> String {
        paint(codes::CYAN, text)
    }

    pub fn dim(text: &str) -> String {
        paint(codes::DIM, text)
    }

    pub fn bold(text: &str) -> String {
        paint(codes::BOLD, text)
    }

    /// `✓` or `✗` for an availability column.
    pub fn mark(ok: bool) -> String {
        if ok {
            Self::success("✓")
        } else {
            Self::error("✗")
        }
    }
}
