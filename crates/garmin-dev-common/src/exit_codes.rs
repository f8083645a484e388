//! Process exit codes, following sysexits.h.

pub const SUCCESS: i32 = 0;
pub const USAGE: i32 = 64;
pub const DATA_ERROR: i32 = 65;
pub const NO_INPUT: i32 = 66;
pub const UNAVAILABLE: i32 = 69;
pub const IO_ERROR: i32 = 74;
pub const CONFIG: i32 = 78;
/// 128 + SIGINT.
pub const INTERRUPTED: i32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidInput,
    BadData,
    NotFound,
    Unavailable,
    External,
    Config,
    Interrupted,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::InvalidInput => "invalid_input",
            ErrorCategory::BadData => "bad_data",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Unavailable => "unavailable",
            ErrorCategory::External => "external",
            ErrorCategory::Config => "config",
            ErrorCategory::Interrupted => "interrupted",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::InvalidInput => USAGE,
            ErrorCategory::BadData => DATA_ERROR,
            ErrorCategory::NotFound => NO_INPUT,
            ErrorCategory::Unavailable => UNAVAILABLE,
            ErrorCategory::External => IO_ERROR,
            ErrorCategory::Config => CONFIG,
            ErrorCategory::Interrupted => INTERRUPTED,
        }
    }
}

impl std::str::FromStr for ErrorCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invalid_input" => Ok(ErrorCategory::InvalidInput),
            "bad_data" => Ok(ErrorCategory::BadData),
            "not_found" => Ok(ErrorCategory::NotFound),
            "unavailable" => Ok(ErrorCategory::Unavailable),
            "external" => Ok(ErrorCategory::External),
            "config" => Ok(ErrorCategory::Config),
            "interrupted" => Ok(ErrorCategory::Interrupted),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
