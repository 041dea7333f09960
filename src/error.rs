#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid option for rule '{rule}': {reason}")]
    RuleOption { rule: &'static str, reason: String },

    #[error("Invalid fix {start}..{end}: {reason}")]
    InvalidFix {
        start: usize,
        end: usize,
        reason: &'static str,
    },

    #[error("Overlapping fixes {first:?} and {second:?}")]
    OverlappingFixes {
        first: (usize, usize),
        second: (usize, usize),
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T = ()> = std::result::Result<T, Error>;
