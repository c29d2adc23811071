use thiserror::Error;

/// Errors that can occur while requesting or assembling an analysis
#[derive(Error, Debug)]
pub enum NourishError {
    /// Failed to reach the completion service
    #[error("Failed to reach completion service: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The completion service answered with a non-success status
    #[error("Completion service returned {status}: {body}")]
    StatusError { status: u16, body: String },

    /// The service response carried no completion text
    #[error("Completion service response has no completion field")]
    MissingCompletion,

    /// Caller supplied unusable input (e.g. empty ingredient list)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Request builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Failed to read an input file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to serialize or deserialize JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

/// Internal failures inside an extractor.
///
/// These never leave the crate: every extractor catches them at its boundary,
/// logs them, and hands back its all-default record instead.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// A static pattern was unavailable because it failed to compile at first use
    #[error("Pattern '{0}' is unavailable")]
    PatternUnavailable(&'static str),

    /// A computed window fell outside the text or off a char boundary
    #[error("Slice {start}..{end} is out of range")]
    Slice { start: usize, end: usize },
}
