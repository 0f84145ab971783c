use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the transitpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Station table could not be located at the resolved path.
    #[error("station table not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the station table")]
    ProjectDirsUnavailable,

    /// Raised when a row of the station table cannot be parsed.
    #[error("invalid station data at row {row}: {message}")]
    StationData { row: u64, message: String },

    /// Raised when a station name could not be found in the graph.
    #[error("unknown station name: {name}{}", format_suggestions(.suggestions))]
    UnknownStation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when an interaction is attempted while its precondition is false.
    #[error("action {action} is not permitted while {state}")]
    InvalidAction {
        action: &'static str,
        state: String,
    },

    /// Raised when a summary is requested for a path without stations.
    #[error("path plan was empty")]
    EmptyPath,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether this error reports a rejected interaction rather than bad input.
    pub fn is_invalid_action(&self) -> bool {
        matches!(self, Error::InvalidAction { .. })
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
