use thiserror::Error;

/// Errors that can occur while loading or analyzing a trajectory.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AnalysisError {
    /// The input is too short for the requested step.
    #[error("insufficient data: need at least {required} {what}, got {found}")]
    InsufficientData {
        what: &'static str,
        required: usize,
        found: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to read trajectory: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl AnalysisError {
    pub(crate) fn insufficient(what: &'static str, required: usize, found: usize) -> Self {
        Self::InsufficientData {
            what,
            required,
            found,
        }
    }

    /// True for the "too short to segment" case, which callers usually
    /// report as "no motion detected" rather than as a failure.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}
