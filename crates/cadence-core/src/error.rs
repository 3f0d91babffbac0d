use std::fmt;

use thiserror::Error;

/// Failures raised while validating or expanding a reporting schedule.
///
/// Every variant indicates a data problem with the caller's input, never a
/// transient fault, so nothing here is worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Malformed input: {0}")]
    Format(String),

    #[error("Unsupported recurrence rule: {0}")]
    Vocabulary(String),

    #[error("Out of range: {0}")]
    Range(String),

    #[error("Candidate cap of {max_candidates} evaluations exhausted without a future occurrence")]
    SafetyCapExceeded { max_candidates: usize },

    #[error("No next run: {0}")]
    EmptyResult(String),
}

/// Stable, fieldless classification of a [`ScheduleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Format,
    Vocabulary,
    Range,
    SafetyCapExceeded,
    EmptyResult,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Format => "format_error",
            ErrorKind::Vocabulary => "vocabulary_error",
            ErrorKind::Range => "range_error",
            ErrorKind::SafetyCapExceeded => "safety_cap_exceeded",
            ErrorKind::EmptyResult => "empty_result",
        }
    }

    /// Reject code reported by the reporting surface for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Vocabulary => "SRB1-R-7101",
            ErrorKind::Format => "SRB1-R-7102",
            ErrorKind::SafetyCapExceeded => "SRB1-R-7103",
            ErrorKind::Range | ErrorKind::EmptyResult => "SRB1-R-7104",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ScheduleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScheduleError::Format(_) => ErrorKind::Format,
            ScheduleError::Vocabulary(_) => ErrorKind::Vocabulary,
            ScheduleError::Range(_) => ErrorKind::Range,
            ScheduleError::SafetyCapExceeded { .. } => ErrorKind::SafetyCapExceeded,
            ScheduleError::EmptyResult(_) => ErrorKind::EmptyResult,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

pub type Result<T, E = ScheduleError> = std::result::Result<T, E>;
