//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent planning rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed planning input: empty catalog, zero lengths, conflicting modes.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// More existing logs than the requested courses can take.
    #[error("too many existing logs: need {required}, but have {existing}")]
    Capacity { required: usize, existing: usize },

    /// A length class ran out while filling a course.
    ///
    /// `course_index` is 0-based; the message shows the 1-based course number.
    #[error(
        "not enough logs for course {}: need 2 long and 2 short, have {long_remaining} long and {short_remaining} short",
        .course_index + 1
    )]
    Imbalance {
        course_index: usize,
        long_remaining: usize,
        short_remaining: usize,
    },
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
