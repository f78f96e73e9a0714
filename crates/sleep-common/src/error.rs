//! Application-wide error type shared by every crate in the workspace.

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, SleepError>;

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum SleepError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persistence layer error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The configured timezone is not a known IANA identifier.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A wall-clock time fell outside every range the minute scale covers.
    #[error("Time {hour}:{minute:02} is outside the valid range")]
    TimeOutOfRange {
        /// Local hour.
        hour: u32,
        /// Local minute.
        minute: u32,
    },

    /// A command was invoked without any session context.
    #[error("Session information is unavailable")]
    MissingSession,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SleepError {
    /// Wraps any storage backend error.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }

    /// Wraps any (de)serialization error.
    pub fn serialization(err: impl std::fmt::Display) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_out_of_range_message() {
        let err = SleepError::TimeOutOfRange { hour: 7, minute: 5 };
        assert_eq!(err.to_string(), "Time 7:05 is outside the valid range");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SleepError = io.into();
        assert!(matches!(err, SleepError::Io(_)));
    }
}
