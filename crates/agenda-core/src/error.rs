use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for CLI and agent consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    UnknownStrategy,
    EventsNotFound,
    EventsReadFailed,
    EventsDecodeFailed,
    InvalidInterval,
    InvalidTimestamp,
    StrategyMismatch,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::UnknownStrategy => "E1002",
            Self::EventsNotFound => "E2001",
            Self::EventsReadFailed => "E2002",
            Self::EventsDecodeFailed => "E2003",
            Self::InvalidInterval => "E3001",
            Self::InvalidTimestamp => "E3002",
            Self::StrategyMismatch => "E4001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::UnknownStrategy => "Unknown conflict strategy",
            Self::EventsNotFound => "Events file not found",
            Self::EventsReadFailed => "Events file could not be read",
            Self::EventsDecodeFailed => "Events could not be decoded",
            Self::InvalidInterval => "Interval start is after its end",
            Self::InvalidTimestamp => "Timestamp does not match the event format",
            Self::StrategyMismatch => "Conflict strategies disagree",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .agenda/config.toml and retry."),
            Self::UnknownStrategy => Some("Use one of: eager, tree."),
            Self::EventsNotFound => Some("Pass --file or set [events] path in .agenda/config.toml."),
            Self::EventsReadFailed => Some("Check that the file exists and is readable."),
            Self::EventsDecodeFailed => {
                Some("Events must be a JSON array of {title, start, end} objects.")
            }
            Self::InvalidInterval => Some("Make sure every event ends at or after its start."),
            Self::InvalidTimestamp => Some("Use the form \"September 02, 2019 12:04 AM\"."),
            Self::StrategyMismatch => Some("Report a bug with the events file attached."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Construction error: an interval whose start lies after its end.
///
/// Bounds are kept in their `Debug` rendering so the error stays independent
/// of the range type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("interval start {start} is after end {end}")]
pub struct InvalidInterval {
    pub start: String,
    pub end: String,
}

impl InvalidInterval {
    pub(crate) fn new(start: &impl fmt::Debug, end: &impl fmt::Debug) -> Self {
        Self {
            start: format!("{start:?}"),
            end: format!("{end:?}"),
        }
    }
}

/// Errors from reading or decoding an event list.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The events file does not exist.
    #[error("events file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The events file exists but could not be read.
    #[error("failed to read events file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not a valid event list.
    #[error("failed to decode events: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LoadError {
    /// Machine-readable code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::EventsNotFound,
            Self::Io { .. } => ErrorCode::EventsReadFailed,
            Self::Decode(_) => ErrorCode::EventsDecodeFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, InvalidInterval, LoadError};
    use std::collections::HashSet;
    use std::path::PathBuf;

    const ALL: [ErrorCode; 8] = [
        ErrorCode::ConfigParseError,
        ErrorCode::UnknownStrategy,
        ErrorCode::EventsNotFound,
        ErrorCode::EventsReadFailed,
        ErrorCode::EventsDecodeFailed,
        ErrorCode::InvalidInterval,
        ErrorCode::InvalidTimestamp,
        ErrorCode::StrategyMismatch,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let raw = code.code();
            assert_eq!(raw.len(), 5);
            assert!(raw.starts_with('E'));
            assert!(raw.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn invalid_interval_renders_bounds() {
        let err = InvalidInterval::new(&10, &2);
        assert_eq!(err.to_string(), "interval start 10 is after end 2");
    }

    #[test]
    fn load_error_maps_to_code() {
        let err = LoadError::NotFound(PathBuf::from("missing.json"));
        assert_eq!(err.code(), ErrorCode::EventsNotFound);
        assert!(err.to_string().contains("missing.json"));
    }
}
