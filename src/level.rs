use std::fmt;

/// Severity bucket of a dispatched event.
///
/// Callers usually pass plain tokens (`"INFO"`, `"ERROR"`, ...); these are
/// mapped with [`Severity::from_token`]. Unrecognized tokens land in
/// [`Severity::Warn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Map a case-sensitive token onto a severity bucket.
    ///
    /// `"INFO"`, `"ERROR"` and `"DEBUG"` map directly; every other value,
    /// including `"WARN"` and lowercase spellings, maps to `Warn`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "INFO" => Severity::Info,
            "ERROR" => Severity::Error,
            "DEBUG" => Severity::Debug,
            _ => Severity::Warn,
        }
    }

    /// Token written into the record's `level` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warn => tracing::Level::WARN,
            Severity::Error => tracing::Level::ERROR,
        }
    }
}

impl From<&str> for Severity {
    fn from(token: &str) -> Self {
        Severity::from_token(token)
    }
}

impl From<&String> for Severity {
    fn from(token: &String) -> Self {
        Severity::from_token(token)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
