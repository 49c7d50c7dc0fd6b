//! Structured configuration issues.
//!
//! Configuration is validated as a whole and every problem is reported,
//! rather than stopping at the first one. Callers decide what to do based on
//! [`Severity`].

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the engine cannot run with this configuration.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A numeric field is outside its permitted range.
    OutOfRange { field: String },
    /// Similarity weights are negative or sum to zero.
    InvalidWeights,
    /// The lowered threshold is above the base threshold.
    FallbackAboveBase,
    /// A data file path does not exist.
    MissingDataFile { field: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Check whether any issues are errors (i.e. fatal).
pub fn has_errors(issues: &[ConfigIssue]) -> bool {
    issues.iter().any(ConfigIssue::is_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_are_not_fatal() {
        let issues = vec![ConfigIssue::warning(
            ConfigIssueCode::FallbackAboveBase,
            "fallback above base",
        )];
        assert!(!has_errors(&issues));
    }

    #[test]
    fn errors_are_fatal() {
        let issues = vec![
            ConfigIssue::warning(ConfigIssueCode::FallbackAboveBase, "w"),
            ConfigIssue::error(ConfigIssueCode::InvalidWeights, "e"),
        ];
        assert!(has_errors(&issues));
        assert!(issues[1].is_error());
    }
}
