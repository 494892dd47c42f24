//! Error types

/// Errors raised while constructing validation rules.
///
/// Validation failures are not errors: they surface as [`Field::error`]
/// messages. This type only covers rules that cannot be built at all.
///
/// [`Field::error`]: crate::Field::error
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// The pattern supplied to a pattern rule is not a valid regular expression.
    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The pattern as supplied by the caller.
        pattern: String,
        /// The underlying regex compilation error.
        #[source]
        source: regex::Error,
    },
}

impl RuleError {
    /// Creates a new invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Returns the offending pattern.
    pub fn pattern(&self) -> &str {
        match self {
            Self::InvalidPattern { pattern, .. } => pattern,
        }
    }
}
