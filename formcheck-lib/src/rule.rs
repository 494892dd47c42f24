//! Validation rules.
//!
//! A rule is a pure predicate over a string paired with the message shown
//! when the predicate fails. Rules are immutable once built and evaluated in
//! declaration order by [`first_failing`].

use std::fmt;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::error::RuleError;

const EMAIL_PATTERN: &str = r"^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(EMAIL_PATTERN)
        .case_insensitive(true)
        .unicode(false)
        .build()
        .expect("email pattern is a valid ASCII regex")
});

/// A predicate over a string value plus the message shown when it fails.
///
/// Implement this to add rules a [`Field`](crate::Field) can use without
/// touching the field itself.
pub trait Rule: Send + Sync {
    /// Message reported when [`validate`](Rule::validate) returns `false`.
    fn message(&self) -> &str;

    /// Check a value. Must be pure and total.
    fn validate(&self, value: &str) -> bool;

    /// Box this rule for storage in a rule list.
    fn boxed(self) -> Box<dyn Rule>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl fmt::Debug for dyn Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message())
            .finish()
    }
}

/// Return the first rule in `rules` that rejects `value`.
///
/// Evaluation stops at the first failure; later rules are never run.
pub fn first_failing<'a>(rules: &'a [Box<dyn Rule>], value: &str) -> Option<&'a dyn Rule> {
    rules
        .iter()
        .map(|rule| &**rule)
        .find(|rule| !rule.validate(value))
}

// -----------------------------------------------------------------------------
// Required
// -----------------------------------------------------------------------------

/// Passes when the value is non-empty after trimming surrounding blanks.
///
/// Only spaces and tabs (Unicode `Zs` plus U+0009) are trimmed; line breaks
/// count as content, so `"\n"` passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Required {
    message: String,
}

impl Required {
    /// Message used by [`Required::new`].
    pub const DEFAULT_MESSAGE: &'static str = "This field is required";

    /// Create a required rule with the default message.
    pub fn new() -> Self {
        Self::with_message(Self::DEFAULT_MESSAGE)
    }

    /// Create a required rule with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Required {
    fn message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &str) -> bool {
        !value.trim_matches(is_blank).is_empty()
    }
}

/// Whitespace that isn't a line or page break.
fn is_blank(c: char) -> bool {
    c.is_whitespace()
        && !matches!(
            c,
            '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
        )
}

// -----------------------------------------------------------------------------
// Email
// -----------------------------------------------------------------------------

/// Passes when the whole value looks like `local@domain.tld`.
///
/// Matching is case-insensitive for ASCII letters only. Unicode case
/// folding, as ICU-style `MATCHES[c]` matching applies it (letting U+212A
/// KELVIN SIGN stand in for `k`), is not used.
///
/// An empty value fails; order a [`Required`] rule first if an empty field
/// should report that instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    message: String,
}

impl Email {
    /// Message used by [`Email::new`].
    pub const DEFAULT_MESSAGE: &'static str = "Invalid email address";

    /// Create an email rule with the default message.
    pub fn new() -> Self {
        Self::with_message(Self::DEFAULT_MESSAGE)
    }

    /// Create an email rule with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for Email {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Email {
    fn message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &str) -> bool {
        EMAIL_REGEX.is_match(value)
    }
}

// -----------------------------------------------------------------------------
// Pattern
// -----------------------------------------------------------------------------

/// Passes when the entire value matches a caller-supplied regular expression.
///
/// The pattern is anchored on both ends, so `[0-9]{3}` rejects `"1234"`.
/// Syntax follows the `regex` crate (no look-around or backreferences).
#[derive(Debug, Clone)]
pub struct Pattern {
    pattern: String,
    regex: Regex,
    message: String,
}

impl Pattern {
    /// Compile a pattern rule.
    ///
    /// Fails with [`RuleError::InvalidPattern`] if `pattern` does not compile.
    pub fn new(pattern: impl Into<String>, message: impl Into<String>) -> Result<Self, RuleError> {
        let pattern = pattern.into();

        // Check the raw pattern first so anchoring can't repair a broken one
        // (e.g. `a)(b`).
        Regex::new(&pattern).map_err(|e| RuleError::invalid_pattern(&pattern, e))?;
        let regex = Regex::new(&format!("^(?:{})$", pattern))
            .map_err(|e| RuleError::invalid_pattern(&pattern, e))?;

        Ok(Self {
            pattern,
            regex,
            message: message.into(),
        })
    }

    /// The pattern as supplied, before anchoring.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Rule for Pattern {
    fn message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

// -----------------------------------------------------------------------------
// Length bounds
// -----------------------------------------------------------------------------

/// Passes when the value has at least `min` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinLength {
    min: usize,
    message: String,
}

impl MinLength {
    /// Create a minimum length rule.
    pub fn new(min: usize, message: impl Into<String>) -> Self {
        Self {
            min,
            message: message.into(),
        }
    }
}

impl Rule for MinLength {
    fn message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &str) -> bool {
        value.chars().count() >= self.min
    }
}

/// Passes when the value has at most `max` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxLength {
    max: usize,
    message: String,
}

impl MaxLength {
    /// Create a maximum length rule.
    pub fn new(max: usize, message: impl Into<String>) -> Self {
        Self {
            max,
            message: message.into(),
        }
    }
}

impl Rule for MaxLength {
    fn message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &str) -> bool {
        value.chars().count() <= self.max
    }
}

// -----------------------------------------------------------------------------
// Predicate
// -----------------------------------------------------------------------------

type Check = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// A rule backed by an arbitrary closure.
pub struct Predicate {
    check: Check,
    message: String,
}

impl Predicate {
    /// Wrap `check`. The closure must be pure: same input, same answer.
    pub fn new<F>(check: F, message: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Box::new(check),
            message: message.into(),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Rule for Predicate {
    fn message(&self) -> &str {
        &self.message
    }

    fn validate(&self, value: &str) -> bool {
        (self.check)(value)
    }
}
