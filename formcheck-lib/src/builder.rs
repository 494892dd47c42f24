//! Fluent builder for fields.

use crate::config::FieldConfig;
use crate::error::RuleError;
use crate::error_display::ErrorDisplay;
use crate::field::Field;
use crate::rule::{Email, MaxLength, MinLength, Pattern, Predicate, Required, Rule};

/// Builder for a [`Field`] and its rule list.
///
/// Rules are evaluated in the order they are added.
///
/// # Example
///
/// ```
/// use formcheck_lib::Field;
///
/// let zip = Field::builder()
///     .name("zip")
///     .required()
///     .pattern("[0-9]{5}", "Zip code must be 5 digits")?
///     .build();
///
/// zip.set_value("1234");
/// assert_eq!(zip.error().as_deref(), Some("Zip code must be 5 digits"));
/// # Ok::<(), formcheck_lib::RuleError>(())
/// ```
#[derive(Default)]
pub struct FieldBuilder {
    config: FieldConfig,
    initial: String,
    rules: Vec<Box<dyn Rule>>,
}

impl FieldBuilder {
    /// Create an empty builder: no rules, empty initial value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field's display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the initial value.
    pub fn initial(mut self, value: impl Into<String>) -> Self {
        self.initial = value.into();
        self
    }

    /// Set where bound controls render the error.
    pub fn error_display(mut self, display: ErrorDisplay) -> Self {
        self.config.error_display = display;
        self
    }

    /// Add any rule.
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(rule.boxed());
        self
    }

    /// Add a custom check.
    pub fn check<F>(self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rule(Predicate::new(f, msg))
    }

    /// Require the field to be non-blank, with the default message.
    pub fn required(self) -> Self {
        self.rule(Required::new())
    }

    /// Require the field to be non-blank.
    pub fn required_with(self, msg: impl Into<String>) -> Self {
        self.rule(Required::with_message(msg))
    }

    /// Require a valid email address, with the default message.
    pub fn email(self) -> Self {
        self.rule(Email::new())
    }

    /// Require a valid email address.
    pub fn email_with(self, msg: impl Into<String>) -> Self {
        self.rule(Email::with_message(msg))
    }

    /// Require the whole value to match a regex pattern.
    pub fn pattern(self, pattern: &str, msg: impl Into<String>) -> Result<Self, RuleError> {
        Ok(self.rule(Pattern::new(pattern, msg)?))
    }

    /// Require minimum length (in characters).
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(MinLength::new(min, msg))
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(MaxLength::new(max, msg))
    }

    /// Build the field, evaluating the initial value.
    pub fn build(self) -> Field {
        Field::with_config(self.config, self.initial, self.rules)
    }
}
