//! Field configuration types.

use crate::error_display::ErrorDisplay;

/// Per-field configuration.
///
/// None of these settings affect which rules run or how the error is
/// computed; they describe the field to logs and to bound controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    /// Display name, used in log output and by controls as a label.
    pub name: String,

    /// Where bound controls should render the error.
    pub error_display: ErrorDisplay,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            name: "field".to_string(),
            error_display: ErrorDisplay::default(),
        }
    }
}

impl FieldConfig {
    /// Create a new config with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the error display mode.
    pub fn error_display(mut self, display: ErrorDisplay) -> Self {
        self.error_display = display;
        self
    }
}
