//! Rule-based validation for reactive text fields.
//!
//! A [`Field`] holds a string value and an ordered list of [`Rule`]s. Every
//! write re-runs the rules and keeps the message of the first one that
//! fails, so the field's error is always current.
//!
//! ```
//! use formcheck_lib::prelude::*;
//!
//! let email = Field::builder().name("email").required().email().build();
//! assert!(!email.is_valid());
//!
//! email.set_value("not-an-email");
//! assert_eq!(email.error().as_deref(), Some("Invalid email address"));
//!
//! email.set_value("jane@example.com");
//! assert!(email.is_valid());
//! ```

pub mod binding;
pub mod builder;
pub mod config;
pub mod error;
pub mod error_display;
pub mod field;
pub mod rule;

pub use binding::{Binding, TextControl, bind};
pub use builder::FieldBuilder;
pub use config::FieldConfig;
pub use error::RuleError;
pub use error_display::ErrorDisplay;
pub use field::{Field, FieldId, FieldState, SubscriptionId};
pub use rule::{Email, MaxLength, MinLength, Pattern, Predicate, Required, Rule, first_failing};

pub mod prelude {
    pub use crate::binding::{Binding, TextControl, bind};
    pub use crate::config::FieldConfig;
    pub use crate::error::RuleError;
    pub use crate::error_display::ErrorDisplay;
    pub use crate::field::{Field, FieldState};
    pub use crate::rule::{Email, Pattern, Required, Rule};
}
