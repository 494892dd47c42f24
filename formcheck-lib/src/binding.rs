//! Binding fields to input controls.
//!
//! The library has no UI types of its own. A host UI implements
//! [`TextControl`] for whatever widget it draws, and [`bind`] keeps that
//! widget in step with a [`Field`]: every change is pushed to the control,
//! and text typed by the user goes back through [`Binding::input`].

use log::trace;

use crate::error_display::ErrorDisplay;
use crate::field::{Field, FieldState, SubscriptionId};

/// A visual input control that can show a field's value and error.
pub trait TextControl: Send + Sync {
    /// Redraw the control for the given state.
    ///
    /// `display` is the field's preferred error placement.
    fn render(&self, state: &FieldState, display: ErrorDisplay);
}

/// A live connection between a [`Field`] and a [`TextControl`].
///
/// Dropping the binding detaches the control.
#[derive(Debug)]
pub struct Binding {
    field: Field,
    subscription: SubscriptionId,
}

/// Attach `control` to `field`.
///
/// The control is rendered once immediately with the current state, then
/// again after every write or re-validation.
pub fn bind<C>(field: &Field, control: C) -> Binding
where
    C: TextControl + 'static,
{
    let display = field.error_display();
    control.render(&field.state(), display);

    let subscription = field.subscribe(move |state| control.render(state, display));
    trace!("[binding] Bound control to {} ({})", field.name(), field.id());

    Binding {
        field: field.clone(),
        subscription,
    }
}

impl Binding {
    /// The bound field.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Forward text entered in the control to the field.
    pub fn input(&self, text: impl Into<String>) {
        self.field.set_value(text);
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.field.unsubscribe(self.subscription);
        trace!(
            "[binding] Unbound control from {} ({})",
            self.field.name(),
            self.field.id()
        );
    }
}
