//! Reactive validated field.
//!
//! [`Field`] keeps a text value and the error derived from it in lockstep,
//! and pushes every change to registered observers.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard};

use log::{debug, trace};

use crate::builder::FieldBuilder;
use crate::config::FieldConfig;
use crate::error_display::ErrorDisplay;
use crate::rule::{Rule, first_failing};

/// Unique identifier for a Field instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

impl FieldId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__field_{}", self.0)
    }
}

/// Handle returned by [`Field::subscribe`], used to remove the observer again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// A consistent snapshot of a field: the value and the error derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    /// Current text value
    pub value: String,
    /// Message of the first failing rule, if any
    pub error: Option<String>,
}

impl FieldState {
    /// Check if every rule passed for this value.
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

type Observer = Arc<dyn Fn(&FieldState) + Send + Sync>;

#[derive(Default)]
struct Observers {
    next_id: usize,
    entries: Vec<(SubscriptionId, Observer)>,
}

/// A text value paired with an always-current validation error.
///
/// Every write to the value re-runs the rule list in order before any
/// observer is told about the change, so the `(value, error)` pair seen by
/// readers is never stale. Only the first failing rule's message is kept.
///
/// `Field` is a handle: clones share the same value, rules and observers.
///
/// # Example
///
/// ```
/// use formcheck_lib::{Email, Field, Required, Rule};
///
/// let email = Field::new("", vec![Required::new().boxed(), Email::new().boxed()]);
/// assert_eq!(email.error().as_deref(), Some("This field is required"));
///
/// email.set_value("jane@example.com");
/// assert!(email.is_valid());
/// ```
#[derive(Clone)]
pub struct Field {
    /// Unique identifier for this field instance
    id: FieldId,
    /// Name and display settings
    config: Arc<FieldConfig>,
    /// Rules in declaration order, fixed at construction
    rules: Arc<[Box<dyn Rule>]>,
    /// Value and derived error
    inner: Arc<RwLock<FieldState>>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
    /// Change callbacks
    observers: Arc<Mutex<Observers>>,
}

impl Field {
    /// Create a field with an initial value and an ordered rule list.
    ///
    /// The error is computed immediately. An empty rule list makes the field
    /// always valid.
    pub fn new(
        initial: impl Into<String>,
        rules: impl IntoIterator<Item = Box<dyn Rule>>,
    ) -> Self {
        Self::with_config(FieldConfig::default(), initial, rules)
    }

    /// Create a field with explicit configuration.
    pub fn with_config(
        config: FieldConfig,
        initial: impl Into<String>,
        rules: impl IntoIterator<Item = Box<dyn Rule>>,
    ) -> Self {
        let rules: Arc<[Box<dyn Rule>]> = rules.into_iter().collect();
        let value = initial.into();
        let error = first_failing(&rules, &value).map(|rule| rule.message().to_string());

        let id = FieldId::new();
        debug!(
            "[field] Created {} ({}) with {} rule(s), initially {}",
            config.name,
            id,
            rules.len(),
            describe(error.as_deref())
        );

        Self {
            id,
            config: Arc::new(config),
            rules,
            inner: Arc::new(RwLock::new(FieldState { value, error })),
            dirty: Arc::new(AtomicBool::new(false)),
            observers: Arc::new(Mutex::new(Observers::default())),
        }
    }

    /// Start building a field.
    pub fn builder() -> FieldBuilder {
        FieldBuilder::new()
    }

    /// Get the unique ID for this field
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Get the field's display name
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Get the error display mode
    pub fn error_display(&self) -> ErrorDisplay {
        self.config.error_display
    }

    /// Number of rules attached to this field
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Get the current text value
    pub fn value(&self) -> String {
        self.read().value.clone()
    }

    /// Get the current validation error message (if any)
    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    /// Check if the field has a validation error
    pub fn has_error(&self) -> bool {
        self.read().error.is_some()
    }

    /// Check if every rule passes for the current value
    pub fn is_valid(&self) -> bool {
        !self.has_error()
    }

    /// Get the value and its error as one consistent snapshot
    pub fn state(&self) -> FieldState {
        self.read().clone()
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Set the text value and re-validate.
    pub fn set_value(&self, value: impl Into<String>) {
        let value = value.into();
        self.commit(move |state| state.value = value);
    }

    /// Clear the value and re-validate.
    pub fn clear(&self) {
        self.commit(|state| state.value.clear());
    }

    /// Re-run the rules against the current value.
    ///
    /// Observers are notified even if the error did not change.
    pub fn validate(&self) {
        self.commit(|_| {});
    }

    // -------------------------------------------------------------------------
    // Observers
    // -------------------------------------------------------------------------

    /// Register a callback run after every write and every [`validate`](Self::validate).
    ///
    /// Callbacks run synchronously on the writing thread, in registration
    /// order, with no lock held, so they may read (or write) the field.
    /// Each callback receives the field's state at the moment it is called,
    /// so a write made by an earlier callback is never hidden from later ones.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&FieldState) + Send + Sync + 'static,
    {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(observers.next_id);
        observers.next_id += 1;
        observers.entries.push((id, Arc::new(observer)));
        trace!("[field] {} ({}) subscribed {:?}", self.config.name, self.id, id);
        id
    }

    /// Remove a callback. Returns `false` if it was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = observers.entries.len();
        observers.entries.retain(|(entry, _)| *entry != id);
        observers.entries.len() != before
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the field has changed since the last [`clear_dirty`](Self::clear_dirty)
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn read(&self) -> RwLockReadGuard<'_, FieldState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `update`, recompute the error, then notify observers.
    fn commit(&self, update: impl FnOnce(&mut FieldState)) {
        {
            let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            update(&mut *guard);

            let error = first_failing(&self.rules, &guard.value).map(|rule| rule.message().to_string());
            trace!(
                "[field] {} ({}) ran {} rule(s): {}",
                self.config.name,
                self.id,
                self.rules.len(),
                describe(error.as_deref())
            );
            if error != guard.error {
                debug!(
                    "[field] {} ({}) changed from {} to {}",
                    self.config.name,
                    self.id,
                    describe(guard.error.as_deref()),
                    describe(error.as_deref())
                );
            }

            guard.error = error;
        }

        self.dirty.store(true, Ordering::SeqCst);
        self.notify();
    }

    /// Run every observer with the state current at its call. An observer
    /// may itself write, so the state is re-read before each call.
    fn notify(&self) {
        let observers: Vec<Observer> = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            observer(&self.state());
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(String::new(), Vec::<Box<dyn Rule>>::new())
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("Field")
            .field("id", &self.id)
            .field("name", &self.config.name)
            .field("value", &state.value)
            .field("error", &state.error)
            .field("rules", &self.rules.len())
            .finish()
    }
}

fn describe(error: Option<&str>) -> String {
    match error {
        None => "valid".to_string(),
        Some(msg) => format!("invalid ({msg})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Email, Required};

    fn email_field() -> Field {
        Field::new("", vec![Required::new().boxed(), Email::new().boxed()])
    }

    #[test]
    fn test_initial_state_is_evaluated() {
        let field = Field::new("", vec![Required::new().boxed()]);
        assert!(!field.is_valid());
        assert_eq!(field.error().as_deref(), Some("This field is required"));
        assert!(!field.is_dirty());
    }

    #[test]
    fn test_set_value_revalidates() {
        let field = Field::new("", vec![Required::new().boxed()]);
        field.set_value("hi");
        assert!(field.is_valid());
        assert_eq!(field.error(), None);
        assert_eq!(field.value(), "hi");
    }

    #[test]
    fn test_clear_revalidates() {
        let field = Field::new("hi", vec![Required::new().boxed()]);
        assert!(field.is_valid());
        field.clear();
        assert_eq!(field.value(), "");
        assert!(field.has_error());
    }

    #[test]
    fn test_default_field_is_valid() {
        let field = Field::default();
        assert_eq!(field.value(), "");
        assert!(field.is_valid());
        assert_eq!(field.rule_count(), 0);
        assert_eq!(field.name(), "field");
    }

    #[test]
    fn test_observer_sees_consistent_state() {
        let field = email_field();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let reader = field.clone();
        let sink = Arc::clone(&seen);
        field.subscribe(move |state| {
            // The field is readable from inside the callback and agrees with it.
            assert_eq!(reader.state(), *state);
            sink.lock().unwrap().push(state.clone());
        });

        field.set_value("nope");
        field.set_value("a@b.co");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].error.as_deref(), Some("Invalid email address"));
        assert!(seen[1].is_valid());
    }

    #[test]
    fn test_observer_after_writing_observer_sees_latest_state() {
        let field = email_field();
        let last_seen = Arc::new(Mutex::new(None));

        let writer = field.clone();
        field.subscribe(move |state| {
            if state.value == "a" {
                writer.set_value("b@example.com");
            }
        });
        let sink = Arc::clone(&last_seen);
        field.subscribe(move |state| *sink.lock().unwrap() = Some(state.clone()));

        field.set_value("a");

        assert_eq!(field.value(), "b@example.com");
        assert_eq!(*last_seen.lock().unwrap(), Some(field.state()));
    }

    #[test]
    fn test_observers_run_in_registration_order() {
        let field = Field::default();
        let order = Arc::new(Mutex::new(Vec::new()));

        for n in 0..3 {
            let order = Arc::clone(&order);
            field.subscribe(move |_| order.lock().unwrap().push(n));
        }
        field.validate();

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe() {
        let field = Field::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let id = field.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        field.set_value("one");
        assert!(field.unsubscribe(id));
        assert!(!field.unsubscribe(id));
        field.set_value("two");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let field = email_field();
        let handle = field.clone();

        handle.set_value("a@b.co");

        assert_eq!(field.value(), "a@b.co");
        assert!(field.is_valid());
        assert_eq!(field.id(), handle.id());
    }

    #[test]
    fn test_dirty_tracking() {
        let field = email_field();
        assert!(!field.is_dirty());

        field.set_value("x");
        assert!(field.is_dirty());

        field.clear_dirty();
        assert!(!field.is_dirty());

        field.validate();
        assert!(field.is_dirty());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(Field::default().id(), Field::default().id());
        assert!(Field::default().id().to_string().starts_with("__field_"));
    }
}
