use std::sync::{Arc, Mutex};

use formcheck_lib::{Email, Field, FieldState, MinLength, Pattern, Predicate, Required, Rule};

const RULE_KINDS: usize = 5;

fn make_rule(kind: usize) -> Box<dyn Rule> {
    match kind {
        0 => Required::new().boxed(),
        1 => Email::new().boxed(),
        2 => Pattern::new("^[0-9]{3}$", "must be 3 digits").unwrap().boxed(),
        3 => MinLength::new(4, "at least 4").boxed(),
        _ => Predicate::new(|v| !v.contains('!'), "no bangs").boxed(),
    }
}

const SAMPLES: &[&str] = &[
    "",
    "   ",
    " x ",
    "123",
    "1234",
    "12a",
    "a@b",
    "a@b.co",
    "A@B.COM",
    "hey!",
    "not-an-email",
];

/// Expected error computed directly from the rules, independent of Field.
fn expected_error(rules: &[Box<dyn Rule>], value: &str) -> Option<String> {
    for rule in rules {
        if !rule.validate(value) {
            return Some(rule.message().to_string());
        }
    }
    None
}

// ============================================================================
// First-failing-rule policy
// ============================================================================

#[test]
fn test_error_is_first_failing_rule_for_all_small_rule_lists() {
    let n = RULE_KINDS;

    // Every ordered list of up to three rules (with repeats).
    let mut lists: Vec<Vec<usize>> = vec![vec![]];
    for len in 1..=3u32 {
        for mut code in 0..n.pow(len) {
            let mut list = Vec::new();
            for _ in 0..len {
                list.push(code % n);
                code /= n;
            }
            lists.push(list);
        }
    }

    for list in &lists {
        let make = || list.iter().map(|&kind| make_rule(kind)).collect::<Vec<_>>();
        let reference = make();
        let field = Field::new("", make());

        for value in SAMPLES {
            field.set_value(*value);
            assert_eq!(
                field.error(),
                expected_error(&reference, value),
                "rules {:?}, value {:?}",
                list,
                value
            );
            assert_eq!(field.is_valid(), field.error().is_none());
        }
    }
}

#[test]
fn test_required_before_email_wins_on_empty() {
    let field = Field::new("", vec![Required::new().boxed(), Email::new().boxed()]);
    assert_eq!(field.error().as_deref(), Some("This field is required"));
}

#[test]
fn test_email_before_required_wins_on_empty() {
    let field = Field::new("", vec![Email::new().boxed(), Required::new().boxed()]);
    assert_eq!(field.error().as_deref(), Some("Invalid email address"));
}

#[test]
fn test_line_break_only_value_satisfies_required() {
    let field = Field::new("  ", vec![Required::new().boxed()]);
    assert!(!field.is_valid());

    field.set_value("\r\n");
    assert!(field.is_valid());
}

#[test]
fn test_empty_rule_list_is_always_valid() {
    let field = Field::new("", Vec::<Box<dyn Rule>>::new());
    assert!(field.is_valid());
    field.set_value("anything at all");
    assert!(field.is_valid());
    field.validate();
    assert_eq!(field.error(), None);
}

// ============================================================================
// Reactivity
// ============================================================================

#[test]
fn test_write_updates_error_without_validate_call() {
    let field = Field::new("", vec![Required::new().boxed()]);
    assert!(!field.is_valid());
    assert_eq!(field.error().as_deref(), Some("This field is required"));

    field.set_value("hi");
    assert!(field.is_valid());
    assert_eq!(field.error(), None);
}

#[test]
fn test_initial_value_is_validated_at_construction() {
    let field = Field::new("a@b", vec![Email::new().boxed()]);
    assert_eq!(field.error().as_deref(), Some("Invalid email address"));

    let field = Field::new("a@b.co", vec![Email::new().boxed()]);
    assert!(field.is_valid());
}

#[test]
fn test_validate_is_idempotent() {
    let digits = Pattern::new("[0-9]{3}", "must be 3 digits").unwrap();
    let field = Field::new("12", vec![digits.boxed()]);

    field.validate();
    let first = field.error();
    field.validate();
    let second = field.error();

    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("must be 3 digits"));
}

#[test]
fn test_observer_never_sees_stale_error() {
    let field = Field::new("", vec![Required::new().boxed(), Email::new().boxed()]);
    let log: Arc<Mutex<Vec<FieldState>>> = Arc::default();

    let sink = Arc::clone(&log);
    field.subscribe(move |state| sink.lock().unwrap().push(state.clone()));

    for value in ["", "j", "jane@", "jane@example.com", "  "] {
        field.set_value(value);
    }

    let rules = vec![Required::new().boxed(), Email::new().boxed()];
    for state in log.lock().unwrap().iter() {
        assert_eq!(state.error, expected_error(&rules, &state.value));
    }
}

#[test]
fn test_observer_called_on_validate() {
    let field = Field::new("x", vec![Required::new().boxed()]);
    let count = Arc::new(Mutex::new(0));

    let counter = Arc::clone(&count);
    field.subscribe(move |_| *counter.lock().unwrap() += 1);

    field.validate();
    field.validate();

    assert_eq!(*count.lock().unwrap(), 2);
}

// ============================================================================
// Login form
// ============================================================================

#[test]
fn test_login_form_submit() {
    let email = Field::builder().name("email").required().email().build();
    let password = Field::builder()
        .name("password")
        .required_with("Password cannot be empty")
        .build();

    let form_valid = || email.is_valid() && password.is_valid();
    assert!(!form_valid());

    email.set_value("jane@example.com");
    assert!(!form_valid());
    assert_eq!(password.error().as_deref(), Some("Password cannot be empty"));

    password.set_value("hunter2");
    email.validate();
    password.validate();
    assert!(form_valid());
}
