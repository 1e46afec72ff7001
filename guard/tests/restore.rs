//! End-to-end restoration scenarios against fixed-shape and misbehaving
//! targets.

use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

use pretty_assertions::assert_eq;
use veil_core::{props, PropError, PropResult, PropTarget, Props, Value};
use veil_guard::{merged, overwrites, with_props, GuardError, Overwrite};

/// A fixed-shape target: two typed fields, no dynamic keys, no removal.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    debug: bool,
    timeout: i64,
}

impl PropTarget for Settings {
    fn get_prop(&self, key: &str) -> Option<Value> {
        match key {
            "debug" => Some(Value::Bool(self.debug)),
            "timeout" => Some(Value::Int(self.timeout)),
            _ => None,
        }
    }

    fn set_prop(&mut self, key: &str, value: Value) -> PropResult<()> {
        match key {
            "debug" => match value {
                Value::Bool(b) => {
                    self.debug = b;
                    Ok(())
                }
                other => Err(PropError::rejected(key, format!("expected Bool, got {}", other.type_name()))),
            },
            "timeout" => match value {
                Value::Int(i) => {
                    self.timeout = i;
                    Ok(())
                }
                other => Err(PropError::rejected(key, format!("expected Int, got {}", other.type_name()))),
            },
            _ => Err(PropError::no_such_property(key)),
        }
    }

    fn remove_prop(&mut self, key: &str) -> PropResult<()> {
        Err(PropError::rejected(key, "settings fields cannot be removed"))
    }
}

/// A map-shaped target whose keys can be locked against writes mid-call.
#[derive(Debug, Default)]
struct Lockable {
    props: Props,
    locked: HashSet<String>,
}

impl Lockable {
    fn lock(&mut self, key: &str) {
        self.locked.insert(key.to_string());
    }
}

impl PropTarget for Lockable {
    fn get_prop(&self, key: &str) -> Option<Value> {
        self.props.get(key).cloned()
    }

    fn set_prop(&mut self, key: &str, value: Value) -> PropResult<()> {
        if self.locked.contains(key) {
            return Err(PropError::immutable(key));
        }
        self.props.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_prop(&mut self, key: &str) -> PropResult<()> {
        if self.locked.contains(key) {
            return Err(PropError::immutable(key));
        }
        self.props.remove(key);
        Ok(())
    }
}

#[test]
fn test_debug_timeout_scenario_with_panicking_work() {
    // GIVEN O = {debug: false, timeout: 5000}
    let mut settings = Settings {
        debug: false,
        timeout: 5_000,
    };
    let set = overwrites! { "debug" => true, "timeout" => 10_000i64 };

    // WHEN the unit of work observes the overlay and then panics
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        with_props(&mut settings, &set, |target, snapshot| {
            assert_eq!(target.get_prop("debug"), Some(Value::Bool(true)));
            assert_eq!(snapshot.get("timeout"), Some(&Value::Int(5_000)));
            panic!("work exploded");
        })
    }));

    // THEN the panic reaches the caller and the target is fully restored
    assert!(outcome.is_err());
    assert_eq!(
        settings,
        Settings {
            debug: false,
            timeout: 5_000,
        }
    );
}

#[test]
fn test_failed_apply_rolls_back_the_prefix() {
    // GIVEN a fixed-shape target and an overwrite set whose second key
    // does not exist
    let mut settings = Settings {
        debug: false,
        timeout: 5_000,
    };
    let set = overwrites! { "debug" => true, "retries" => 3i64 };

    // WHEN
    let result = with_props(&mut settings, &set, |_, _| ());

    // THEN the error names the failing key and the first overwrite was
    // undone
    match result {
        Err(GuardError::Apply { key, source }) => {
            assert_eq!(key, "retries");
            assert!(matches!(source, PropError::NoSuchProperty { .. }));
        }
        other => panic!("expected apply failure, got {:?}", other),
    }
    assert!(!settings.debug);
}

#[test]
fn test_type_rejection_surfaces_as_apply_error() {
    // GIVEN
    let mut settings = Settings {
        debug: false,
        timeout: 5_000,
    };
    let set = overwrites! { "timeout" => "soon" };

    // WHEN/THEN
    let result = with_props(&mut settings, &set, |_, _| ());
    assert!(matches!(
        result,
        Err(GuardError::Apply { ref key, source: PropError::Rejected { .. } }) if key == "timeout"
    ));
    assert_eq!(settings.timeout, 5_000);
}

#[test]
fn test_restore_is_best_effort_and_aggregates_failures() {
    // GIVEN a lockable target with two overwritten keys
    let mut target = Lockable {
        props: props! { "debug" => false, "timeout" => 5_000i64 },
        ..Default::default()
    };
    let set = overwrites! { "debug" => true, "timeout" => 10_000i64 };

    // WHEN the unit of work locks one key before returning
    let result = with_props(&mut target, &set, |target, _| {
        target.lock("debug");
    });

    // THEN the locked key's failure is reported, the other key is
    // restored anyway
    match result {
        Err(GuardError::Restore(err)) => {
            assert_eq!(err.failures.len(), 1);
            assert_eq!(err.failures[0].0, "debug");
            assert!(matches!(err.failures[0].1, PropError::Immutable { .. }));
        }
        other => panic!("expected restore failure, got {:?}", other),
    }
    assert_eq!(target.get_prop("timeout"), Some(Value::Int(5_000)));
    assert_eq!(target.get_prop("debug"), Some(Value::Bool(true)));
}

#[test]
fn test_panic_with_locked_restore_still_unwinds_the_panic() {
    // GIVEN a target that will refuse the write-back
    let mut target = Lockable {
        props: props! { "debug" => false },
        ..Default::default()
    };
    let set = overwrites! { "debug" => true };

    // WHEN the unit of work locks the key and panics
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        with_props(&mut target, &set, |target, _| {
            target.lock("debug");
            panic!("work exploded");
        })
    }));

    // THEN the original panic is what the caller observes; the failed
    // restore is only logged
    let payload = outcome.unwrap_err();
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"work exploded"));
}

#[test]
fn test_remember_and_ignore_against_fixed_shape_target() {
    // GIVEN
    let mut settings = Settings {
        debug: true,
        timeout: 250,
    };
    let set = overwrites! {
        "debug" => Overwrite::Remember,
        "timeout" => Overwrite::Ignore,
    };

    // WHEN
    with_props(&mut settings, &set, |target, snapshot| {
        assert_eq!(snapshot.get("debug"), Some(&Value::Bool(true)));
        assert!(!snapshot.contains("timeout"));
        assert_eq!(target.get_prop("debug"), Some(Value::Bool(true)));
    })
    .unwrap();

    // THEN nothing changed
    assert_eq!(
        settings,
        Settings {
            debug: true,
            timeout: 250,
        }
    );
}

#[test]
fn test_merged_copy_for_concurrent_use() {
    // GIVEN
    let settings = Settings {
        debug: false,
        timeout: 5_000,
    };
    let set = overwrites! { "debug" => true };

    // WHEN
    let copy = merged(&settings, &set).unwrap();

    // THEN the copy carries the overlay, the original does not
    assert!(copy.debug);
    assert!(!settings.debug);
    assert_eq!(copy.timeout, 5_000);
}

#[test]
fn test_nested_overlays_on_a_shared_map() {
    // GIVEN
    let mut config: Props = props! { "level" => "info" };
    let outer = overwrites! { "level" => "debug" };
    let inner = overwrites! { "level" => "trace" };

    // WHEN
    with_props(&mut config, &outer, |target, _| {
        with_props(target, &inner, |target, snapshot| {
            assert_eq!(target.get_prop("level"), Some(Value::String("trace".into())));
            assert_eq!(snapshot.get("level"), Some(&Value::String("debug".into())));
        })
        .unwrap();
        assert_eq!(target.get_prop("level"), Some(Value::String("debug".into())));
    })
    .unwrap();

    // THEN
    assert_eq!(config.get_prop("level"), Some(Value::String("info".into())));
}
