//! Shared helpers for bridge integration tests

#![allow(dead_code)]

use refbridge::audit::{self, OwnershipReport};
use refbridge::settings::{self, BridgeSettings};
use refbridge::{Array, ForeignObject, ForeignString, ForeignType, Number};

pub use pretty_assertions::{assert_eq, assert_ne};

/// Turn on the ownership ledger and clear it for this thread
pub fn start_audit() -> OwnershipReport {
    settings::apply(BridgeSettings {
        audit_ownership: true,
        ..settings::current()
    });
    audit::reset();
    audit::report()
}

/// Assert that everything acquired since `start` was given up
pub fn assert_balanced_since(start: &OwnershipReport) {
    let delta = audit::report().since(start);
    assert!(delta.is_balanced(), "unbalanced ownership: {:?}", delta);
}

pub fn int(value: i64) -> Number {
    Number::from_i64(value).expect("number factory failed")
}

pub fn float(value: f64) -> Number {
    Number::from_f64(value).expect("number factory failed")
}

pub fn string(value: &str) -> ForeignString {
    ForeignString::new(value).expect("string factory failed")
}

/// `[1, "foo", 3.14]` as an immutable array
#[allow(clippy::approx_constant)]
pub fn heterogeneous_array() -> Array {
    let items: Vec<ForeignObject> = vec![
        int(1).into_object(),
        string("foo").into_object(),
        float(3.14).into_object(),
    ];
    Array::from_items(&items).expect("array factory failed")
}
