//! Process-wide singletons: the null object and the two booleans
//!
//! Singletons are created on first request and keep one reference that is
//! never released, so borrowed references to them stay valid forever.

use crate::object::{into_raw, object, Body, Kind, Object};
use crate::{FoTypeID, FoTypeRef};
use std::sync::OnceLock;

static NULL: OnceLock<usize> = OnceLock::new();
static TRUE: OnceLock<usize> = OnceLock::new();
static FALSE: OnceLock<usize> = OnceLock::new();

fn singleton(cell: &OnceLock<usize>, make: impl FnOnce() -> Object) -> FoTypeRef {
    *cell.get_or_init(|| into_raw(make()) as usize) as FoTypeRef
}

pub extern "C" fn fo_null_get_type_id() -> FoTypeID {
    Kind::Null.type_id()
}

pub extern "C" fn fo_boolean_get_type_id() -> FoTypeID {
    Kind::Boolean.type_id()
}

/// The null singleton (borrowed).
///
/// # Safety
///
/// Always safe to call; `unsafe` for ABI uniformity.
pub unsafe extern "C" fn fo_null_get() -> FoTypeRef {
    singleton(&NULL, || Object::immutable(Body::Null))
}

/// The boolean singleton for `value` (borrowed).
///
/// # Safety
///
/// Always safe to call; `unsafe` for ABI uniformity.
pub unsafe extern "C" fn fo_boolean_get(value: bool) -> FoTypeRef {
    let cell = if value { &TRUE } else { &FALSE };
    singleton(cell, || Object::immutable(Body::Boolean(value)))
}

/// # Safety
///
/// `boolean` must be null or a live object.
pub unsafe extern "C" fn fo_boolean_get_value(boolean: FoTypeRef) -> bool {
    matches!(object(boolean).map(|o| &o.body), Some(Body::Boolean(true)))
}
