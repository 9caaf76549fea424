//! Unordered unique collections, immutable and mutable

use crate::array::retain_all;
use crate::object::{index_of, into_raw, object, reaches, Body, Kind, Object, Retained};
use crate::{ref_slice, FoIndex, FoTypeID, FoTypeRef};
use std::cell::UnsafeCell;
use std::ptr;

fn create(elements: Vec<Retained>, mutable: bool) -> FoTypeRef {
    let body = Body::Set(UnsafeCell::new(elements));
    into_raw(if mutable {
        Object::mutable(body)
    } else {
        Object::immutable(body)
    })
}

pub extern "C" fn fo_set_get_type_id() -> FoTypeID {
    Kind::Set.type_id()
}

/// Creates an immutable set (owned). Duplicates collapse to the first
/// occurrence. Returns null if any value is null.
///
/// # Safety
///
/// `values` must point to `count` live references.
pub unsafe extern "C" fn fo_set_create(values: *const FoTypeRef, count: FoIndex) -> FoTypeRef {
    let Some(retained) = ref_slice(values, count).and_then(|refs| retain_all(refs)) else {
        return ptr::null();
    };
    let mut unique: Vec<Retained> = Vec::with_capacity(retained.len());
    for element in retained {
        if index_of(&unique, element.as_raw()).is_none() {
            unique.push(element);
        }
    }
    create(unique, false)
}

/// Creates an empty mutable set (owned).
///
/// # Safety
///
/// Always safe to call; `unsafe` for ABI uniformity.
pub unsafe extern "C" fn fo_set_create_mutable() -> FoTypeRef {
    create(Vec::new(), true)
}

/// Creates a mutable copy of any set (owned), or null.
///
/// # Safety
///
/// `set` must be null or a live object.
pub unsafe extern "C" fn fo_set_create_mutable_copy(set: FoTypeRef) -> FoTypeRef {
    match object(set).and_then(|o| o.set()) {
        Some(elements) => {
            let copy = elements.iter().map(|e| Retained::retain(e.as_raw())).collect();
            create(copy, true)
        }
        None => ptr::null(),
    }
}

/// # Safety
///
/// `set` must be null or a live object.
pub unsafe extern "C" fn fo_set_get_count(set: FoTypeRef) -> FoIndex {
    object(set)
        .and_then(|o| o.set())
        .map_or(0, |e| e.len() as FoIndex)
}

/// # Safety
///
/// Both arguments must be null or live objects.
pub unsafe extern "C" fn fo_set_contains_value(set: FoTypeRef, value: FoTypeRef) -> bool {
    object(set)
        .and_then(|o| o.set())
        .is_some_and(|e| index_of(e, value).is_some())
}

/// Element at enumeration position `idx` (borrowed), or null.
///
/// # Safety
///
/// `set` must be null or a live object.
pub unsafe extern "C" fn fo_set_get_value_at_index(set: FoTypeRef, idx: FoIndex) -> FoTypeRef {
    object(set)
        .and_then(|o| o.set())
        .and_then(|e| usize::try_from(idx).ok().and_then(|i| e.get(i)))
        .map_or(ptr::null(), |e| e.as_raw())
}

/// Adds `value` unless an equal element is present. Fails if `value` is
/// or contains the set.
///
/// # Safety
///
/// Both arguments must be null or live objects.
pub unsafe extern "C" fn fo_set_add_value(set: FoTypeRef, value: FoTypeRef) -> bool {
    if value.is_null() || reaches(value, set) {
        return false;
    }
    match object(set).and_then(|o| o.set_mut()) {
        Some(elements) => {
            if index_of(elements, value).is_none() {
                elements.push(Retained::retain(value));
            }
            true
        }
        None => false,
    }
}

/// Removes the element equal to `value`. Returns false if absent, or if
/// `value` is or contains the set.
///
/// # Safety
///
/// Both arguments must be null or live objects.
pub unsafe extern "C" fn fo_set_remove_value(set: FoTypeRef, value: FoTypeRef) -> bool {
    if reaches(value, set) {
        return false;
    }
    let Some(elements) = object(set).and_then(|o| o.set_mut()) else {
        return false;
    };
    match index_of(elements, value) {
        Some(i) => {
            elements.remove(i);
            true
        }
        None => false,
    }
}

/// # Safety
///
/// `set` must be null or a live object.
pub unsafe extern "C" fn fo_set_remove_all_values(set: FoTypeRef) -> bool {
    match object(set).and_then(|o| o.set_mut()) {
        Some(elements) => {
            elements.clear();
            true
        }
        None => false,
    }
}
