//! Keyed containers, immutable and mutable
//!
//! Keys and values are retained. Keys are matched with `fo_hash` and
//! `fo_equal`. Enumeration order is stable while the dictionary is not
//! mutated.

use crate::object::{into_raw, object, position_of, reaches, Body, Kind, Object, Retained};
use crate::{ref_slice, FoIndex, FoTypeID, FoTypeRef};
use std::cell::UnsafeCell;
use std::ptr;

type Entries = Vec<(Retained, Retained)>;

fn create(entries: Entries, mutable: bool) -> FoTypeRef {
    let body = Body::Dictionary(UnsafeCell::new(entries));
    into_raw(if mutable {
        Object::mutable(body)
    } else {
        Object::immutable(body)
    })
}

/// Inserts or replaces, keeping the original key object on replacement.
unsafe fn upsert(entries: &mut Entries, key: FoTypeRef, value: FoTypeRef) {
    let value = Retained::retain(value);
    match position_of(entries, key) {
        Some(i) => entries[i].1 = value,
        None => entries.push((Retained::retain(key), value)),
    }
}

pub extern "C" fn fo_dictionary_get_type_id() -> FoTypeID {
    Kind::Dictionary.type_id()
}

/// Creates an immutable dictionary from parallel key/value arrays (owned).
/// Later duplicates replace earlier values. Returns null if any key or
/// value is null.
///
/// # Safety
///
/// `keys` and `values` must each point to `count` live references.
pub unsafe extern "C" fn fo_dictionary_create(
    keys: *const FoTypeRef,
    values: *const FoTypeRef,
    count: FoIndex,
) -> FoTypeRef {
    let (Some(keys), Some(values)) = (ref_slice(keys, count), ref_slice(values, count)) else {
        return ptr::null();
    };
    if keys.iter().chain(values.iter()).any(|r| r.is_null()) {
        return ptr::null();
    }
    let mut entries = Entries::with_capacity(keys.len());
    for (&key, &value) in keys.iter().zip(values.iter()) {
        upsert(&mut entries, key, value);
    }
    create(entries, false)
}

/// Creates an empty mutable dictionary (owned).
///
/// # Safety
///
/// Always safe to call; `unsafe` for ABI uniformity.
pub unsafe extern "C" fn fo_dictionary_create_mutable() -> FoTypeRef {
    create(Entries::new(), true)
}

/// Creates a mutable copy of any dictionary (owned), or null.
///
/// # Safety
///
/// `dict` must be null or a live object.
pub unsafe extern "C" fn fo_dictionary_create_mutable_copy(dict: FoTypeRef) -> FoTypeRef {
    match object(dict).and_then(|o| o.dictionary()) {
        Some(entries) => {
            let copy = entries
                .iter()
                .map(|(k, v)| (Retained::retain(k.as_raw()), Retained::retain(v.as_raw())))
                .collect();
            create(copy, true)
        }
        None => ptr::null(),
    }
}

/// # Safety
///
/// `dict` must be null or a live object.
pub unsafe extern "C" fn fo_dictionary_get_count(dict: FoTypeRef) -> FoIndex {
    object(dict)
        .and_then(|o| o.dictionary())
        .map_or(0, |e| e.len() as FoIndex)
}

/// Value for `key` (borrowed), or null if absent.
///
/// # Safety
///
/// Both arguments must be null or live objects.
pub unsafe extern "C" fn fo_dictionary_get_value(dict: FoTypeRef, key: FoTypeRef) -> FoTypeRef {
    let Some(entries) = object(dict).and_then(|o| o.dictionary()) else {
        return ptr::null();
    };
    match position_of(entries, key) {
        Some(i) => entries[i].1.as_raw(),
        None => ptr::null(),
    }
}

/// # Safety
///
/// Both arguments must be null or live objects.
pub unsafe extern "C" fn fo_dictionary_contains_key(dict: FoTypeRef, key: FoTypeRef) -> bool {
    object(dict)
        .and_then(|o| o.dictionary())
        .is_some_and(|e| position_of(e, key).is_some())
}

/// Writes the borrowed key and value at enumeration position `idx`.
///
/// # Safety
///
/// `dict` must be null or a live object; the out pointers must be writable.
pub unsafe extern "C" fn fo_dictionary_get_entry_at_index(
    dict: FoTypeRef,
    idx: FoIndex,
    out_key: *mut FoTypeRef,
    out_value: *mut FoTypeRef,
) -> bool {
    if out_key.is_null() || out_value.is_null() {
        return false;
    }
    let Some(entries) = object(dict).and_then(|o| o.dictionary()) else {
        return false;
    };
    match usize::try_from(idx).ok().and_then(|i| entries.get(i)) {
        Some((key, value)) => {
            *out_key = key.as_raw();
            *out_value = value.as_raw();
            true
        }
        None => false,
    }
}

/// Sets `value` for `key` in a mutable dictionary. Fails if the key or
/// the value is or contains the dictionary.
///
/// # Safety
///
/// All arguments must be null or live objects.
pub unsafe extern "C" fn fo_dictionary_set_value(dict: FoTypeRef, key: FoTypeRef, value: FoTypeRef) -> bool {
    if key.is_null() || value.is_null() || reaches(key, dict) || reaches(value, dict) {
        return false;
    }
    match object(dict).and_then(|o| o.dictionary_mut()) {
        Some(entries) => {
            upsert(entries, key, value);
            true
        }
        None => false,
    }
}

/// Removes `key` from a mutable dictionary. Returns false if absent, or if
/// `key` is or contains the dictionary.
///
/// # Safety
///
/// Both arguments must be null or live objects.
pub unsafe extern "C" fn fo_dictionary_remove_value(dict: FoTypeRef, key: FoTypeRef) -> bool {
    if reaches(key, dict) {
        return false;
    }
    let Some(entries) = object(dict).and_then(|o| o.dictionary_mut()) else {
        return false;
    };
    match position_of(entries, key) {
        Some(i) => {
            entries.remove(i);
            true
        }
        None => false,
    }
}

/// # Safety
///
/// `dict` must be null or a live object.
pub unsafe extern "C" fn fo_dictionary_remove_all_values(dict: FoTypeRef) -> bool {
    match object(dict).and_then(|o| o.dictionary_mut()) {
        Some(entries) => {
            entries.clear();
            true
        }
        None => false,
    }
}
