//! Raw foreign object ABI
//!
//! A reference-counted, dynamically typed object model exposed through
//! `extern "C"` entry points:
//! - Lifetime: `fo_retain`, `fo_release`
//! - Type identity: `fo_get_type_id`, `fo_is_mutable`
//! - Value protocol: `fo_equal`, `fo_hash`, `fo_copy_description`
//! - Weak observation: `fo_weak_*`
//! - Built-in kinds: null, boolean, number, string, data, array,
//!   dictionary, set
//!
//! # Ownership Conventions
//!
//! - Functions named `*_create*` or `*_copy*` return an **owned** reference.
//!   The caller must release it exactly once.
//! - Functions named `*_get*` return a **borrowed** reference. The caller
//!   must retain it before storing it beyond the current call.
//!
//! Factories return a null reference on failure.
//!
//! # Safety
//!
//! Every `unsafe` entry point expects each non-null reference argument to
//! be a live object produced by this ABI. Reference counting is atomic.
//! Mutating one object from several threads at once is undefined.

use std::os::raw::c_void;

mod array;
mod constants;
mod data;
mod dictionary;
mod number;
mod object;
mod set;
mod string;
mod weak;

/// Opaque reference to a foreign object
pub type FoTypeRef = *const c_void;

/// Opaque weak observation reference
pub type FoWeakRef = *mut c_void;

/// Runtime type identifier
pub type FoTypeID = usize;

/// Runtime hash code
pub type FoHashCode = usize;

/// Signed index/count type used across the ABI
pub type FoIndex = isize;

/// Type identifier reported for null references
pub const FO_TYPE_ID_INVALID: FoTypeID = 0;

pub use array::{
    fo_array_append_value, fo_array_contains_value, fo_array_create, fo_array_create_mutable,
    fo_array_create_mutable_copy, fo_array_get_count, fo_array_get_type_id,
    fo_array_get_value_at_index, fo_array_insert_value_at_index, fo_array_remove_all_values,
    fo_array_remove_value_at_index, fo_array_set_value_at_index,
};
pub use constants::{
    fo_boolean_get, fo_boolean_get_type_id, fo_boolean_get_value, fo_null_get,
    fo_null_get_type_id,
};
pub use data::{fo_data_create, fo_data_get_bytes_ptr, fo_data_get_length, fo_data_get_type_id};
pub use dictionary::{
    fo_dictionary_contains_key, fo_dictionary_create, fo_dictionary_create_mutable,
    fo_dictionary_create_mutable_copy, fo_dictionary_get_count, fo_dictionary_get_entry_at_index,
    fo_dictionary_get_type_id, fo_dictionary_get_value, fo_dictionary_remove_all_values,
    fo_dictionary_remove_value, fo_dictionary_set_value,
};
pub use number::{
    fo_number_create_f64, fo_number_create_i64, fo_number_get_f64, fo_number_get_i64,
    fo_number_get_type_id, fo_number_is_float,
};
pub use object::{
    fo_copy_description, fo_copy_type_id_description, fo_equal, fo_get_retain_count,
    fo_get_type_id, fo_hash, fo_is_mutable, fo_release, fo_retain,
};
pub use set::{
    fo_set_add_value, fo_set_contains_value, fo_set_create, fo_set_create_mutable,
    fo_set_create_mutable_copy, fo_set_get_count, fo_set_get_type_id, fo_set_get_value_at_index,
    fo_set_remove_all_values, fo_set_remove_value,
};
pub use string::{
    fo_string_append_bytes, fo_string_create_mutable, fo_string_create_mutable_copy,
    fo_string_create_with_bytes, fo_string_get_bytes_ptr, fo_string_get_length,
    fo_string_get_type_id,
};
pub use weak::{fo_weak_copy_target, fo_weak_create, fo_weak_destroy, fo_weak_is_alive};

/// Reads a `(pointer, length)` pair as a byte slice.
///
/// Returns `None` for negative lengths or a null pointer with a non-zero
/// length.
pub(crate) unsafe fn byte_slice<'a>(bytes: *const u8, len: FoIndex) -> Option<&'a [u8]> {
    match len {
        n if n < 0 => None,
        0 => Some(&[][..]),
        _ if bytes.is_null() => None,
        n => Some(std::slice::from_raw_parts(bytes, n as usize)),
    }
}

/// Reads a `(pointer, count)` pair of object references.
pub(crate) unsafe fn ref_slice<'a>(refs: *const FoTypeRef, count: FoIndex) -> Option<&'a [FoTypeRef]> {
    match count {
        n if n < 0 => None,
        0 => Some(&[][..]),
        _ if refs.is_null() => None,
        n => Some(std::slice::from_raw_parts(refs, n as usize)),
    }
}
