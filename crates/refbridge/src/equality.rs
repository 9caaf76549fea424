//! Value equality and hashing
//!
//! Wrapper `PartialEq` and `Hash` delegate to the foreign runtime, so
//! objects that are equal there hash equally here, across wrapper types
//! and across mutable and immutable variants.
//!
//! A mutable object's hash changes when its contents do. Do not mutate an
//! object while it is used as a key in a Rust `HashMap` or `HashSet`.
//!
//! Comparing reads both objects without synchronization. Handles to
//! objects that may be mutable are not `Send` or `Sync`, so a comparison
//! can never overlap a mutation on another thread. Only the immutable
//! scalar wrappers cross threads.

use crate::foreign_type::ForeignType;
use refbridge_sys as sys;

/// Foreign value equality
pub fn equal<A: ForeignType, B: ForeignType>(a: &A, b: &B) -> bool {
    unsafe { sys::fo_equal(a.as_raw(), b.as_raw()) }
}

/// Foreign hash code
pub fn hash_code<T: ForeignType>(value: &T) -> usize {
    unsafe { sys::fo_hash(value.as_raw()) }
}

/// Reference identity
pub fn identical<A: ForeignType, B: ForeignType>(a: &A, b: &B) -> bool {
    a.same_object(b)
}
